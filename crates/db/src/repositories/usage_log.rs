//! Success Center usage log repository.
//!
//! A usage log row with a null `check_out` means the student is currently
//! checked in. Check-in and check-out are last-write-wins updates guarded by
//! an existence check; double submissions surface as warning-class errors.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{
    student_usage_logs, success_profiles, tutor_locations, user_intermediaries, wmu_users,
};

/// Errors raised by check-in/out operations.
#[derive(Debug, Error)]
pub enum UsageLogError {
    /// The student already has an open usage log.
    #[error("student \"{0}\" is already checked in")]
    AlreadyCheckedIn(String),

    /// The student has no open usage log to close.
    #[error("student \"{0}\" is already checked out")]
    NotCheckedIn(String),

    /// Underlying database failure.
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Usage log repository.
#[derive(Debug, Clone)]
pub struct UsageLogRepository {
    db: DatabaseConnection,
}

impl UsageLogRepository {
    /// Creates a new usage log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the student's open usage log, repairing duplicates first.
    ///
    /// Historic data occasionally holds several open rows for one student.
    /// Open rows whose check-in lands within 10 minutes of an earlier open
    /// row are deleted as double submissions before the survivor is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn find_open(
        &self,
        student_id: Uuid,
    ) -> Result<Option<student_usage_logs::Model>, DbErr> {
        let open_logs = student_usage_logs::Entity::find()
            .filter(student_usage_logs::Column::StudentId.eq(student_id))
            .filter(student_usage_logs::Column::CheckOut.is_null())
            .order_by_asc(student_usage_logs::Column::CheckIn)
            .all(&self.db)
            .await?;

        if open_logs.len() <= 1 {
            return Ok(open_logs.into_iter().next());
        }

        warn!(
            student_id = %student_id,
            count = open_logs.len(),
            "student has multiple open usage logs, repairing"
        );

        let mut survivor: Option<student_usage_logs::Model> = None;
        for log in open_logs {
            match &survivor {
                None => survivor = Some(log),
                Some(kept) => {
                    if log.check_in - kept.check_in <= Duration::minutes(10) {
                        log.delete(&self.db).await?;
                    } else {
                        survivor = Some(log);
                    }
                }
            }
        }

        Ok(survivor)
    }

    /// Checks a student in, creating an open usage log.
    ///
    /// # Errors
    ///
    /// Returns [`UsageLogError::AlreadyCheckedIn`] when an open row already
    /// exists; the concurrent double-submission case additionally lands on
    /// the partial unique index and is mapped to the same error.
    pub async fn check_in(
        &self,
        student: &wmu_users::Model,
        location_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<student_usage_logs::Model, UsageLogError> {
        if self.find_open(student.id).await?.is_some() {
            return Err(UsageLogError::AlreadyCheckedIn(student.bronco_net.clone()));
        }

        let result = student_usage_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student.id),
            location_id: Set(location_id),
            check_in: Set(now.into()),
            check_out: Set(None),
            approved: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(log) => {
                info!(student = %student.bronco_net, "student checked in");
                Ok(log)
            }
            // A concurrent tab won the race; the unique index caught it.
            Err(e) if e.to_string().contains("uq_usage_logs_open") => {
                Err(UsageLogError::AlreadyCheckedIn(student.bronco_net.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks a student out, stamping their open usage log.
    ///
    /// # Errors
    ///
    /// Returns [`UsageLogError::NotCheckedIn`] when no open row exists.
    pub async fn check_out(
        &self,
        student: &wmu_users::Model,
        now: DateTime<Utc>,
    ) -> Result<student_usage_logs::Model, UsageLogError> {
        let Some(open) = self.find_open(student.id).await? else {
            return Err(UsageLogError::NotCheckedIn(student.bronco_net.clone()));
        };

        let mut active: student_usage_logs::ActiveModel = open.into();
        active.check_out = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        let log = active.update(&self.db).await?;

        info!(student = %student.bronco_net, "student checked out");
        Ok(log)
    }

    /// Lists currently checked-in students with their log rows, oldest
    /// check-in first, optionally filtered to a set of locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn open_logs(
        &self,
        location_ids: Option<&[Uuid]>,
    ) -> Result<Vec<(student_usage_logs::Model, Option<wmu_users::Model>)>, DbErr> {
        let mut query = student_usage_logs::Entity::find()
            .filter(student_usage_logs::Column::CheckOut.is_null())
            .order_by_asc(student_usage_logs::Column::CheckIn);

        if let Some(ids) = location_ids {
            query = query.filter(student_usage_logs::Column::LocationId.is_in(ids.iter().copied()));
        }

        query
            .find_also_related(wmu_users::Entity)
            .all(&self.db)
            .await
    }

    /// Lists a student's full usage history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn history_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<student_usage_logs::Model>, DbErr> {
        student_usage_logs::Entity::find()
            .filter(student_usage_logs::Column::StudentId.eq(student_id))
            .order_by_desc(student_usage_logs::Column::CheckIn)
            .all(&self.db)
            .await
    }

    /// Marks a batch of usage logs approved.
    ///
    /// # Errors
    ///
    /// Returns an error if a database update fails.
    pub async fn approve(&self, log_ids: &[Uuid]) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now();

        let result = student_usage_logs::Entity::update_many()
            .col_expr(
                student_usage_logs::Column::Approved,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                student_usage_logs::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(student_usage_logs::Column::Id.is_in(log_ids.iter().copied()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }

    /// Lists active tutoring locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn active_locations(&self) -> Result<Vec<tutor_locations::Model>, DbErr> {
        tutor_locations::Entity::find()
            .filter(tutor_locations::Column::IsActive.eq(true))
            .order_by_asc(tutor_locations::Column::LocationName)
            .all(&self.db)
            .await
    }

    /// Finds a tutoring location by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_location_by_name(
        &self,
        name: &str,
    ) -> Result<Option<tutor_locations::Model>, DbErr> {
        tutor_locations::Entity::find()
            .filter(tutor_locations::Column::LocationName.eq(name))
            .one(&self.db)
            .await
    }

    /// Returns a staff member's default tutoring location, if they have set
    /// one on their Success Center profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn default_location_for(&self, user_id: Uuid) -> Result<Option<Uuid>, DbErr> {
        let Some(intermediary) = user_intermediaries::Entity::find()
            .filter(user_intermediaries::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let Some(profile_id) = intermediary.profile_id else {
            return Ok(None);
        };

        let success_profile = success_profiles::Entity::find()
            .filter(success_profiles::Column::ProfileId.eq(profile_id))
            .one(&self.db)
            .await?;

        Ok(success_profile.and_then(|p| p.default_tutor_location_id))
    }

    /// Sets a staff member's default tutoring location, creating their
    /// Success Center profile row if this is their first visit.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` when the user has no portal profile.
    pub async fn set_default_location(
        &self,
        user_id: Uuid,
        location_id: Option<Uuid>,
    ) -> Result<(), DbErr> {
        let intermediary = user_intermediaries::Entity::find()
            .filter(user_intermediaries::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("intermediary for user {user_id}")))?;
        let profile_id = intermediary
            .profile_id
            .ok_or_else(|| DbErr::RecordNotFound(format!("profile for user {user_id}")))?;

        let now = chrono::Utc::now().into();
        let existing = success_profiles::Entity::find()
            .filter(success_profiles::Column::ProfileId.eq(profile_id))
            .one(&self.db)
            .await?;

        match existing {
            Some(model) => {
                let mut active: success_profiles::ActiveModel = model.into();
                active.default_tutor_location_id = Set(location_id);
                active.updated_at = Set(now);
                active.update(&self.db).await?;
            }
            None => {
                success_profiles::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    profile_id: Set(profile_id),
                    default_tutor_location_id: Set(location_id),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await?;
            }
        }

        Ok(())
    }
}
