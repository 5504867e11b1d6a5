//! Campus records repository: departments, rooms, majors, semesters.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use quad_core::terms::{SemesterDatesError, semester_name, validate_semester_dates};
use quad_core::text::slugify;

use crate::entities::{
    departments, majors, room_departments, room_types, rooms, semesters, wmu_user_majors,
};

/// Errors raised creating semesters.
#[derive(Debug, Error)]
pub enum SemesterError {
    /// Date ordering rule failed.
    #[error(transparent)]
    Dates(#[from] SemesterDatesError),

    /// Underlying database failure.
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Input for creating a room.
#[derive(Debug, Clone)]
pub struct CreateRoomInput {
    /// Room name, e.g. `C-226`.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Seat capacity.
    pub capacity: i16,
    /// Room type id.
    pub room_type_id: Uuid,
    /// Departments sharing the room.
    pub department_ids: Vec<Uuid>,
}

/// Input for creating a semester.
#[derive(Debug, Clone, Copy)]
pub struct CreateSemesterInput {
    /// First day of classes.
    pub start_date: chrono::NaiveDate,
    /// Last day of finals.
    pub end_date: chrono::NaiveDate,
}

/// Campus records repository.
#[derive(Debug, Clone)]
pub struct CampusRepository {
    db: DatabaseConnection,
}

impl CampusRepository {
    /// Creates a new campus repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------

    /// Lists departments in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_departments(&self) -> Result<Vec<departments::Model>, DbErr> {
        departments::Entity::find()
            .order_by_asc(departments::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Gets a department by code, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_or_create_department(
        &self,
        code: &str,
        name: &str,
    ) -> Result<departments::Model, DbErr> {
        if let Some(existing) = departments::Entity::find()
            .filter(departments::Column::Code.eq(code))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let now = chrono::Utc::now().into();
        departments::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            slug: Set(slugify(name)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    // ------------------------------------------------------------------
    // Room types and rooms
    // ------------------------------------------------------------------

    /// Lists room types.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_room_types(&self) -> Result<Vec<room_types::Model>, DbErr> {
        room_types::Entity::find()
            .order_by_asc(room_types::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Gets a room type by name, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_or_create_room_type(&self, name: &str) -> Result<room_types::Model, DbErr> {
        if let Some(existing) = room_types::Entity::find()
            .filter(room_types::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let now = chrono::Utc::now().into();
        room_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            slug: Set(slugify(name)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Creates a room with its department links in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails.
    pub async fn create_room(&self, input: CreateRoomInput) -> Result<rooms::Model, DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let room = rooms::ActiveModel {
            id: Set(Uuid::new_v4()),
            room_type_id: Set(input.room_type_id),
            name: Set(input.name.clone()),
            description: Set(input.description),
            capacity: Set(input.capacity),
            slug: Set(slugify(&input.name)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for department_id in input.department_ids {
            room_departments::ActiveModel {
                room_id: Set(room.id),
                department_id: Set(department_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(room)
    }

    /// Lists rooms with their types, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_rooms(
        &self,
    ) -> Result<Vec<(rooms::Model, Option<room_types::Model>)>, DbErr> {
        rooms::Entity::find()
            .find_also_related(room_types::Entity)
            .order_by_asc(rooms::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a room by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_room_by_slug(&self, slug: &str) -> Result<Option<rooms::Model>, DbErr> {
        rooms::Entity::find()
            .filter(rooms::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    // ------------------------------------------------------------------
    // Majors
    // ------------------------------------------------------------------

    /// Lists majors, optionally restricted to a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_majors(
        &self,
        department_id: Option<Uuid>,
    ) -> Result<Vec<majors::Model>, DbErr> {
        let mut query = majors::Entity::find().order_by_asc(majors::Column::Code);
        if let Some(department_id) = department_id {
            query = query.filter(majors::Column::DepartmentId.eq(department_id));
        }
        query.all(&self.db).await
    }

    /// Gets a major by code, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_or_create_major(
        &self,
        department_id: Uuid,
        code: &str,
        name: &str,
        undergrad: bool,
    ) -> Result<majors::Model, DbErr> {
        if let Some(existing) = majors::Entity::find()
            .filter(majors::Column::Code.eq(code))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let now = chrono::Utc::now().into();
        majors::ActiveModel {
            id: Set(Uuid::new_v4()),
            department_id: Set(department_id),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            undergrad: Set(undergrad),
            active: Set(true),
            slug: Set(slugify(code)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Lists the majors a student is actively pursuing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn majors_for_student(
        &self,
        wmu_user_id: Uuid,
    ) -> Result<Vec<majors::Model>, DbErr> {
        let relations = wmu_user_majors::Entity::find()
            .filter(wmu_user_majors::Column::WmuUserId.eq(wmu_user_id))
            .filter(wmu_user_majors::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;

        let major_ids: Vec<Uuid> = relations.iter().map(|r| r.major_id).collect();
        majors::Entity::find()
            .filter(majors::Column::Id.is_in(major_ids))
            .order_by_asc(majors::Column::Code)
            .all(&self.db)
            .await
    }

    /// Records that a student is pursuing a major.
    ///
    /// Any other active major relationships are closed (stamped with
    /// `date_stopped`) rather than deleted, preserving history. A no-op when
    /// the student already actively pursues the major.
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails.
    pub async fn declare_major(
        &self,
        wmu_user_id: Uuid,
        major_id: Uuid,
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now();

        let active_relations = wmu_user_majors::Entity::find()
            .filter(wmu_user_majors::Column::WmuUserId.eq(wmu_user_id))
            .filter(wmu_user_majors::Column::IsActive.eq(true))
            .all(&txn)
            .await?;

        let mut already_declared = false;
        for relation in active_relations {
            if relation.major_id == major_id {
                already_declared = true;
                continue;
            }
            // Student switched majors; close the old relationship.
            let mut active: wmu_user_majors::ActiveModel = relation.into();
            active.is_active = Set(false);
            active.date_stopped = Set(Some(now.into()));
            active.updated_at = Set(now.into());
            active.update(&txn).await?;
        }

        if !already_declared {
            wmu_user_majors::ActiveModel {
                id: Set(Uuid::new_v4()),
                wmu_user_id: Set(wmu_user_id),
                major_id: Set(major_id),
                is_active: Set(true),
                date_started: Set(now.into()),
                date_stopped: Set(None),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Semesters
    // ------------------------------------------------------------------

    /// Creates a semester, deriving its name from the dates.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `start_date >= end_date`.
    pub async fn create_semester(
        &self,
        input: CreateSemesterInput,
    ) -> Result<semesters::Model, SemesterError> {
        validate_semester_dates(input.start_date, input.end_date)?;

        let now = chrono::Utc::now().into();
        let semester = semesters::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(semester_name(input.start_date, input.end_date)),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(semester)
    }

    /// Lists semesters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_semesters(&self) -> Result<Vec<semesters::Model>, DbErr> {
        semesters::Entity::find()
            .order_by_desc(semesters::Column::StartDate)
            .all(&self.db)
            .await
    }

    /// Finds the semester containing a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_semester_for(
        &self,
        date: chrono::NaiveDate,
    ) -> Result<Option<semesters::Model>, DbErr> {
        semesters::Entity::find()
            .filter(semesters::Column::StartDate.lte(date))
            .filter(semesters::Column::EndDate.gte(date))
            .one(&self.db)
            .await
    }
}
