//! Timesheet repository: pay periods and employee shifts.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use thiserror::Error;
use uuid::Uuid;

use quad_core::terms::{
    ShiftError, end_date_for, local_day_end, local_day_start, validate_shift,
};

use crate::entities::{pay_periods, timesheet_shifts};

/// Errors raised by timesheet operations.
#[derive(Debug, Error)]
pub enum TimesheetError {
    /// A shift validation rule failed.
    #[error(transparent)]
    Shift(#[from] ShiftError),

    /// No pay period covers the requested date.
    #[error("no pay period covers {0}")]
    NoPayPeriod(NaiveDate),

    /// The employee already has an open shift.
    #[error("employee already has an open shift")]
    AlreadyClockedIn,

    /// The employee has no open shift to close.
    #[error("employee is not clocked in")]
    NotClockedIn,

    /// Underlying database failure.
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Input for creating a completed shift directly (admin correction flow).
#[derive(Debug, Clone)]
pub struct CreateShiftInput {
    /// The employee's user id.
    pub employee_id: Uuid,
    /// Clock-in time.
    pub clock_in: DateTime<Utc>,
    /// Clock-out time.
    pub clock_out: Option<DateTime<Utc>>,
    /// Serialized signature from the frontend pad.
    pub signature: String,
}

/// Timesheet repository.
#[derive(Debug, Clone)]
pub struct TimesheetRepository {
    db: DatabaseConnection,
}

impl TimesheetRepository {
    /// Creates a new timesheet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the pay period containing a date, creating it (and its
    /// two-week end date) if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_or_create_period(
        &self,
        date_start: NaiveDate,
    ) -> Result<pay_periods::Model, DbErr> {
        if let Some(existing) = pay_periods::Entity::find()
            .filter(pay_periods::Column::DateStart.eq(date_start))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now().into();
        pay_periods::ActiveModel {
            id: Set(Uuid::new_v4()),
            date_start: Set(date_start),
            date_end: Set(end_date_for(date_start)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds the pay period containing a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_period_for(
        &self,
        date: NaiveDate,
    ) -> Result<Option<pay_periods::Model>, DbErr> {
        pay_periods::Entity::find()
            .filter(pay_periods::Column::DateStart.lte(date))
            .filter(pay_periods::Column::DateEnd.gte(date))
            .one(&self.db)
            .await
    }

    /// Lists pay periods, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_periods(&self, limit: u64) -> Result<Vec<pay_periods::Model>, DbErr> {
        pay_periods::Entity::find()
            .order_by_desc(pay_periods::Column::DateStart)
            .paginate(&self.db, limit)
            .fetch_page(0)
            .await
    }

    /// Finds an employee's open shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_open_shift(
        &self,
        employee_id: Uuid,
    ) -> Result<Option<timesheet_shifts::Model>, DbErr> {
        timesheet_shifts::Entity::find()
            .filter(timesheet_shifts::Column::EmployeeId.eq(employee_id))
            .filter(timesheet_shifts::Column::ClockOut.is_null())
            .one(&self.db)
            .await
    }

    /// Clocks an employee in for a new shift.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetError::AlreadyClockedIn`] when an open shift
    /// exists, [`TimesheetError::NoPayPeriod`] when today is uncovered, or a
    /// validation error when the clock-in overlaps another shift.
    pub async fn clock_in(
        &self,
        employee_id: Uuid,
        now: DateTime<Utc>,
        signature: &str,
    ) -> Result<timesheet_shifts::Model, TimesheetError> {
        if self.find_open_shift(employee_id).await?.is_some() {
            return Err(TimesheetError::AlreadyClockedIn);
        }

        let today = now.date_naive();
        let period = self
            .find_period_for(today)
            .await?
            .ok_or(TimesheetError::NoPayPeriod(today))?;

        self.validate_against_period(employee_id, &period, now, None)
            .await?;

        let shift = timesheet_shifts::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            pay_period_id: Set(period.id),
            clock_in: Set(now.into()),
            clock_out: Set(None),
            signature: Set(signature.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(shift)
    }

    /// Clocks an employee out of their open shift.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetError::NotClockedIn`] when no open shift exists,
    /// or a validation error when the clock-out would overlap another shift.
    pub async fn clock_out(
        &self,
        employee_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<timesheet_shifts::Model, TimesheetError> {
        let Some(open) = self.find_open_shift(employee_id).await? else {
            return Err(TimesheetError::NotClockedIn);
        };

        let period = pay_periods::Entity::find_by_id(open.pay_period_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("pay period {}", open.pay_period_id)))?;

        let clock_in = open.clock_in.with_timezone(&Utc);
        self.validate_against_period(employee_id, &period, clock_in, Some(now))
            .await?;

        let mut active: timesheet_shifts::ActiveModel = open.into();
        active.clock_out = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        Ok(active.update(&self.db).await?)
    }

    /// Creates a shift record directly, validating all invariants. Used by
    /// the admin correction flow.
    ///
    /// # Errors
    ///
    /// Returns a validation or database error.
    pub async fn add_shift(
        &self,
        input: CreateShiftInput,
    ) -> Result<timesheet_shifts::Model, TimesheetError> {
        let date = input.clock_in.date_naive();
        let period = self
            .find_period_for(date)
            .await?
            .ok_or(TimesheetError::NoPayPeriod(date))?;

        self.validate_against_period(input.employee_id, &period, input.clock_in, input.clock_out)
            .await?;

        let now = Utc::now().into();
        let shift = timesheet_shifts::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(input.employee_id),
            pay_period_id: Set(period.id),
            clock_in: Set(input.clock_in.into()),
            clock_out: Set(input.clock_out.map(Into::into)),
            signature: Set(input.signature),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(shift)
    }

    /// Lists an employee's shifts in a pay period, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn shifts_for(
        &self,
        employee_id: Uuid,
        pay_period_id: Uuid,
    ) -> Result<Vec<timesheet_shifts::Model>, DbErr> {
        timesheet_shifts::Entity::find()
            .filter(timesheet_shifts::Column::EmployeeId.eq(employee_id))
            .filter(timesheet_shifts::Column::PayPeriodId.eq(pay_period_id))
            .order_by_asc(timesheet_shifts::Column::ClockIn)
            .all(&self.db)
            .await
    }

    /// Validates candidate clock times against the employee's completed
    /// shifts and the pay period's local-time bounds.
    async fn validate_against_period(
        &self,
        employee_id: Uuid,
        period: &pay_periods::Model,
        clock_in: DateTime<Utc>,
        clock_out: Option<DateTime<Utc>>,
    ) -> Result<(), TimesheetError> {
        let existing: Vec<(DateTime<Utc>, DateTime<Utc>)> = timesheet_shifts::Entity::find()
            .filter(timesheet_shifts::Column::EmployeeId.eq(employee_id))
            .filter(timesheet_shifts::Column::ClockOut.is_not_null())
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|shift| {
                shift
                    .clock_out
                    .map(|out| (shift.clock_in.with_timezone(&Utc), out.with_timezone(&Utc)))
            })
            .collect();

        let bounds = (
            local_day_start(period.date_start),
            local_day_end(period.date_end),
        );

        validate_shift(clock_in, clock_out, &existing, bounds)?;
        Ok(())
    }
}
