//! Timesheets migration.
//!
//! Creates pay periods and employee shift records.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(TIMESHEETS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS timesheet_shifts CASCADE;
            DROP TABLE IF EXISTS pay_periods CASCADE;
            ",
        )
        .await?;
        Ok(())
    }
}

const TIMESHEETS_SQL: &str = r"
-- Two-week payroll windows.
CREATE TABLE pay_periods (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    date_start DATE NOT NULL UNIQUE,
    date_end DATE NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_pay_period_dates CHECK (date_start <= date_end)
);

CREATE INDEX idx_pay_periods_start ON pay_periods(date_start DESC);

CREATE TABLE timesheet_shifts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    pay_period_id UUID NOT NULL REFERENCES pay_periods(id) ON DELETE CASCADE,
    clock_in TIMESTAMPTZ NOT NULL,
    clock_out TIMESTAMPTZ,
    signature TEXT NOT NULL DEFAULT '1',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_clock_out_after_in CHECK (clock_out IS NULL OR clock_out > clock_in)
);

CREATE INDEX idx_shifts_employee_period
    ON timesheet_shifts(employee_id, pay_period_id, clock_in);

-- At most one open shift per employee.
CREATE UNIQUE INDEX uq_shifts_open
    ON timesheet_shifts(employee_id) WHERE clock_out IS NULL;

CREATE TRIGGER trg_pay_periods_updated_at
    BEFORE UPDATE ON pay_periods
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_timesheet_shifts_updated_at
    BEFORE UPDATE ON timesheet_shifts
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";
