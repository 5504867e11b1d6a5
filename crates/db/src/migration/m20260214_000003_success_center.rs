//! Success Center migration.
//!
//! Creates tutoring locations, student usage logs, and staff settings.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SUCCESS_CENTER_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS success_profiles CASCADE;
            DROP TABLE IF EXISTS student_usage_logs CASCADE;
            DROP TABLE IF EXISTS tutor_locations CASCADE;
            ",
        )
        .await?;
        Ok(())
    }
}

const SUCCESS_CENTER_SQL: &str = r"
CREATE TABLE tutor_locations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    location_name VARCHAR(80) NOT NULL UNIQUE,
    room_number VARCHAR(10),
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_event BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- One row per visit. check_out IS NULL means currently checked in.
CREATE TABLE student_usage_logs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES wmu_users(id) ON DELETE CASCADE,
    location_id UUID REFERENCES tutor_locations(id) ON DELETE SET NULL,
    check_in TIMESTAMPTZ NOT NULL,
    check_out TIMESTAMPTZ,
    approved BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_check_out_after_in CHECK (check_out IS NULL OR check_out >= check_in)
);

-- At most one open visit per student.
CREATE UNIQUE INDEX uq_usage_logs_open
    ON student_usage_logs(student_id) WHERE check_out IS NULL;

-- Index for the currently-checked-in listing.
CREATE INDEX idx_usage_logs_open_by_location
    ON student_usage_logs(location_id, check_in) WHERE check_out IS NULL;

-- Success Center staff settings.
CREATE TABLE success_profiles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    profile_id UUID NOT NULL UNIQUE REFERENCES profiles(id) ON DELETE CASCADE,
    default_tutor_location_id UUID REFERENCES tutor_locations(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TRIGGER trg_tutor_locations_updated_at
    BEFORE UPDATE ON tutor_locations
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_student_usage_logs_updated_at
    BEFORE UPDATE ON student_usage_logs
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_success_profiles_updated_at
    BEFORE UPDATE ON success_profiles
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";
