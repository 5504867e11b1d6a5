//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20260214_000001_initial;
mod m20260214_000002_sessions;
mod m20260214_000003_success_center;
mod m20260214_000004_timesheets;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260214_000001_initial::Migration),
            Box::new(m20260214_000002_sessions::Migration),
            Box::new(m20260214_000003_success_center::Migration),
            Box::new(m20260214_000004_timesheets::Migration),
        ]
    }
}
