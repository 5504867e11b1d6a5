//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the portal's relational records
//! - Repository abstractions for data access
//! - Database migrations
//! - The fixture/seed engine used by the seeder binary

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod seed;

pub use repositories::{
    CampusRepository, GroupRepository, InventoryRepository, SessionRepository,
    TimesheetRepository, UsageLogRepository, UserRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
