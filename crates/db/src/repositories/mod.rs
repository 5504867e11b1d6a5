//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod campus;
pub mod directory;
pub mod group;
pub mod inventory;
pub mod session;
pub mod timesheet;
pub mod usage_log;
pub mod user;

pub use campus::{CampusRepository, CreateRoomInput, CreateSemesterInput, SemesterError};
pub use directory::DirectoryRepository;
pub use group::GroupRepository;
pub use inventory::{CreateAssetInput, CreateSoftwareDetailInput, InventoryRepository};
pub use session::SessionRepository;
pub use timesheet::{CreateShiftInput, TimesheetError, TimesheetRepository};
pub use usage_log::{UsageLogError, UsageLogRepository};
pub use user::{CreateUserInput, UserRepository};
