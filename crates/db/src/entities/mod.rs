//! `SeaORM` entity definitions.
//!
//! One module per table. Relations are declared where the repositories
//! actually join; purely structural foreign keys are left as plain columns.

pub mod addresses;
pub mod assets;
pub mod departments;
pub mod group_memberships;
pub mod group_permissions;
pub mod groups;
pub mod majors;
pub mod pay_periods;
pub mod permissions;
pub mod profiles;
pub mod room_departments;
pub mod room_types;
pub mod rooms;
pub mod semesters;
pub mod sessions;
pub mod site_themes;
pub mod software;
pub mod software_details;
pub mod student_usage_logs;
pub mod success_profiles;
pub mod timesheet_shifts;
pub mod tutor_locations;
pub mod user_groups;
pub mod user_intermediaries;
pub mod users;
pub mod wmu_user_majors;
pub mod wmu_users;
