//! Shared types, errors, and configuration for the Quad portal.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management (server, database, directory, email)
//! - JWT claims and token service
//! - Email delivery service
//! - Pagination types for list endpoints

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use email::EmailService;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
