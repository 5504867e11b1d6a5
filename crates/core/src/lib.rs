//! Core business logic for the Quad portal.
//!
//! This crate contains the portal's domain rules with no web or database
//! dependencies (the directory client is behind a trait so everything here
//! tests against stubs).
//!
//! # Modules
//!
//! - `auth` - Password hashing
//! - `directory` - Campus LDAP attribute parsing and the status/retention resolver
//! - `roles` - Named portal roles and their deterministic permission subsets
//! - `terms` - Semester and pay-period date rules, shift overlap checks

pub mod auth;
pub mod directory;
pub mod roles;
pub mod terms;
pub mod text;
