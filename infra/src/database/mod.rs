//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository implementations for the core trait seams

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlOtpRepository, MySqlUserRepository};
