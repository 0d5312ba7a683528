//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MailOtp
//! application. It provides concrete implementations for the collaborators
//! the core service depends on: the OTP and user document stores (MySQL via
//! SQLx), email delivery (HTTP mail API or console), environment-driven
//! configuration, and the background cleanup task.

use thiserror::Error;

/// Configuration module for infrastructure services
pub mod config;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Mail module - email delivery implementations
pub mod mail;

/// Services module - infrastructure service implementations
pub mod services;

// Re-export core types for convenience
pub use mailotp_core::errors::*;

/// Errors raised while constructing or operating infrastructure services
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Mail error: {0}")]
    Mail(String),
}
