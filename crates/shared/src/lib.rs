//! Shared types, errors, and configuration for Stockval.
//!
//! This crate provides common pieces used by the valuation engine and by the
//! applications that embed it:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{AppConfig, LoggingConfig, ValuationConfig};
pub use error::AppError;
