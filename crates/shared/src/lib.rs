//! Shared errors and configuration for Accrual.
//!
//! This crate provides common pieces used by the API and the server binary:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, CorsConfig, ServerConfig, SimulationConfig};
pub use error::AppError;
