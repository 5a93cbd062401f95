//! Bulk Order Core - Foundation crate for the bulk-order tool.
//!
//! This crate provides the shared error type, configuration management and
//! the validated field newtypes that the ingestion and submission crates
//! depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Validated newtypes (`UsState`, `ZipCode`, `Email`)
//! - [`report`] - Tagged status-line sink (`Reporter`)
//!
//! # Example
//!
//! ```rust
//! use bulkorder_core::{AppConfig, UsState, ZipCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.service.confirmation_timeout_secs, 5);
//!
//! let state = UsState::new("NY")?;
//! let zip = ZipCode::new("10001-1234")?;
//! assert_eq!(state.as_str(), "NY");
//! assert_eq!(zip.as_str(), "10001-1234");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, FormSelectors, IdentityConfig, ServiceConfig};
pub use error::{ConfigError, ConfigResult, OrderError};
pub use report::{ConsoleReporter, MemoryReporter, ReportTag, Reporter};
pub use types::{Email, UsState, ZipCode, US_STATE_CODES};
