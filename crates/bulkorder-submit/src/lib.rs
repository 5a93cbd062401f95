//! Bulk Order Submit - per-record order submission and the batch loop.
//!
//! This crate drives the order form once per validated record, extracts the
//! confirmation text and classifies it. One record's failure never stops the
//! batch: it is reported as a `SessionError` outcome instead.
//!
//! # Features
//!
//! - Strictly sequential processing, one isolated browser per record
//! - Browser teardown on every exit path, including timeouts and panics
//! - Deterministic classification of confirmation text
//! - Batch summary with per-outcome counts
//!
//! # Example
//!
//! ```rust,ignore
//! use bulkorder_browser::ChromiumAutomation;
//! use bulkorder_core::ConsoleReporter;
//! use bulkorder_submit::{SubmissionEngine, SubmissionSettings};
//! use std::sync::Arc;
//!
//! let engine = SubmissionEngine::new(
//!     Arc::new(ChromiumAutomation::new()),
//!     SubmissionSettings::default(),
//!     Arc::new(ConsoleReporter::new()),
//! );
//!
//! let report = engine.run_batch(&records).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod engine;
pub mod error;
pub mod outcome;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use engine::SubmissionEngine;
pub use error::{Result, SubmitError};
pub use outcome::{classify, OrderOutcome, OutcomeKind};
pub use session::{submit_record, SessionStage, SubmissionSettings};
pub use summary::BatchReport;
