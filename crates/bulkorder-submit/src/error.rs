//! Errors raised inside one record's session.
//!
//! None of these escape the batch loop: each one is turned into a
//! `SessionError` outcome for the record it happened on.

use bulkorder_browser::BrowserError;
use std::time::Duration;
use thiserror::Error;

/// Failure of one record's session.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// An automation step failed
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// No confirmation text within the wait window
    #[error("timeout: confirmation message did not appear within {0:?}")]
    ConfirmationTimeout(Duration),

    /// The automation layer panicked
    #[error("session panicked: {0}")]
    Panicked(String),
}

/// Result type alias for session steps.
pub type Result<T> = std::result::Result<T, SubmitError>;
