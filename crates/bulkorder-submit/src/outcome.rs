//! Order outcomes and confirmation text classification.

use crate::session::SessionStage;
use bulkorder_core::ReportTag;
use bulkorder_ingest::AddressRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confirmation fragment shown when the address already received an order.
pub const ALREADY_ORDERED_MARKER: &str = "have already been ordered for this address";

/// Confirmation fragment shown when the service rejects the address.
pub const INVALID_ADDRESS_MARKER: &str = "validate your address";

/// Confirmation fragment shown on a placed order.
pub const SUCCESS_MARKER: &str = "Thank You!";

/// Kind of result of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// An order already exists for this address
    AlreadyOrdered,

    /// The service could not validate the address
    InvalidAddress,

    /// The order was placed
    Success,

    /// The confirmation text matched no known pattern
    UnknownFailure,

    /// The session failed before a confirmation could be classified
    SessionError,
}

impl OutcomeKind {
    /// Every kind, in classification precedence order.
    pub const ALL: [Self; 5] = [
        Self::AlreadyOrdered,
        Self::InvalidAddress,
        Self::Success,
        Self::UnknownFailure,
        Self::SessionError,
    ];

    /// Check if the outcome leaves the person with a kit on the way
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::AlreadyOrdered)
    }

    /// Short human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AlreadyOrdered => "already ordered",
            Self::InvalidAddress => "invalid address",
            Self::Success => "ordered",
            Self::UnknownFailure => "unknown failure",
            Self::SessionError => "session error",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map confirmation text to an outcome kind. First match wins.
#[must_use]
pub fn classify(text: &str) -> OutcomeKind {
    if text.contains(ALREADY_ORDERED_MARKER) {
        OutcomeKind::AlreadyOrdered
    } else if text.contains(INVALID_ADDRESS_MARKER) {
        OutcomeKind::InvalidAddress
    } else if text.contains(SUCCESS_MARKER) {
        OutcomeKind::Success
    } else {
        OutcomeKind::UnknownFailure
    }
}

/// Result of one submission attempt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderOutcome {
    kind: OutcomeKind,
    message: String,
    record: AddressRecord,
    failed_at: Option<SessionStage>,
}

impl OrderOutcome {
    /// Outcome of a session that produced a confirmation text
    #[must_use]
    pub fn classified(record: AddressRecord, text: String) -> Self {
        Self {
            kind: classify(&text),
            message: text,
            record,
            failed_at: None,
        }
    }

    /// Outcome of a session that failed after reaching `stage`
    #[must_use]
    pub fn session_error(record: AddressRecord, stage: SessionStage, description: String) -> Self {
        Self {
            kind: OutcomeKind::SessionError,
            message: description,
            record,
            failed_at: Some(stage),
        }
    }

    /// Classified kind
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    /// Raw confirmation text, or the raw error description for session errors
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The record this outcome belongs to
    #[must_use]
    pub fn record(&self) -> &AddressRecord {
        &self.record
    }

    /// Last stage reached before a session error
    #[must_use]
    pub fn failed_at(&self) -> Option<SessionStage> {
        self.failed_at
    }

    /// Tag of the status line for this outcome
    #[must_use]
    pub fn report_tag(&self) -> ReportTag {
        if self.kind.is_success() {
            ReportTag::Success
        } else {
            ReportTag::Failure
        }
    }

    /// One-line status for display
    #[must_use]
    pub fn status_line(&self) -> String {
        let name = self.record.full_name();
        match self.kind {
            OutcomeKind::AlreadyOrdered => {
                format!("Tests for {name} have already been ordered. No new tests ordered.")
            }
            OutcomeKind::InvalidAddress => {
                format!("Ordering tests for {name} failed due to an invalid address.")
            }
            OutcomeKind::Success => {
                format!("Successfully ordered tests for {name}: \"{}\"", self.message)
            }
            OutcomeKind::UnknownFailure => {
                format!("Ordering tests for {name} failed: \"{}\"", self.message)
            }
            OutcomeKind::SessionError => self.message.clone(),
        }
    }
}
