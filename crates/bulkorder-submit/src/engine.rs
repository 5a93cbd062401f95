//! Sequential batch engine.
//!
//! Records are processed strictly one at a time, in input order, each in its
//! own browser. A failing record becomes a `SessionError` outcome and the loop
//! moves on to the next one.

use crate::outcome::OrderOutcome;
use crate::session::{submit_record, SessionStage, SubmissionSettings};
use crate::summary::BatchReport;
use bulkorder_browser::{Automation, IdentityPool};
use bulkorder_core::Reporter;
use bulkorder_ingest::AddressRecord;
use std::sync::Arc;

/// Drives the submission protocol over a batch of records.
pub struct SubmissionEngine {
    /// Automation capability sessions are launched from
    automation: Arc<dyn Automation>,
    /// Source of outbound identities
    identities: IdentityPool,
    /// Protocol settings
    settings: SubmissionSettings,
    /// Sink for status lines
    reporter: Arc<dyn Reporter>,
}

impl SubmissionEngine {
    /// Create a new submission engine.
    #[must_use]
    pub fn new(
        automation: Arc<dyn Automation>,
        settings: SubmissionSettings,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            automation,
            identities: IdentityPool::builtin(),
            settings,
            reporter,
        }
    }

    /// Replace the identity pool.
    #[must_use]
    pub fn with_identity_pool(mut self, identities: IdentityPool) -> Self {
        self.identities = identities;
        self
    }

    /// Submit a single record in a fresh session.
    pub async fn submit_one(&self, record: &AddressRecord) -> OrderOutcome {
        let identity = match self.identities.random(&self.settings.identity_categories) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::error!(record = %record.full_name(), "no outbound identity: {e}");
                return OrderOutcome::session_error(
                    record.clone(),
                    SessionStage::Init,
                    e.to_string(),
                );
            }
        };

        submit_record(self.automation.as_ref(), &self.settings, &identity, record).await
    }

    /// Process every record in order, producing exactly one outcome per record.
    pub async fn run_batch(&self, records: &[AddressRecord]) -> BatchReport {
        let mut report = BatchReport::start();

        for (index, record) in records.iter().enumerate() {
            if index > 0 && !self.settings.pause_between_records.is_zero() {
                tokio::time::sleep(self.settings.pause_between_records).await;
            }

            tracing::info!(
                record = index + 1,
                total = records.len(),
                "submitting order for {}",
                record.full_name()
            );
            self.reporter.info(&format!(
                "Attempting to order test kit for {}...",
                record.full_name()
            ));

            let outcome = self.submit_one(record).await;

            tracing::info!(
                record = index + 1,
                kind = %outcome.kind(),
                failed_at = ?outcome.failed_at(),
                "order attempt finished"
            );
            self.reporter
                .report(outcome.report_tag(), &outcome.status_line());
            report.push(outcome);
        }

        let report = report.finish();
        self.reporter.info(&report.summary_line());
        report
    }
}
