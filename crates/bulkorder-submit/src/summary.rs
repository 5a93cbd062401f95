//! Aggregated results of one batch run.

use crate::outcome::{OrderOutcome, OutcomeKind};
use chrono::{DateTime, Utc};

/// All outcomes of a batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    outcomes: Vec<OrderOutcome>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl BatchReport {
    /// Empty report, timed from now
    #[must_use]
    pub fn start() -> Self {
        Self {
            outcomes: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Append the next record's outcome
    pub fn push(&mut self, outcome: OrderOutcome) {
        self.outcomes.push(outcome);
    }

    /// Stop the clock
    #[must_use]
    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    /// Outcomes in input order
    #[must_use]
    pub fn outcomes(&self) -> &[OrderOutcome] {
        &self.outcomes
    }

    /// Number of records processed
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no record was processed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes of the given kind
    #[must_use]
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind() == kind).count()
    }

    /// Wall-clock duration of the run, once finished
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// One-line summary, e.g. `Processed 3 records: 1 ordered, 0 already ordered, ...`
    #[must_use]
    pub fn summary_line(&self) -> String {
        let parts = OutcomeKind::ALL
            .iter()
            .map(|&kind| format!("{} {}", self.count(kind), kind.label()))
            .collect::<Vec<_>>()
            .join(", ");
        let noun = if self.len() == 1 { "record" } else { "records" };
        format!("Processed {} {noun}: {parts}.", self.len())
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::start()
    }
}
