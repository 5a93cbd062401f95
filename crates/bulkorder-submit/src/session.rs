//! The per-record submission protocol.
//!
//! One record gets one browser, driven through a fixed sequence of stages:
//!
//! `Init → Launched → ContextReady → PageLoaded → ContactFilled →
//! ShippingFilled → CheckoutConfirmed → OrderSubmitted → MessageExtracted →
//! Classified → Closed`
//!
//! Whatever happens after launch (an error at any stage, a timeout, even a
//! panic in the automation layer) the browser is closed before the outcome is
//! returned.

use crate::error::{Result, SubmitError};
use crate::outcome::OrderOutcome;
use bulkorder_browser::{Automation, BrowserSession, Fingerprint, LaunchOptions};
use bulkorder_core::{AppConfig, FormSelectors};
use bulkorder_ingest::AddressRecord;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

/// Stages of one record's session, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    /// Nothing started yet
    Init,
    /// Browser running
    Launched,
    /// Context and page open with the drawn identity
    ContextReady,
    /// Entry page loaded
    PageLoaded,
    /// Sender name and email filled
    ContactFilled,
    /// Shipping name, address, state and zip filled
    ShippingFilled,
    /// Checkout triggered
    CheckoutConfirmed,
    /// Order placement triggered
    OrderSubmitted,
    /// Confirmation text read
    MessageExtracted,
    /// Confirmation text mapped to an outcome
    Classified,
    /// Browser torn down
    Closed,
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Launched => "launched",
            Self::ContextReady => "context ready",
            Self::PageLoaded => "page loaded",
            Self::ContactFilled => "contact filled",
            Self::ShippingFilled => "shipping filled",
            Self::CheckoutConfirmed => "checkout confirmed",
            Self::OrderSubmitted => "order submitted",
            Self::MessageExtracted => "message extracted",
            Self::Classified => "classified",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Everything the protocol needs besides the record itself.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    /// URL of the order form
    pub entry_url: String,
    /// Selectors and action labels of the form
    pub form: FormSelectors,
    /// Wait window for the confirmation text
    pub confirmation_timeout: Duration,
    /// Delay between two consecutive records
    pub pause_between_records: Duration,
    /// How each record's browser is started
    pub launch: LaunchOptions,
    /// Identity categories the outbound user agent is drawn from
    pub identity_categories: Vec<String>,
}

impl SubmissionSettings {
    /// Settings derived from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            entry_url: config.service.entry_url.clone(),
            form: config.form.clone(),
            confirmation_timeout: config.service.confirmation_timeout(),
            pause_between_records: config.service.pause_between_records(),
            launch: LaunchOptions {
                headless: config.browser.headless,
                window_width: config.browser.window_width,
                window_height: config.browser.window_height,
                navigation_timeout: Duration::from_secs(config.browser.navigation_timeout_secs),
                executable: config.browser.executable.clone(),
            },
            identity_categories: config.identity.categories.clone(),
        }
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Run the whole protocol for one record and return its outcome.
///
/// Never fails: every error is folded into a `SessionError` outcome.
pub async fn submit_record(
    automation: &dyn Automation,
    settings: &SubmissionSettings,
    identity: &Fingerprint,
    record: &AddressRecord,
) -> OrderOutcome {
    let mut stage = SessionStage::Init;

    let mut session = match automation.launch(&settings.launch).await {
        Ok(session) => session,
        Err(e) => return session_failed(record, stage, &SubmitError::from(e)),
    };
    stage = SessionStage::Launched;
    tracing::debug!(record = %record.full_name(), user_agent = %identity.user_agent, "session launched");

    let driven = AssertUnwindSafe(drive(
        session.as_ref(),
        settings,
        identity,
        record,
        &mut stage,
    ))
    .catch_unwind()
    .await
    .unwrap_or_else(|panic| Err(SubmitError::Panicked(panic_message(panic.as_ref()))));

    // Teardown runs on every path past launch
    if let Err(e) = session.close().await {
        tracing::warn!(record = %record.full_name(), "browser teardown failed: {e}");
    }
    tracing::debug!(record = %record.full_name(), "session {}", SessionStage::Closed);

    driven.unwrap_or_else(|e| session_failed(record, stage, &e))
}

fn session_failed(record: &AddressRecord, stage: SessionStage, error: &SubmitError) -> OrderOutcome {
    tracing::error!(record = %record.full_name(), %stage, "session failed: {error}");
    OrderOutcome::session_error(record.clone(), stage, error.to_string())
}

fn advance(stage: &mut SessionStage, next: SessionStage) {
    tracing::debug!(from = %stage, to = %next, "stage");
    *stage = next;
}

/// Stages from `Launched` to `Classified`.
async fn drive(
    session: &dyn BrowserSession,
    settings: &SubmissionSettings,
    identity: &Fingerprint,
    record: &AddressRecord,
    stage: &mut SessionStage,
) -> Result<OrderOutcome> {
    let form = &settings.form;

    let context = session.new_context(identity).await?;
    let page = context.new_page().await?;
    advance(stage, SessionStage::ContextReady);

    page.goto(&settings.entry_url).await?;
    advance(stage, SessionStage::PageLoaded);

    // Contact information
    page.fill(&form.sender_first_name, &record.first_name).await?;
    page.fill(&form.sender_last_name, &record.last_name).await?;
    page.fill(&form.sender_email, record.contact_email()).await?;
    advance(stage, SessionStage::ContactFilled);

    // Shipping information
    page.fill(&form.first_name, record.shipping_first_name()).await?;
    page.fill(&form.last_name, record.shipping_last_name()).await?;
    page.fill(&form.street_address, &record.street_address).await?;
    page.fill(&form.city, &record.city).await?;
    page.select_option(&form.state, record.state.as_str()).await?;
    page.fill(&form.zip_code, record.zip_code.as_str()).await?;
    advance(stage, SessionStage::ShippingFilled);

    page.click(&form.checkout).await?;
    advance(stage, SessionStage::CheckoutConfirmed);

    page.click(&form.place_order).await?;
    advance(stage, SessionStage::OrderSubmitted);

    let window = settings.confirmation_timeout;
    let text = tokio::time::timeout(window, page.text_content(&form.confirmation, window))
        .await
        .map_err(|_| SubmitError::ConfirmationTimeout(window))??;
    advance(stage, SessionStage::MessageExtracted);

    let outcome = OrderOutcome::classified(record.clone(), text);
    advance(stage, SessionStage::Classified);
    tracing::debug!(record = %record.full_name(), kind = %outcome.kind(), "confirmation classified");

    Ok(outcome)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(SessionStage::Init < SessionStage::Launched);
        assert!(SessionStage::ShippingFilled < SessionStage::CheckoutConfirmed);
        assert!(SessionStage::Classified < SessionStage::Closed);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = AppConfig::default();
        config.service.confirmation_timeout_secs = 9;
        config.browser.headless = false;

        let settings = SubmissionSettings::from_config(&config);
        assert_eq!(settings.confirmation_timeout, Duration::from_secs(9));
        assert!(!settings.launch.headless);
        assert_eq!(settings.form.state, "#state");
        assert_eq!(settings.entry_url, "https://special.usps.com/testkits");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
