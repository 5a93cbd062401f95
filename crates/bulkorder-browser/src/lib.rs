//! Browser automation capability for the order form.
//!
//! The submission protocol only talks to the traits in [`actions`], so it can
//! run against the Chromium-backed [`ChromiumAutomation`] or a scripted fake.
//! Outbound identities are drawn from [`IdentityPool`].

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;

pub use actions::{
    Automation, BrowserActions, BrowserContext, BrowserSession, ClickTarget, LaunchOptions,
};
pub use engine::ChromiumAutomation;
pub use error::{BrowserError, Result};
pub use fingerprint::{Fingerprint, IdentityPool};
