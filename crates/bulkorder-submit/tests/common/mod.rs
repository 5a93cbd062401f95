//! Scripted fake of the automation capability.

#![allow(dead_code)]

use async_trait::async_trait;
use bulkorder_browser::{
    Automation, BrowserActions, BrowserContext, BrowserError, BrowserSession, Fingerprint,
    LaunchOptions, Result,
};
use bulkorder_ingest::{validate_row, AddressRecord, RawRow};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How one session behaves.
#[derive(Debug, Clone, Default)]
pub struct SessionScript {
    /// Confirmation text; `None` makes `text_content` never resolve
    pub confirmation: Option<String>,
    /// Operation (`launch`, `context`, `page`, `goto`, `fill`, `select`, `click`, `text`)
    /// and a detail fragment that must appear in the call for it to fail
    pub fail_on: Option<(&'static str, &'static str)>,
    /// Operation that panics
    pub panic_on: Option<&'static str>,
    /// Whether closing the browser reports an error
    pub close_fails: bool,
}

impl SessionScript {
    pub fn confirm(text: &str) -> Self {
        Self {
            confirmation: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn fail_on(op: &'static str, detail: &'static str) -> Self {
        Self {
            confirmation: Some("Thank You!".to_string()),
            fail_on: Some((op, detail)),
            ..Self::default()
        }
    }

    pub fn panic_on(op: &'static str) -> Self {
        Self {
            confirmation: Some("Thank You!".to_string()),
            panic_on: Some(op),
            ..Self::default()
        }
    }

    pub fn hang() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
pub struct Counters {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub open: AtomicUsize,
    pub max_open: AtomicUsize,
}

/// Fake automation handing out one scripted session per launch, in order.
#[derive(Debug, Default)]
pub struct FakeAutomation {
    scripts: Mutex<VecDeque<SessionScript>>,
    pub log: Arc<Mutex<Vec<String>>>,
    pub counters: Arc<Counters>,
}

impl FakeAutomation {
    pub fn new(scripts: impl IntoIterator<Item = SessionScript>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn launches(&self) -> usize {
        self.counters.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.counters.closes.load(Ordering::SeqCst)
    }

    pub fn open_sessions(&self) -> usize {
        self.counters.open.load(Ordering::SeqCst)
    }

    pub fn max_open_sessions(&self) -> usize {
        self.counters.max_open.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
struct Shared {
    id: usize,
    script: SessionScript,
    log: Arc<Mutex<Vec<String>>>,
}

impl Shared {
    fn step(&self, op: &'static str, detail: String) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{op}:{detail}", self.id));

        if self.script.panic_on == Some(op) {
            panic!("scripted panic in {op}");
        }

        match self.script.fail_on {
            Some((fail_op, fragment)) if fail_op == op && detail.contains(fragment) => {
                Err(match op {
                    "launch" => BrowserError::Launch(format!("scripted failure: {detail}")),
                    "goto" => BrowserError::NavigationError(format!("scripted failure: {detail}")),
                    "text" => BrowserError::Timeout(format!("scripted failure: {detail}")),
                    "context" | "page" => {
                        BrowserError::ChromiumError(format!("scripted failure: {detail}"))
                    }
                    _ => BrowserError::SelectorNotFound(detail),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Automation for FakeAutomation {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>> {
        let id = self.counters.launches.fetch_add(1, Ordering::SeqCst) + 1;
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        let shared = Shared {
            id,
            script,
            log: self.log.clone(),
        };

        shared.step("launch", format!("headless={}", options.headless))?;

        let open = self.counters.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_open.fetch_max(open, Ordering::SeqCst);

        Ok(Box::new(FakeSession {
            shared,
            counters: self.counters.clone(),
            closed: false,
        }))
    }
}

struct FakeSession {
    shared: Shared,
    counters: Arc<Counters>,
    closed: bool,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn new_context<'a>(
        &'a self,
        identity: &Fingerprint,
    ) -> Result<Box<dyn BrowserContext + 'a>> {
        self.shared.step("context", identity.category.clone())?;
        Ok(Box::new(FakeContext {
            shared: self.shared.clone(),
        }))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.shared.step("close", String::new())?;
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        self.counters.open.fetch_sub(1, Ordering::SeqCst);
        if self.shared.script.close_fails {
            return Err(BrowserError::ChromiumError("scripted close failure".to_string()));
        }
        Ok(())
    }
}

struct FakeContext {
    shared: Shared,
}

#[async_trait]
impl BrowserContext for FakeContext {
    async fn new_page(&self) -> Result<Box<dyn BrowserActions>> {
        self.shared.step("page", String::new())?;
        Ok(Box::new(FakePage {
            shared: self.shared.clone(),
        }))
    }
}

struct FakePage {
    shared: Shared,
}

#[async_trait]
impl BrowserActions for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.shared.step("goto", url.to_string())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.shared.step("fill", format!("{selector}={value}"))
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        self.shared.step("select", format!("{selector}={value}"))
    }

    async fn click(&self, target: &str) -> Result<()> {
        self.shared.step("click", target.to_string())
    }

    async fn text_content(&self, selectors: &str, _timeout: Duration) -> Result<String> {
        self.shared.step("text", selectors.to_string())?;
        match &self.shared.script.confirmation {
            Some(text) => Ok(text.clone()),
            None => std::future::pending().await,
        }
    }
}

/// A valid record for `first last`.
pub fn record(first: &str, last: &str) -> AddressRecord {
    let row = RawRow::new([
        ("first_name", first),
        ("last_name", last),
        ("email", ""),
        ("street_address", "1 Elm"),
        ("city", "Metropolis"),
        ("state", "NY"),
        ("zip_code", "10001"),
    ]);
    validate_row(&row, 1).expect("valid row")
}
