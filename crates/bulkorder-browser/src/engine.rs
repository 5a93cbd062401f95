use crate::actions::{
    extract_domain, Automation, BrowserActions, BrowserContext, BrowserSession, ClickTarget,
    LaunchOptions,
};
use crate::error::{BrowserError, Result};
use crate::fingerprint::Fingerprint;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetDeviceMetricsOverrideParams, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::target::{CreateBrowserContextParams, CreateTargetParams};
use chromiumoxide::Page;
use futures::stream::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Interval between two probes while waiting for an element's text
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Chromium-backed automation capability
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromiumAutomation;

impl ChromiumAutomation {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Automation for ChromiumAutomation {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(options.window_width, options.window_height)
            .request_timeout(options.navigation_timeout);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Spawn browser handler
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("browser handler event error: {e}");
                }
            }
        });

        tracing::debug!(headless = options.headless, "browser launched");

        Ok(Box::new(ChromiumSession {
            browser: Some(browser),
            handler_task,
            navigation_timeout: options.navigation_timeout,
        }))
    }
}

/// One launched Chromium process
struct ChromiumSession {
    browser: Option<Browser>,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
}

#[async_trait::async_trait]
impl BrowserSession for ChromiumSession {
    async fn new_context<'a>(
        &'a self,
        identity: &Fingerprint,
    ) -> Result<Box<dyn BrowserContext + 'a>> {
        let browser = self.browser.as_ref().ok_or(BrowserError::Closed)?;
        let context_id = browser
            .execute(CreateBrowserContextParams::default())
            .await?
            .result
            .browser_context_id;

        Ok(Box::new(ChromiumContext {
            browser,
            context_id,
            identity: identity.clone(),
            navigation_timeout: self.navigation_timeout,
        }))
    }

    async fn close(&mut self) -> Result<()> {
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        let closed = browser.close().await;
        if let Err(e) = browser.wait().await {
            tracing::warn!("waiting for browser exit failed: {e}");
        }
        self.handler_task.abort();
        closed?;

        tracing::debug!("browser closed");
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if self.browser.is_some() {
            tracing::warn!("browser session dropped without close");
        }
        self.handler_task.abort();
    }
}

struct ChromiumContext<'a> {
    browser: &'a Browser,
    context_id: BrowserContextId,
    identity: Fingerprint,
    navigation_timeout: Duration,
}

#[async_trait::async_trait]
impl BrowserContext for ChromiumContext<'_> {
    async fn new_page(&self) -> Result<Box<dyn BrowserActions>> {
        let mut params = CreateTargetParams::new("about:blank");
        params.browser_context_id = Some(self.context_id.clone());
        let page = self.browser.new_page(params).await?;

        page.execute(SetUserAgentOverrideParams::new(
            self.identity.user_agent.clone(),
        ))
        .await?;
        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(self.identity.viewport_width),
            i64::from(self.identity.viewport_height),
            1.0,
            false,
        ))
        .await?;

        Ok(Box::new(ChromiumPage {
            page,
            navigation_timeout: self.navigation_timeout,
        }))
    }
}

struct ChromiumPage {
    page: Page,
    navigation_timeout: Duration,
}

impl ChromiumPage {
    /// Run `body` against the element matched by `selector`; `el` is bound in
    /// the body. Returns false when nothing matched.
    async fn with_element(&self, selector: &str, body: &str) -> Result<bool> {
        let script = format!(
            "(() => {{ const el = document.querySelector({}); if (!el) return false; {body} }})()",
            js_string(selector)
        );
        self.eval::<bool>(script).await
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> Result<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))?
            .into_value::<T>()
            .map_err(|e| BrowserError::Script(e.to_string()))
    }
}

#[async_trait::async_trait]
impl BrowserActions for ChromiumPage {
    async fn goto(&self, url: &str) -> Result<()> {
        let domain = extract_domain(url)?;
        tracing::debug!(%domain, "navigating");

        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| {
                BrowserError::Timeout(format!(
                    "navigation to {url} exceeded {:?}",
                    self.navigation_timeout
                ))
            })?
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        // Native setter so framework-managed inputs notice the change
        let body = format!(
            "el.focus(); \
             const setter = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value'); \
             if (setter && setter.set) {{ setter.set.call(el, {value}); }} else {{ el.value = {value}; }} \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true;",
            value = js_string(value)
        );
        if self.with_element(selector, &body).await? {
            Ok(())
        } else {
            Err(BrowserError::SelectorNotFound(selector.to_string()))
        }
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        let body = format!(
            "const v = {value}; \
             if (!Array.from(el.options || []).some(o => o.value === v)) return false; \
             el.value = v; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true;",
            value = js_string(value)
        );
        if self.with_element(selector, &body).await? {
            Ok(())
        } else {
            Err(BrowserError::SelectorNotFound(format!(
                "{selector} (option '{value}')"
            )))
        }
    }

    async fn click(&self, target: &str) -> Result<()> {
        match ClickTarget::parse(target) {
            ClickTarget::Css(selector) => {
                let element = self
                    .page
                    .find_element(selector.as_str())
                    .await
                    .map_err(|_| BrowserError::SelectorNotFound(selector.clone()))?;
                element.click().await?;
            }
            ClickTarget::Text(text) => {
                let script = format!(
                    "(() => {{ const t = {}; \
                     const el = Array.from(document.querySelectorAll('button, a, input[type=submit], [role=button], span, div')) \
                       .find(e => (e.innerText || e.value || '').trim() === t); \
                     if (!el) return false; el.click(); return true; }})()",
                    js_string(&text)
                );
                if !self.eval::<bool>(script).await? {
                    return Err(BrowserError::SelectorNotFound(format!("text={text}")));
                }
            }
        }
        Ok(())
    }

    async fn text_content(&self, selectors: &str, timeout: Duration) -> Result<String> {
        let script = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.textContent : null; }})()",
            js_string(selectors)
        );

        let probe = async {
            loop {
                // Evaluation fails while a navigation is in flight, keep polling
                if let Ok(Some(text)) = self.eval::<Option<String>>(script.clone()).await {
                    return text;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, probe).await.map_err(|_| {
            BrowserError::Timeout(format!("waiting for '{selectors}' exceeded {timeout:?}"))
        })
    }
}

/// Quote a Rust string as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
