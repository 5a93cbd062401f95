use crate::error::{BrowserError, Result};
use crate::fingerprint::Fingerprint;
use std::path::PathBuf;
use std::time::Duration;

/// Options for launching a fresh browser.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub navigation_timeout: Duration,
    pub executable: Option<PathBuf>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout: Duration::from_secs(30),
            executable: None,
        }
    }
}

/// Entry point of the automation capability: starts browsers.
#[async_trait::async_trait]
pub trait Automation: Send + Sync {
    /// Launch a new, isolated browser session
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>>;
}

/// A running browser. Must be closed explicitly.
#[async_trait::async_trait]
pub trait BrowserSession: Send + Sync {
    /// Open a browsing context presenting the given identity
    async fn new_context<'a>(&'a self, identity: &Fingerprint)
        -> Result<Box<dyn BrowserContext + 'a>>;

    /// Tear the browser down
    async fn close(&mut self) -> Result<()>;
}

/// An isolated browsing context inside a session.
#[async_trait::async_trait]
pub trait BrowserContext: Send + Sync {
    /// Open a new page in this context
    async fn new_page(&self) -> Result<Box<dyn BrowserActions>>;
}

/// Page-level actions for automation
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// Replace the value of a form field
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Select an option of a `<select>` element by value
    async fn select_option(&self, selector: &str, value: &str) -> Result<()>;

    /// Click an element, see [`ClickTarget`] for the accepted forms
    async fn click(&self, target: &str) -> Result<()>;

    /// Text of the first element matching the selector list, waiting at most `timeout`
    async fn text_content(&self, selectors: &str, timeout: Duration) -> Result<String>;
}

/// What a click refers to: `text=Place My Order` matches visible text,
/// anything else is a CSS selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    Css(String),
    Text(String),
}

impl ClickTarget {
    #[must_use]
    pub fn parse(target: &str) -> Self {
        match target.strip_prefix("text=") {
            Some(text) => {
                let text = text.trim();
                let unquoted = text
                    .strip_prefix('"')
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(text);
                Self::Text(unquoted.to_string())
            }
            None => Self::Css(target.to_string()),
        }
    }
}

/// Helper to extract domain from URL
pub fn extract_domain(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    url.host_str()
        .ok_or_else(|| BrowserError::NavigationError("No host in URL".to_string()))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://special.usps.com/testkits").unwrap(),
            "special.usps.com"
        );
        assert_eq!(
            extract_domain("http://localhost:8080/form").unwrap(),
            "localhost"
        );
    }

    #[test]
    fn test_extract_domain_invalid() {
        assert!(extract_domain("not-a-url").is_err());
    }

    #[test]
    fn test_click_target_parse() {
        assert_eq!(
            ClickTarget::parse("text=Check Out Now"),
            ClickTarget::Text("Check Out Now".to_string())
        );
        assert_eq!(
            ClickTarget::parse("text=\"Place My Order\""),
            ClickTarget::Text("Place My Order".to_string())
        );
        assert_eq!(
            ClickTarget::parse("#submit"),
            ClickTarget::Css("#submit".to_string())
        );
    }
}
