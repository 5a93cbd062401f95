use crate::error::{BrowserError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Outbound identity presented by a browsing context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub user_agent: String,
    pub category: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

/// A user agent string tagged with the category it belongs to.
#[derive(Debug, Clone)]
struct PoolEntry {
    category: &'static str,
    user_agent: &'static str,
}

/// Pool of user agents the random identity is drawn from.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    entries: Vec<PoolEntry>,
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "Browsers - Mac",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Browsers - Mac",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    ),
    (
        "Browsers - Mac",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.2; rv:121.0) Gecko/20100101 Firefox/121.0",
    ),
    (
        "Browsers - Windows",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Browsers - Windows",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
    ),
    (
        "Browsers - Windows",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    ),
    (
        "Browsers - Linux",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Browsers - Mobile",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
    ),
];

// Common desktop viewport sizes
const VIEWPORTS: &[(u32, u32)] = &[(1920, 1080), (1366, 768), (1536, 864), (1440, 900)];

impl IdentityPool {
    /// Pool with the built-in desktop and mobile user agents
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|&(category, user_agent)| PoolEntry {
                    category,
                    user_agent,
                })
                .collect(),
        }
    }

    /// Draw a random identity restricted to the given categories
    pub fn random(&self, categories: &[String]) -> Result<Fingerprint> {
        self.random_with(&mut rand::thread_rng(), categories)
    }

    pub fn random_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        categories: &[String],
    ) -> Result<Fingerprint> {
        let allowed: Vec<&PoolEntry> = self
            .entries
            .iter()
            .filter(|entry| categories.iter().any(|c| c == entry.category))
            .collect();

        let entry = allowed
            .choose(rng)
            .ok_or_else(|| BrowserError::NoIdentity(categories.join(", ")))?;
        let &(width, height) = VIEWPORTS.choose(rng).unwrap_or(&(1920, 1080));

        Ok(Fingerprint {
            user_agent: entry.user_agent.to_string(),
            category: entry.category.to_string(),
            viewport_width: width,
            viewport_height: height,
        })
    }
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self::builtin()
    }
}
