//! Tracker request filtering.
//!
//! A small privacy shield: the embedding host consults [`RequestFilter`]
//! from the engine's request hook and cancels matching requests before
//! they leave the machine.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashSet;
use tracing::trace;
use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Tracker domains blocked out of the box.
const DEFAULT_BLOCKLIST: &[&str] = &["google-analytics.com", "doubleclick.net"];

// ============================================================================
// RequestFilter
// ============================================================================

/// Host-based tracker blocklist.
///
/// Matching is by host suffix, so `www.google-analytics.com` is caught by
/// the `google-analytics.com` entry.
#[derive(Debug, Clone)]
pub struct RequestFilter {
    /// Blocked domains (apex form, no leading dot).
    blocked: FxHashSet<String>,
}

impl Default for RequestFilter {
    fn default() -> Self {
        let mut blocked = FxHashSet::default();
        for domain in DEFAULT_BLOCKLIST {
            blocked.insert((*domain).to_string());
        }
        Self { blocked }
    }
}

impl RequestFilter {
    /// Creates a filter with only the default blocklist.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a domain to the blocklist.
    ///
    /// The domain should be in apex form (`tracker.example`); subdomains
    /// are matched automatically.
    pub fn block_domain(&mut self, domain: impl Into<String>) {
        self.blocked.insert(domain.into());
    }

    /// Returns the number of blocked domains.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Returns `true` if the blocklist is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Checks whether a request URL should be blocked.
    ///
    /// Unparseable URLs and URLs without a host are allowed through;
    /// blocking is only meaningful for network requests.
    #[must_use]
    pub fn should_block(&self, url: &str) -> bool {
        let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) else {
            return false;
        };

        let blocked = self
            .blocked
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")));

        if blocked {
            trace!(url, host, "Blocked tracker request");
        }
        blocked
    }
}

// ============================================================================
// Tests
// ============================================================================
