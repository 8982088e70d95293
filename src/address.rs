//! Address-bar input resolution.
//!
//! Turns whatever the user typed into the address bar into a navigable URL:
//!
//! - Input already carrying a scheme is passed through unchanged.
//! - Bare domain-ish input (`example.com`) gets an `https://` prefix.
//! - Everything else becomes a privacy-default search query.

// ============================================================================
// Imports
// ============================================================================

use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Search endpoint for non-URL input.
const SEARCH_URL: &str = "https://duckduckgo.com/?q=";

// ============================================================================
// Resolution
// ============================================================================

/// Resolves address-bar input into a navigable URL.
///
/// # Example
///
/// ```
/// use loknet_shell::address::resolve;
///
/// assert_eq!(resolve("https://example.com"), "https://example.com");
/// assert_eq!(resolve("example.com"), "https://example.com");
/// assert_eq!(resolve("rust async"), "https://duckduckgo.com/?q=rust%20async");
/// ```
#[must_use]
pub fn resolve(input: &str) -> String {
    let input = input.trim();

    if input.starts_with("http") || input.contains("://") {
        return input.to_string();
    }

    if input.contains('.') && !input.contains(' ') {
        return format!("https://{input}");
    }

    format!("{SEARCH_URL}{}", urlencoding::encode(input))
}

/// Extracts the host (including port, if any) from a URL.
///
/// Returns `None` for unparseable URLs and URLs without a host
/// (`about:blank`, `data:` URIs).
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{host}:{port}")),
        None => Some(host.to_string()),
    }
}

/// Checks whether a URL is eligible for bookmarking.
///
/// Internal pages (welcome page, `about:blank`) and non-http(s) schemes
/// are not bookmarkable.
#[must_use]
pub fn is_bookmarkable(url: &str) -> bool {
    matches!(
        Url::parse(url).map(|u| u.scheme().to_string()),
        Ok(scheme) if scheme == "http" || scheme == "https"
    )
}

// ============================================================================
// Tests
// ============================================================================
