//! Error types for the browser shell.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use loknet_shell::{Result, Shell};
//!
//! async fn example(shell: &Shell) -> Result<()> {
//!     let id = shell.views().create_view(None).await?;
//!     shell.views().switch_to(id).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Engine | [`Error::Engine`] |
//! | Views | [`Error::ViewNotFound`], [`Error::NoActiveView`], [`Error::PageNotBookmarkable`] |
//! | Permissions | [`Error::UnknownPermission`], [`Error::PromptNotFound`], [`Error::PromptAbandoned`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Url`], [`Error::ChannelClosed`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

use crate::identifiers::{PromptId, ViewId};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when shell configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Engine Errors
    // ========================================================================
    /// Engine operation failed.
    ///
    /// Returned when the embedded engine rejects a surface operation.
    #[error("Engine error: {message}")]
    Engine {
        /// Description of the engine failure.
        message: String,
    },

    // ========================================================================
    // View Errors
    // ========================================================================
    /// View not found.
    ///
    /// Returned when a view ID does not exist in the manager.
    #[error("View not found: {view_id}")]
    ViewNotFound {
        /// The missing view ID.
        view_id: ViewId,
    },

    /// No active view.
    ///
    /// Returned when an operation requires an active view and none is set.
    #[error("No active view")]
    NoActiveView,

    /// Page cannot be bookmarked.
    ///
    /// Returned for internal pages (welcome page, about:blank) and other
    /// non-http(s) URLs.
    #[error("Page cannot be bookmarked: {url}")]
    PageNotBookmarkable {
        /// The rejected URL.
        url: String,
    },

    // ========================================================================
    // Permission Errors
    // ========================================================================
    /// Unknown permission name reported by the engine.
    ///
    /// Unknown permissions are never prompted; callers treat this as deny.
    #[error("Unknown permission: {name}")]
    UnknownPermission {
        /// The unrecognized permission name.
        name: String,
    },

    /// Permission prompt not found.
    ///
    /// Returned when a response references a prompt ID that is not pending.
    #[error("Prompt not found: {prompt_id}")]
    PromptNotFound {
        /// The missing prompt ID.
        prompt_id: PromptId,
    },

    /// Permission prompt abandoned before a decision arrived.
    ///
    /// Returned to waiters when the broker shuts down with the prompt
    /// still pending.
    #[error("Prompt abandoned")]
    PromptAbandoned,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an engine error.
    #[inline]
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    /// Creates a view not found error.
    #[inline]
    pub fn view_not_found(view_id: ViewId) -> Self {
        Self::ViewNotFound { view_id }
    }

    /// Creates a page not bookmarkable error.
    #[inline]
    pub fn page_not_bookmarkable(url: impl Into<String>) -> Self {
        Self::PageNotBookmarkable { url: url.into() }
    }

    /// Creates an unknown permission error.
    #[inline]
    pub fn unknown_permission(name: impl Into<String>) -> Self {
        Self::UnknownPermission { name: name.into() }
    }

    /// Creates a prompt not found error.
    #[inline]
    pub fn prompt_not_found(prompt_id: PromptId) -> Self {
        Self::PromptNotFound { prompt_id }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a view lookup error.
    #[inline]
    #[must_use]
    pub fn is_view_error(&self) -> bool {
        matches!(self, Self::ViewNotFound { .. } | Self::NoActiveView)
    }

    /// Returns `true` if this is a permission-prompt error.
    #[inline]
    #[must_use]
    pub fn is_prompt_error(&self) -> bool {
        matches!(
            self,
            Self::PromptNotFound { .. } | Self::PromptAbandoned | Self::UnknownPermission { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
