//! The [`Shell`] facade tying views, permissions, and the store together.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::address;
use crate::engine::EngineEvent;
use crate::error::Result;
use crate::permissions::{PermissionBroker, PermissionKind, PermissionStatus, PromptResponse};
use crate::privacy::RequestFilter;
use crate::shell::ViewManager;
use crate::store::{HistoryEntry, Store};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the shell.
pub(crate) struct ShellInner {
    /// Persisted store shared with the manager and broker.
    pub(crate) store: Arc<Mutex<Store>>,
    /// Permission broker.
    pub(crate) broker: PermissionBroker,
    /// View controller.
    pub(crate) manager: ViewManager,
    /// Tracker request filter.
    pub(crate) filter: RequestFilter,
}

// ============================================================================
// Shell
// ============================================================================

/// Top-level handle over a running browser shell.
///
/// The shell is cheap to clone; clones share the same views, broker, and
/// store. The embedding host drives it from its command surface and reads
/// the event receiver returned by
/// [`ShellBuilder::build`](crate::shell::ShellBuilder::build) to keep the
/// overlay UI in sync.
#[derive(Clone)]
pub struct Shell {
    /// Shared inner state.
    inner: Arc<ShellInner>,
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("views", &self.inner.manager)
            .finish_non_exhaustive()
    }
}

impl Shell {
    /// Creates a shell over pre-wired components.
    pub(crate) fn from_inner(inner: ShellInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

// ============================================================================
// Shell - Components
// ============================================================================

impl Shell {
    /// Returns the view controller.
    #[inline]
    #[must_use]
    pub fn views(&self) -> &ViewManager {
        &self.inner.manager
    }

    /// Returns the permission broker.
    #[inline]
    #[must_use]
    pub fn permissions(&self) -> &PermissionBroker {
        &self.inner.broker
    }

    /// Returns the tracker request filter.
    #[inline]
    #[must_use]
    pub fn request_filter(&self) -> &RequestFilter {
        &self.inner.filter
    }
}

// ============================================================================
// Shell - Navigation
// ============================================================================

impl Shell {
    /// Resolves address-bar input and loads it in the active view.
    ///
    /// Scheme-qualified input passes through, bare domains get `https://`,
    /// anything else becomes a search query. See [`address::resolve`].
    pub async fn navigate(&self, input: &str) -> Result<()> {
        let url = address::resolve(input);
        debug!(input, url = %url, "Address resolved");
        self.inner.manager.load(&url).await
    }

    /// Routes an engine event through the view controller.
    pub fn handle_engine_event(&self, event: EngineEvent) -> Result<()> {
        self.inner.manager.handle_event(event)
    }
}

// ============================================================================
// Shell - Bookmarks and History
// ============================================================================

impl Shell {
    /// Bookmarks the active view's current page.
    pub fn bookmark_current(&self) -> Result<()> {
        self.inner.manager.bookmark_current()
    }

    /// Returns all bookmarks as `(url, title)` pairs.
    #[must_use]
    pub fn bookmarks(&self) -> Vec<(String, String)> {
        self.inner.store.lock().bookmarks()
    }

    /// Returns whether a URL is bookmarked.
    #[must_use]
    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.inner.store.lock().is_bookmarked(url)
    }

    /// Removes a bookmark by URL.
    pub fn remove_bookmark(&self, url: &str) -> Result<()> {
        self.inner.store.lock().remove_bookmark(url)
    }

    /// Returns the most recent history entries, newest first.
    #[must_use]
    pub fn recent_history(&self) -> Vec<HistoryEntry> {
        self.inner.store.lock().recent_history()
    }

    /// Removes a single history entry by URL and timestamp.
    pub fn remove_history(&self, url: &str, timestamp: u64) -> Result<()> {
        self.inner.store.lock().remove_history(url, timestamp)
    }

    /// Clears all browsing history.
    pub fn clear_history(&self) -> Result<()> {
        self.inner.store.lock().clear_history()
    }
}

// ============================================================================
// Shell - Site Permissions
// ============================================================================

impl Shell {
    /// Answers a pending permission prompt from the overlay UI.
    pub fn respond_permission(&self, response: &PromptResponse) -> Result<()> {
        self.inner.broker.respond(response)
    }

    /// Returns the persisted permission decisions for a host.
    #[must_use]
    pub fn site_permissions(&self, host: &str) -> Vec<(PermissionKind, PermissionStatus)> {
        self.inner.store.lock().permissions_for_host(host)
    }

    /// Forgets all persisted and session permission decisions for a host.
    ///
    /// The next request from that host prompts again.
    pub fn reset_site_permissions(&self, host: &str) -> Result<()> {
        self.inner.broker.forget_host(host)
    }
}
