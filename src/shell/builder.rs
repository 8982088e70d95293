//! Builder for wiring up a [`Shell`].

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

use crate::engine::{Bounds, Engine};
use crate::error::{Error, Result};
use crate::events::ShellEvent;
use crate::permissions::PermissionBroker;
use crate::privacy::RequestFilter;
use crate::shell::core::{Shell, ShellInner};
use crate::shell::ViewManager;
use crate::store::Store;

// ============================================================================
// Constants
// ============================================================================

/// Default URL loaded into tabs created without an explicit URL.
const DEFAULT_WELCOME_URL: &str = "about:blank";

/// Default content bounds: a 1200x800 window minus the 90px chrome strip.
const DEFAULT_BOUNDS: Bounds = Bounds {
    x: 0,
    y: 90,
    width: 1200,
    height: 710,
};

// ============================================================================
// ShellBuilder
// ============================================================================

/// Configures and assembles a [`Shell`].
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use loknet_shell::engine::Engine;
/// # async fn demo(engine: Arc<dyn Engine>) -> loknet_shell::error::Result<()> {
/// use loknet_shell::shell::ShellBuilder;
///
/// let (shell, mut events) = ShellBuilder::new()
///     .data_path("loknet-data.json")
///     .welcome_url("https://start.duckduckgo.com/")
///     .build(engine)?;
///
/// shell.views().create_view(None).await?;
/// while let Some(event) = events.recv().await {
///     // forward to the overlay UI
///     let _ = event;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ShellBuilder {
    /// Location of the persisted data file.
    data_path: Option<PathBuf>,
    /// Welcome page override.
    welcome_url: Option<String>,
    /// Content bounds override.
    bounds: Option<Bounds>,
    /// Extra tracker domains on top of the default blocklist.
    blocked_domains: Vec<String>,
}

impl ShellBuilder {
    /// Creates a builder with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where the persisted data file (bookmarks, history, site
    /// permissions) lives. Required.
    #[must_use]
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Sets the page loaded into tabs created without an explicit URL.
    ///
    /// Defaults to `about:blank`.
    #[must_use]
    pub fn welcome_url(mut self, url: impl Into<String>) -> Self {
        self.welcome_url = Some(url.into());
        self
    }

    /// Sets the initial content bounds inside the host window.
    #[must_use]
    pub fn content_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Adds a tracker domain to the request blocklist.
    #[must_use]
    pub fn block_domain(mut self, domain: impl Into<String>) -> Self {
        self.blocked_domains.push(domain.into());
        self
    }

    /// Assembles the shell over the given engine.
    ///
    /// Returns the shell handle and the event receiver the host forwards
    /// to its overlay UI. The shell starts with no views; create the
    /// first tab with [`ViewManager::create_view`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no data path was set, or a store
    /// error if the persisted file cannot be opened.
    pub fn build(
        self,
        engine: Arc<dyn Engine>,
    ) -> Result<(Shell, UnboundedReceiver<ShellEvent>)> {
        let data_path = self
            .data_path
            .ok_or_else(|| Error::config("data path is required"))?;

        let store = Arc::new(Mutex::new(Store::open(&data_path)?));
        let (events, receiver) = mpsc::unbounded_channel();

        let broker = PermissionBroker::new(Arc::clone(&store), events.clone());
        let manager = ViewManager::new(
            engine,
            Arc::clone(&store),
            events,
            self.welcome_url
                .unwrap_or_else(|| DEFAULT_WELCOME_URL.to_string()),
            self.bounds.unwrap_or(DEFAULT_BOUNDS),
        );

        let mut filter = RequestFilter::new();
        for domain in self.blocked_domains {
            filter.block_domain(domain);
        }

        info!(data_path = %data_path.display(), "Shell assembled");
        Ok((
            Shell::from_inner(ShellInner {
                store,
                broker,
                manager,
                filter,
            }),
            receiver,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
