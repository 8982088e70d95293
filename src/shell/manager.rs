//! View lifecycle and command multiplexing.
//!
//! [`ViewManager`] owns the keyed collection of content surfaces, tracks
//! which one is active, routes navigation commands onto the correct
//! surface, and mirrors engine events back to the overlay UI.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::address;
use crate::engine::{Bounds, Engine, EngineEvent, EngineSurface, SurfaceOptions};
use crate::error::{Error, Result};
use crate::events::{ShellEvent, TabSnapshot};
use crate::identifiers::ViewId;
use crate::store::Store;

// ============================================================================
// Types
// ============================================================================

/// Per-view bookkeeping alongside the engine surface.
struct ViewEntry {
    /// Engine-side surface handle.
    surface: Arc<dyn EngineSurface>,
    /// Last committed URL.
    url: String,
    /// Last reported title.
    title: String,
    /// Last reported favicon URL.
    favicon: Option<String>,
}

/// View collection state, guarded as one unit.
#[derive(Default)]
struct ViewState {
    /// All views by ID.
    views: FxHashMap<ViewId, ViewEntry>,
    /// View IDs in creation order (neighbor selection on close).
    order: Vec<ViewId>,
    /// Currently active view.
    active: Option<ViewId>,
}

/// Internal shared state for the manager.
struct ManagerInner {
    /// Surface factory.
    engine: Arc<dyn Engine>,
    /// View collection.
    state: Mutex<ViewState>,
    /// Next view ID to allocate.
    next_id: AtomicU32,
    /// Content bounds inside the host window.
    bounds: Mutex<Bounds>,
    /// Shared persisted store (history recording).
    store: Arc<Mutex<Store>>,
    /// Channel to the overlay UI.
    events: mpsc::UnboundedSender<ShellEvent>,
    /// URL loaded into tabs created without an explicit URL.
    welcome_url: String,
}

// ============================================================================
// ViewManager
// ============================================================================

/// Controller for the set of content surfaces.
#[derive(Clone)]
pub struct ViewManager {
    /// Shared inner state.
    inner: Arc<ManagerInner>,
}

impl fmt::Debug for ViewManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ViewManager")
            .field("view_count", &state.views.len())
            .field("active", &state.active)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ViewManager - Constructor
// ============================================================================

impl ViewManager {
    /// Creates a manager over the given engine and store.
    pub(crate) fn new(
        engine: Arc<dyn Engine>,
        store: Arc<Mutex<Store>>,
        events: mpsc::UnboundedSender<ShellEvent>,
        welcome_url: impl Into<String>,
        bounds: Bounds,
    ) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                engine,
                state: Mutex::new(ViewState::default()),
                next_id: AtomicU32::new(1),
                bounds: Mutex::new(bounds),
                store,
                events,
                welcome_url: welcome_url.into(),
            }),
        }
    }
}

// ============================================================================
// ViewManager - Accessors
// ============================================================================

impl ViewManager {
    /// Returns the active view ID, if any.
    #[inline]
    #[must_use]
    pub fn active_view(&self) -> Option<ViewId> {
        self.inner.state.lock().active
    }

    /// Returns the number of open views.
    #[inline]
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.inner.state.lock().views.len()
    }

    /// Returns UI snapshots of all views in creation order.
    #[must_use]
    pub fn tabs(&self) -> Vec<TabSnapshot> {
        let state = self.inner.state.lock();
        state
            .order
            .iter()
            .filter_map(|id| {
                state.views.get(id).map(|entry| TabSnapshot {
                    id: *id,
                    url: entry.url.clone(),
                    title: entry.title.clone(),
                    favicon: entry.favicon.clone(),
                    active: state.active == Some(*id),
                })
            })
            .collect()
    }

    /// Returns the active surface handle, if any.
    fn active_surface(&self) -> Option<Arc<dyn EngineSurface>> {
        let state = self.inner.state.lock();
        let active = state.active?;
        state.views.get(&active).map(|e| Arc::clone(&e.surface))
    }

    /// Returns a surface handle by view ID.
    fn surface_of(&self, id: ViewId) -> Result<Arc<dyn EngineSurface>> {
        self.inner
            .state
            .lock()
            .views
            .get(&id)
            .map(|e| Arc::clone(&e.surface))
            .ok_or_else(|| Error::view_not_found(id))
    }
}

// ============================================================================
// ViewManager - Lifecycle
// ============================================================================

impl ViewManager {
    /// Creates a new view and makes it active.
    ///
    /// Without an explicit URL the configured welcome page is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot create the surface or the
    /// initial load fails.
    pub async fn create_view(&self, url: Option<&str>) -> Result<ViewId> {
        let target = url.unwrap_or(&self.inner.welcome_url).to_string();

        let raw = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let id = ViewId::new(raw).ok_or_else(|| Error::config("view id space exhausted"))?;

        let options = SurfaceOptions::new(*self.inner.bounds.lock());
        let surface = self.inner.engine.create_surface(id, options).await?;
        surface.load_url(&target).await?;

        {
            let mut state = self.inner.state.lock();
            state.views.insert(
                id,
                ViewEntry {
                    surface,
                    url: target.clone(),
                    title: String::new(),
                    favicon: None,
                },
            );
            state.order.push(id);
        }

        debug!(view_id = %id, url = %target, "View created");
        self.switch_to(id).await?;
        self.emit_tabs_changed();

        Ok(id)
    }

    /// Makes a view active, hiding the previously active surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewNotFound`] for unknown IDs.
    pub async fn switch_to(&self, id: ViewId) -> Result<()> {
        let (target, previous) = {
            let mut state = self.inner.state.lock();
            let target = state
                .views
                .get(&id)
                .map(|e| Arc::clone(&e.surface))
                .ok_or_else(|| Error::view_not_found(id))?;

            let previous = state
                .active
                .filter(|prev| *prev != id)
                .and_then(|prev| state.views.get(&prev).map(|e| Arc::clone(&e.surface)));

            state.active = Some(id);
            (target, previous)
        };

        if let Some(previous) = previous
            && let Err(e) = previous.set_visible(false).await
        {
            debug!(error = %e, "Failed to hide previous surface");
        }

        let bounds = *self.inner.bounds.lock();
        target.set_bounds(bounds).await?;
        target.set_visible(true).await?;

        debug!(view_id = %id, "View activated");
        self.emit(ShellEvent::ActiveTabChanged { view_id: Some(id) });
        Ok(())
    }

    /// Closes a view.
    ///
    /// If the closed view was active, its neighbor (previous in creation
    /// order, else next) becomes active; closing the last view opens a
    /// fresh blank view so the shell is never empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewNotFound`] for unknown IDs.
    pub async fn close_view(&self, id: ViewId) -> Result<()> {
        let (surface, neighbor, was_active) = {
            let mut state = self.inner.state.lock();
            let Some(entry) = state.views.remove(&id) else {
                return Err(Error::view_not_found(id));
            };

            let was_active = state.active == Some(id);
            let neighbor = was_active.then(|| neighbor_of(&state.order, id)).flatten();
            state.order.retain(|v| *v != id);
            if was_active {
                state.active = None;
            }

            (entry.surface, neighbor, was_active)
        };

        if let Err(e) = surface.close().await {
            warn!(view_id = %id, error = %e, "Failed to close surface");
        }
        info!(view_id = %id, "View closed");

        if was_active {
            match neighbor {
                Some(next) => self.switch_to(next).await?,
                None => {
                    self.emit(ShellEvent::ActiveTabChanged { view_id: None });
                    self.create_view(Some("about:blank")).await?;
                }
            }
        }

        self.emit_tabs_changed();
        Ok(())
    }
}

// ============================================================================
// ViewManager - Navigation
// ============================================================================

impl ViewManager {
    /// Navigates the active view back. No-op without an active view.
    pub async fn back(&self) -> Result<()> {
        match self.active_surface() {
            Some(surface) => surface.go_back().await,
            None => {
                debug!("back ignored: no active view");
                Ok(())
            }
        }
    }

    /// Navigates the active view forward. No-op without an active view.
    pub async fn forward(&self) -> Result<()> {
        match self.active_surface() {
            Some(surface) => surface.go_forward().await,
            None => {
                debug!("forward ignored: no active view");
                Ok(())
            }
        }
    }

    /// Reloads the active view. No-op without an active view.
    pub async fn reload(&self) -> Result<()> {
        match self.active_surface() {
            Some(surface) => surface.reload().await,
            None => {
                debug!("reload ignored: no active view");
                Ok(())
            }
        }
    }

    /// Loads a URL in the active view. No-op without an active view.
    pub async fn load(&self, url: &str) -> Result<()> {
        match self.active_surface() {
            Some(surface) => surface.load_url(url).await,
            None => {
                debug!(url, "load ignored: no active view");
                Ok(())
            }
        }
    }
}

// ============================================================================
// ViewManager - Window Integration
// ============================================================================

impl ViewManager {
    /// Updates the content bounds and resizes the active surface.
    ///
    /// Called by the host on window resize/maximize/fullscreen changes.
    pub async fn update_bounds(&self, width: u32, height: u32) -> Result<()> {
        let bounds = {
            let mut guard = self.inner.bounds.lock();
            *guard = guard.resized(width, height);
            *guard
        };

        if let Some(surface) = self.active_surface() {
            surface.set_bounds(bounds).await?;
        }
        Ok(())
    }

    /// Hides the active surface (an overlay modal is opening).
    pub async fn hide_active(&self) -> Result<()> {
        if let Some(surface) = self.active_surface() {
            surface.set_visible(false).await?;
        }
        Ok(())
    }

    /// Shows the active surface again (the overlay modal closed).
    pub async fn show_active(&self) -> Result<()> {
        if let Some(surface) = self.active_surface() {
            surface.set_visible(true).await?;
        }
        Ok(())
    }
}

// ============================================================================
// ViewManager - Bookmarks
// ============================================================================

impl ViewManager {
    /// Bookmarks the active view's current page.
    ///
    /// # Errors
    ///
    /// - [`Error::NoActiveView`] without an active view
    /// - [`Error::PageNotBookmarkable`] for internal/non-http(s) pages
    /// - a store error if the bookmark cannot be saved
    pub fn bookmark_current(&self) -> Result<()> {
        let (url, title) = {
            let state = self.inner.state.lock();
            let active = state.active.ok_or(Error::NoActiveView)?;
            let entry = state
                .views
                .get(&active)
                .ok_or_else(|| Error::view_not_found(active))?;
            (entry.url.clone(), entry.title.clone())
        };

        if !address::is_bookmarkable(&url) {
            return Err(Error::page_not_bookmarkable(url));
        }

        self.inner.store.lock().add_bookmark(&url, title)?;
        info!(url = %url, "Bookmark saved");
        Ok(())
    }
}

// ============================================================================
// ViewManager - Engine Events
// ============================================================================

impl ViewManager {
    /// Routes an engine event: records history, updates cached tab
    /// metadata, and mirrors the change to the overlay UI.
    ///
    /// Events for views that no longer exist are dropped; the engine may
    /// still flush events for a surface the user just closed.
    ///
    /// # Errors
    ///
    /// Returns an error if history recording fails to save.
    pub fn handle_event(&self, event: EngineEvent) -> Result<()> {
        let id = event.view_id();

        match event {
            EngineEvent::Navigated { url, title, .. } => {
                let (known, is_active, surface) = {
                    let mut guard = self.inner.state.lock();
                    let state = &mut *guard;
                    match state.views.get_mut(&id) {
                        Some(entry) => {
                            entry.url = url.clone();
                            let surface = Arc::clone(&entry.surface);
                            (true, state.active == Some(id), Some(surface))
                        }
                        None => (false, false, None),
                    }
                };

                if !known {
                    debug!(view_id = %id, "Navigation event for unknown view");
                    return Ok(());
                }

                self.inner.store.lock().add_history(&url, title)?;

                if is_active
                    && let Some(surface) = surface
                {
                    self.emit(ShellEvent::NavigationChanged {
                        view_id: id,
                        url,
                        can_go_back: surface.can_go_back(),
                        can_go_forward: surface.can_go_forward(),
                    });
                }
            }

            EngineEvent::TitleChanged { title, .. } => {
                let favicon = {
                    let mut state = self.inner.state.lock();
                    match state.views.get_mut(&id) {
                        Some(entry) => {
                            entry.title = title.clone();
                            entry.favicon.clone()
                        }
                        None => return Ok(()),
                    }
                };
                self.emit(ShellEvent::TabUpdated {
                    view_id: id,
                    title,
                    favicon,
                });
            }

            EngineEvent::FaviconChanged { url, .. } => {
                let title = {
                    let mut state = self.inner.state.lock();
                    match state.views.get_mut(&id) {
                        Some(entry) => {
                            entry.favicon = Some(url.clone());
                            entry.title.clone()
                        }
                        None => return Ok(()),
                    }
                };
                self.emit(ShellEvent::TabUpdated {
                    view_id: id,
                    title,
                    favicon: Some(url),
                });
            }

            EngineEvent::LoadFailed { url, error, .. } => {
                warn!(view_id = %id, url = %url, error = %error, "Page load failed");
                self.emit(ShellEvent::LoadFailed {
                    view_id: id,
                    url,
                    error,
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// ViewManager - Internal
// ============================================================================

impl ViewManager {
    /// Sends an event to the overlay UI, ignoring a closed channel.
    fn emit(&self, event: ShellEvent) {
        let _ = self.inner.events.send(event);
    }

    /// Emits the current tab list.
    fn emit_tabs_changed(&self) {
        let tabs = self.tabs();
        self.emit(ShellEvent::TabsChanged { tabs });
    }
}

/// Neighbor selection for closing: previous in creation order, else next.
fn neighbor_of(order: &[ViewId], id: ViewId) -> Option<ViewId> {
    let idx = order.iter().position(|v| *v == id)?;
    if idx > 0 {
        Some(order[idx - 1])
    } else {
        order.get(idx + 1).copied()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use tempfile::TempDir;
    use tokio::sync::mpsc::UnboundedReceiver;

    // ------------------------------------------------------------------
    // Stub engine
    // ------------------------------------------------------------------

    #[derive(Default)]
    struct StubState {
        url: String,
        visible: bool,
        bounds: Option<Bounds>,
        closed: bool,
        ops: Vec<String>,
    }

    struct StubSurface {
        state: Mutex<StubState>,
        can_go_back: bool,
    }

    impl StubSurface {
        fn new() -> Self {
            Self {
                state: Mutex::new(StubState::default()),
                can_go_back: false,
            }
        }

        fn ops(&self) -> Vec<String> {
            self.state.lock().ops.clone()
        }
    }

    #[async_trait]
    impl EngineSurface for StubSurface {
        async fn load_url(&self, url: &str) -> Result<()> {
            let mut state = self.state.lock();
            state.url = url.to_string();
            state.ops.push(format!("load:{url}"));
            Ok(())
        }

        async fn go_back(&self) -> Result<()> {
            self.state.lock().ops.push("back".into());
            Ok(())
        }

        async fn go_forward(&self) -> Result<()> {
            self.state.lock().ops.push("forward".into());
            Ok(())
        }

        async fn reload(&self) -> Result<()> {
            self.state.lock().ops.push("reload".into());
            Ok(())
        }

        async fn set_bounds(&self, bounds: Bounds) -> Result<()> {
            self.state.lock().bounds = Some(bounds);
            Ok(())
        }

        async fn set_visible(&self, visible: bool) -> Result<()> {
            let mut state = self.state.lock();
            state.visible = visible;
            state.ops.push(format!("visible:{visible}"));
            Ok(())
        }

        async fn close(&self) -> Result<()> {
            self.state.lock().closed = true;
            Ok(())
        }

        fn url(&self) -> String {
            self.state.lock().url.clone()
        }

        fn title(&self) -> String {
            String::new()
        }

        fn can_go_back(&self) -> bool {
            self.can_go_back
        }

        fn can_go_forward(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct StubEngine {
        surfaces: Mutex<FxHashMap<ViewId, Arc<StubSurface>>>,
    }

    impl StubEngine {
        fn surface(&self, id: ViewId) -> Arc<StubSurface> {
            Arc::clone(self.surfaces.lock().get(&id).expect("surface exists"))
        }
    }

    #[async_trait]
    impl Engine for StubEngine {
        async fn create_surface(
            &self,
            id: ViewId,
            _options: SurfaceOptions,
        ) -> Result<Arc<dyn EngineSurface>> {
            let surface = Arc::new(StubSurface::new());
            self.surfaces.lock().insert(id, Arc::clone(&surface));
            Ok(surface)
        }
    }

    // ------------------------------------------------------------------
    // Harness
    // ------------------------------------------------------------------

    struct Harness {
        _dir: TempDir,
        engine: Arc<StubEngine>,
        manager: ViewManager,
        store: Arc<Mutex<Store>>,
        events: UnboundedReceiver<ShellEvent>,
    }

    fn harness() -> Harness {
        let dir = TempDir::new().expect("temp dir");
        let store = Store::open(dir.path().join("data.json")).expect("open store");
        let store = Arc::new(Mutex::new(store));
        let engine = Arc::new(StubEngine::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let manager = ViewManager::new(
            Arc::clone(&engine) as Arc<dyn Engine>,
            Arc::clone(&store),
            tx,
            "file:///welcome.html",
            Bounds::new(0, 90, 1200, 710),
        );
        Harness {
            _dir: dir,
            engine,
            manager,
            store,
            events: rx,
        }
    }

    fn drain(events: &mut UnboundedReceiver<ShellEvent>) -> Vec<ShellEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_recv() {
            out.push(event);
        }
        out
    }

    fn navigated(id: ViewId, url: &str) -> EngineEvent {
        EngineEvent::Navigated {
            view_id: id,
            url: url.to_string(),
            title: "Page".to_string(),
            in_page: false,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_view_loads_welcome_page() {
        let mut h = harness();
        let id = h.manager.create_view(None).await.expect("create");

        let surface = h.engine.surface(id);
        assert_eq!(surface.url(), "file:///welcome.html");
        assert!(surface.state.lock().visible);
        assert_eq!(h.manager.active_view(), Some(id));

        let events = drain(&mut h.events);
        assert!(events
            .iter()
            .any(|e| matches!(e, ShellEvent::ActiveTabChanged { view_id: Some(v) } if *v == id)));
        assert!(events
            .iter()
            .any(|e| matches!(e, ShellEvent::TabsChanged { tabs } if tabs.len() == 1)));
    }

    #[tokio::test]
    async fn test_create_view_with_explicit_url() {
        let h = harness();
        let id = h
            .manager
            .create_view(Some("https://example.com/"))
            .await
            .expect("create");
        assert_eq!(h.engine.surface(id).url(), "https://example.com/");
    }

    #[tokio::test]
    async fn test_switch_hides_previous_surface() {
        let h = harness();
        let first = h.manager.create_view(None).await.expect("create");
        let second = h.manager.create_view(None).await.expect("create");
        assert_eq!(h.manager.active_view(), Some(second));
        assert!(!h.engine.surface(first).state.lock().visible);

        h.manager.switch_to(first).await.expect("switch");
        assert_eq!(h.manager.active_view(), Some(first));
        assert!(h.engine.surface(first).state.lock().visible);
        assert!(!h.engine.surface(second).state.lock().visible);
    }

    #[tokio::test]
    async fn test_switch_to_unknown_view_fails() {
        let h = harness();
        let ghost = ViewId::new(99).expect("valid view id");
        let err = h.manager.switch_to(ghost).await.unwrap_err();
        assert!(matches!(err, Error::ViewNotFound { .. }));
    }

    #[tokio::test]
    async fn test_close_active_view_activates_previous_neighbor() {
        let h = harness();
        let first = h.manager.create_view(None).await.expect("create");
        let second = h.manager.create_view(None).await.expect("create");
        let third = h.manager.create_view(None).await.expect("create");

        h.manager.close_view(third).await.expect("close");
        assert_eq!(h.manager.active_view(), Some(second));
        assert!(h.engine.surface(third).state.lock().closed);

        // Closing the first (inactive) view does not move focus.
        h.manager.close_view(first).await.expect("close");
        assert_eq!(h.manager.active_view(), Some(second));
    }

    #[tokio::test]
    async fn test_close_first_active_view_activates_next_neighbor() {
        let h = harness();
        let first = h.manager.create_view(None).await.expect("create");
        let second = h.manager.create_view(None).await.expect("create");

        h.manager.switch_to(first).await.expect("switch");
        h.manager.close_view(first).await.expect("close");
        assert_eq!(h.manager.active_view(), Some(second));
    }

    #[tokio::test]
    async fn test_close_last_view_opens_blank_view() {
        let h = harness();
        let only = h.manager.create_view(None).await.expect("create");
        h.manager.close_view(only).await.expect("close");

        // The shell is never left without a tab.
        assert_eq!(h.manager.view_count(), 1);
        let active = h.manager.active_view().expect("active view");
        assert_ne!(active, only);
        assert_eq!(h.engine.surface(active).url(), "about:blank");
    }

    #[tokio::test]
    async fn test_lifecycle_futures_are_send() {
        // Embedding hosts spawn these onto multi-threaded runtimes, so no
        // lock guard may be held across an await point.
        fn assert_send<F: std::future::Future + Send>(f: F) -> F {
            f
        }

        let h = harness();
        let id = assert_send(h.manager.create_view(None)).await.expect("create");
        assert_send(h.manager.switch_to(id)).await.expect("switch");
        assert_send(h.manager.load("https://example.com/"))
            .await
            .expect("load");
        assert_send(h.manager.update_bounds(1280, 720))
            .await
            .expect("resize");
        assert_send(h.manager.close_view(id)).await.expect("close");
    }

    #[tokio::test]
    async fn test_close_unknown_view_fails() {
        let h = harness();
        let ghost = ViewId::new(42).expect("valid view id");
        let err = h.manager.close_view(ghost).await.unwrap_err();
        assert!(matches!(err, Error::ViewNotFound { .. }));
    }

    // ------------------------------------------------------------------
    // Navigation multiplexing
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_navigation_routes_to_active_view() {
        let h = harness();
        let first = h.manager.create_view(None).await.expect("create");
        let second = h.manager.create_view(None).await.expect("create");

        h.manager.back().await.expect("back");
        h.manager.reload().await.expect("reload");
        h.manager.load("https://example.com/").await.expect("load");

        let ops = h.engine.surface(second).ops();
        assert!(ops.contains(&"back".to_string()));
        assert!(ops.contains(&"reload".to_string()));
        assert!(ops.contains(&"load:https://example.com/".to_string()));

        let first_ops = h.engine.surface(first).ops();
        assert!(!first_ops.contains(&"back".to_string()));
    }

    #[tokio::test]
    async fn test_navigation_without_views_is_noop() {
        let h = harness();
        h.manager.back().await.expect("back");
        h.manager.forward().await.expect("forward");
        h.manager.reload().await.expect("reload");
        h.manager.load("https://example.com/").await.expect("load");
    }

    #[tokio::test]
    async fn test_update_bounds_resizes_active_surface() {
        let h = harness();
        let id = h.manager.create_view(None).await.expect("create");

        h.manager.update_bounds(1600, 810).await.expect("resize");
        assert_eq!(
            h.engine.surface(id).state.lock().bounds,
            Some(Bounds::new(0, 90, 1600, 810))
        );
    }

    #[tokio::test]
    async fn test_hide_and_show_active() {
        let h = harness();
        let id = h.manager.create_view(None).await.expect("create");

        h.manager.hide_active().await.expect("hide");
        assert!(!h.engine.surface(id).state.lock().visible);

        h.manager.show_active().await.expect("show");
        assert!(h.engine.surface(id).state.lock().visible);
    }

    // ------------------------------------------------------------------
    // Bookmarks
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_bookmark_current_rejects_internal_pages() {
        let h = harness();
        h.manager.create_view(None).await.expect("create");

        // Welcome page is file://, not bookmarkable.
        let err = h.manager.bookmark_current().unwrap_err();
        assert!(matches!(err, Error::PageNotBookmarkable { .. }));
    }

    #[tokio::test]
    async fn test_bookmark_current_saves_active_page() {
        let h = harness();
        let id = h.manager.create_view(None).await.expect("create");
        h.manager
            .handle_event(navigated(id, "https://example.com/"))
            .expect("event");

        h.manager.bookmark_current().expect("bookmark");
        assert!(h.store.lock().is_bookmarked("https://example.com/"));
    }

    #[tokio::test]
    async fn test_bookmark_without_active_view_fails() {
        let h = harness();
        let err = h.manager.bookmark_current().unwrap_err();
        assert!(matches!(err, Error::NoActiveView));
    }

    // ------------------------------------------------------------------
    // Engine events
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_navigation_event_records_history() {
        let h = harness();
        let id = h.manager.create_view(None).await.expect("create");

        h.manager
            .handle_event(navigated(id, "https://example.com/"))
            .expect("event");
        h.manager
            .handle_event(EngineEvent::Navigated {
                view_id: id,
                url: "https://example.com/#section".to_string(),
                title: "Page".to_string(),
                in_page: true,
            })
            .expect("event");

        // Both full and in-page navigations are recorded.
        let history = h.store.lock().recent_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].url, "https://example.com/#section");
    }

    #[tokio::test]
    async fn test_navigation_event_mirrors_active_view_only() {
        let mut h = harness();
        let first = h.manager.create_view(None).await.expect("create");
        let second = h.manager.create_view(None).await.expect("create");
        drain(&mut h.events);

        h.manager
            .handle_event(navigated(first, "https://background.com/"))
            .expect("event");
        assert!(drain(&mut h.events).is_empty(), "inactive view stays quiet");

        h.manager
            .handle_event(navigated(second, "https://foreground.com/"))
            .expect("event");
        let events = drain(&mut h.events);
        assert!(events.iter().any(|e| matches!(
            e,
            ShellEvent::NavigationChanged { view_id, url, .. }
                if *view_id == second && url == "https://foreground.com/"
        )));
    }

    #[tokio::test]
    async fn test_title_and_favicon_events_update_snapshot() {
        let mut h = harness();
        let id = h.manager.create_view(None).await.expect("create");
        drain(&mut h.events);

        h.manager
            .handle_event(EngineEvent::TitleChanged {
                view_id: id,
                title: "Docs".to_string(),
            })
            .expect("event");
        h.manager
            .handle_event(EngineEvent::FaviconChanged {
                view_id: id,
                url: "https://example.com/favicon.ico".to_string(),
            })
            .expect("event");

        let tabs = h.manager.tabs();
        assert_eq!(tabs[0].title, "Docs");
        assert_eq!(
            tabs[0].favicon.as_deref(),
            Some("https://example.com/favicon.ico")
        );

        let events = drain(&mut h.events);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ShellEvent::TabUpdated { .. }))
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_event_for_unknown_view_is_dropped() {
        let h = harness();
        let ghost = ViewId::new(77).expect("valid view id");
        h.manager
            .handle_event(navigated(ghost, "https://example.com/"))
            .expect("event");
        assert_eq!(h.store.lock().recent_history().len(), 0);
    }

    #[tokio::test]
    async fn test_load_failed_event_is_mirrored() {
        let mut h = harness();
        let id = h.manager.create_view(None).await.expect("create");
        drain(&mut h.events);

        h.manager
            .handle_event(EngineEvent::LoadFailed {
                view_id: id,
                url: "https://unreachable.example/".to_string(),
                error: "dns failure".to_string(),
            })
            .expect("event");

        let events = drain(&mut h.events);
        assert!(events
            .iter()
            .any(|e| matches!(e, ShellEvent::LoadFailed { error, .. } if error == "dns failure")));
    }

    // ------------------------------------------------------------------
    // Neighbor selection
    // ------------------------------------------------------------------

    #[test]
    fn test_neighbor_of_prefers_previous() {
        let ids: Vec<ViewId> = (1..=3)
            .map(|i| ViewId::new(i).expect("valid view id"))
            .collect();
        assert_eq!(neighbor_of(&ids, ids[2]), Some(ids[1]));
        assert_eq!(neighbor_of(&ids, ids[1]), Some(ids[0]));
        assert_eq!(neighbor_of(&ids, ids[0]), Some(ids[1]));
        assert_eq!(neighbor_of(&[ids[0]], ids[0]), None);
    }
}
