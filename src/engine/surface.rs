//! The seam between the shell and the embedded rendering engine.
//!
//! The shell never talks to a concrete engine; the embedding host
//! implements [`Engine`] and [`EngineSurface`] over whatever embedding
//! API it uses and feeds [`EngineEvent`](super::EngineEvent)s back into
//! the view manager.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identifiers::ViewId;

// ============================================================================
// Bounds
// ============================================================================

/// Pixel rectangle a surface occupies inside the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: i32,
    /// Top edge (below the shell chrome).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Bounds {
    /// Creates a bounds rectangle.
    #[inline]
    #[must_use]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns a copy with a new size, keeping the origin.
    #[inline]
    #[must_use]
    pub fn resized(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}

// ============================================================================
// SurfaceOptions
// ============================================================================

/// Options the shell passes when creating a surface.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    /// Initial placement.
    pub bounds: Bounds,
    /// Whether the engine may throttle the surface when hidden.
    pub background_throttling: bool,
}

impl SurfaceOptions {
    /// Creates options with the given placement.
    #[inline]
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            background_throttling: true,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Factory for content surfaces, implemented by the embedding host.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Creates a content surface for the given view.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot create the surface.
    async fn create_surface(
        &self,
        id: ViewId,
        options: SurfaceOptions,
    ) -> Result<Arc<dyn EngineSurface>>;
}

// ============================================================================
// EngineSurface
// ============================================================================

/// One embedded web-content surface (the engine side of a tab).
#[async_trait]
pub trait EngineSurface: Send + Sync {
    /// Navigates the surface to a URL.
    async fn load_url(&self, url: &str) -> Result<()>;

    /// Navigates back in the surface's session history.
    async fn go_back(&self) -> Result<()>;

    /// Navigates forward in the surface's session history.
    async fn go_forward(&self) -> Result<()>;

    /// Reloads the current page.
    async fn reload(&self) -> Result<()>;

    /// Moves/resizes the surface inside the host window.
    async fn set_bounds(&self, bounds: Bounds) -> Result<()>;

    /// Shows or hides the surface (overlay modals hide it).
    async fn set_visible(&self, visible: bool) -> Result<()>;

    /// Destroys the surface and releases engine resources.
    async fn close(&self) -> Result<()>;

    /// Current URL.
    fn url(&self) -> String;

    /// Current page title.
    fn title(&self) -> String;

    /// Whether back navigation is available.
    fn can_go_back(&self) -> bool;

    /// Whether forward navigation is available.
    fn can_go_forward(&self) -> bool;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_resized_keeps_origin() {
        let bounds = Bounds::new(0, 90, 800, 600);
        let resized = bounds.resized(1200, 700);
        assert_eq!(resized, Bounds::new(0, 90, 1200, 700));
    }

    #[test]
    fn test_surface_options_default_throttling() {
        let options = SurfaceOptions::new(Bounds::new(0, 0, 100, 100));
        assert!(options.background_throttling);
    }
}
