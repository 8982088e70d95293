//! Engine events routed to the view manager.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;

use crate::identifiers::ViewId;

// ============================================================================
// EngineEvent
// ============================================================================

/// A notification from the embedded engine about one surface.
///
/// The embedding host translates its engine's callbacks into these and
/// feeds them to [`ViewManager::handle_event`](crate::ViewManager::handle_event).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EngineEvent {
    /// The surface committed a navigation.
    ///
    /// `in_page` marks same-document navigations (fragment/pushState);
    /// both kinds are recorded in history.
    #[serde(rename_all = "camelCase")]
    Navigated {
        /// Originating view.
        view_id: ViewId,
        /// Committed URL.
        url: String,
        /// Title known at commit time (often empty).
        title: String,
        /// Same-document navigation marker.
        in_page: bool,
    },

    /// The page title changed.
    #[serde(rename_all = "camelCase")]
    TitleChanged {
        /// Originating view.
        view_id: ViewId,
        /// New title.
        title: String,
    },

    /// The page reported a favicon.
    #[serde(rename_all = "camelCase")]
    FaviconChanged {
        /// Originating view.
        view_id: ViewId,
        /// Favicon URL.
        url: String,
    },

    /// A load failed.
    #[serde(rename_all = "camelCase")]
    LoadFailed {
        /// Originating view.
        view_id: ViewId,
        /// URL that failed to load.
        url: String,
        /// Engine-reported error description.
        error: String,
    },
}

impl EngineEvent {
    /// Returns the view this event belongs to.
    #[inline]
    #[must_use]
    pub fn view_id(&self) -> ViewId {
        match self {
            Self::Navigated { view_id, .. }
            | Self::TitleChanged { view_id, .. }
            | Self::FaviconChanged { view_id, .. }
            | Self::LoadFailed { view_id, .. } => *view_id,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserialization() {
        let json = r#"{
            "event": "navigated",
            "viewId": 1,
            "url": "https://example.com/",
            "title": "Example",
            "inPage": false
        }"#;

        let event: EngineEvent = serde_json::from_str(json).expect("parse event");
        match event {
            EngineEvent::Navigated { url, in_page, .. } => {
                assert_eq!(url, "https://example.com/");
                assert!(!in_page);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_view_id_accessor() {
        let id = ViewId::new(4).expect("valid view id");
        let event = EngineEvent::TitleChanged {
            view_id: id,
            title: "Docs".into(),
        };
        assert_eq!(event.view_id(), id);
    }
}
