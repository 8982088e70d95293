//! Shell events mirrored to the overlay UI.
//!
//! The controller pushes these over an unbounded channel; the embedding
//! host forwards them to the UI layer (tab strip, address bar, modals).
//! Events serialize as tagged camelCase JSON so the host can hand them to
//! a web-based overlay unchanged.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

use crate::identifiers::{PromptId, ViewId};
use crate::permissions::PermissionKind;

// ============================================================================
// TabSnapshot
// ============================================================================

/// UI-facing summary of one tab.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    /// View ID.
    pub id: ViewId,
    /// Current URL.
    pub url: String,
    /// Current title (may be empty before first title event).
    pub title: String,
    /// Favicon URL, if the page reported one.
    pub favicon: Option<String>,
    /// Whether this is the active tab.
    pub active: bool,
}

// ============================================================================
// ShellEvent
// ============================================================================

/// An event from the shell controller to the overlay UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ShellEvent {
    /// The tab list changed (tab opened or closed).
    #[serde(rename_all = "camelCase")]
    TabsChanged {
        /// Snapshot of all tabs in insertion order.
        tabs: Vec<TabSnapshot>,
    },

    /// A tab's metadata changed (title or favicon).
    #[serde(rename_all = "camelCase")]
    TabUpdated {
        /// View ID.
        view_id: ViewId,
        /// Current title.
        title: String,
        /// Favicon URL, if any.
        favicon: Option<String>,
    },

    /// The active tab changed.
    #[serde(rename_all = "camelCase")]
    ActiveTabChanged {
        /// New active view, `None` when no tabs remain.
        view_id: Option<ViewId>,
    },

    /// The active tab navigated; address bar and nav buttons update.
    #[serde(rename_all = "camelCase")]
    NavigationChanged {
        /// View ID.
        view_id: ViewId,
        /// Current URL.
        url: String,
        /// Whether back navigation is available.
        can_go_back: bool,
        /// Whether forward navigation is available.
        can_go_forward: bool,
    },

    /// A page failed to load.
    #[serde(rename_all = "camelCase")]
    LoadFailed {
        /// View ID.
        view_id: ViewId,
        /// URL that failed.
        url: String,
        /// Engine-reported error description.
        error: String,
    },

    /// A site is asking for a permission; the UI shows the prompt overlay.
    #[serde(rename_all = "camelCase")]
    PermissionPrompt {
        /// Prompt ID to echo back in the response.
        prompt_id: PromptId,
        /// Requesting host.
        host: String,
        /// Requested kinds (the media bundle arrives as camera+microphone).
        kinds: Vec<PermissionKind>,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_changed_serialization() {
        let event = ShellEvent::TabsChanged {
            tabs: vec![TabSnapshot {
                id: ViewId::new(1).expect("valid view id"),
                url: "https://example.com/".into(),
                title: "Example".into(),
                favicon: None,
                active: true,
            }],
        };

        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"event\":\"tabsChanged\""));
        assert!(json.contains("\"active\":true"));
    }

    #[test]
    fn test_navigation_changed_uses_camel_case() {
        let event = ShellEvent::NavigationChanged {
            view_id: ViewId::new(2).expect("valid view id"),
            url: "https://example.com/".into(),
            can_go_back: true,
            can_go_forward: false,
        };

        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"canGoBack\":true"));
        assert!(json.contains("\"canGoForward\":false"));
        assert!(json.contains("\"viewId\":2"));
    }

    #[test]
    fn test_permission_prompt_serialization() {
        let event = ShellEvent::PermissionPrompt {
            prompt_id: PromptId::generate(),
            host: "meet.example.com".into(),
            kinds: vec![PermissionKind::Camera, PermissionKind::Microphone],
        };

        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"event\":\"permissionPrompt\""));
        assert!(json.contains("\"camera\""));
        assert!(json.contains("\"microphone\""));
    }
}
