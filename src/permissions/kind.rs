//! Permission kinds and statuses.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// PermissionKind
// ============================================================================

/// A site permission the shell can grant or deny.
///
/// Serialized in lowercase; used directly as JSON map keys in the
/// persisted store document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    /// Camera capture.
    Camera,
    /// Microphone capture.
    Microphone,
    /// Geolocation access.
    Geolocation,
    /// Desktop notifications.
    Notifications,
}

impl PermissionKind {
    /// Returns the lowercase name used in the store and shell events.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::Geolocation => "geolocation",
            Self::Notifications => "notifications",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PermissionStatus
// ============================================================================

/// A recorded grant for a (host, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Access granted.
    Allow,
    /// Access denied.
    Deny,
}

impl PermissionStatus {
    /// Returns `true` for [`PermissionStatus::Allow`].
    #[inline]
    #[must_use]
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl From<bool> for PermissionStatus {
    fn from(allow: bool) -> Self {
        if allow { Self::Allow } else { Self::Deny }
    }
}

// ============================================================================
// PermissionDecision
// ============================================================================

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    /// The request is granted.
    Allow,
    /// The request is denied.
    Deny,
}

impl PermissionDecision {
    /// Returns `true` for [`PermissionDecision::Allow`].
    #[inline]
    #[must_use]
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

// ============================================================================
// Engine Name Expansion
// ============================================================================

/// Expands an engine-reported permission name into concrete kinds.
///
/// The engine requests `"media"` as one bundle covering camera and
/// microphone together; the broker tracks the two kinds separately.
///
/// # Errors
///
/// Returns [`Error::UnknownPermission`] for names the shell does not
/// handle; callers deny those without prompting.
pub fn expand_permission_name(name: &str) -> Result<Vec<PermissionKind>> {
    match name {
        "media" => Ok(vec![PermissionKind::Camera, PermissionKind::Microphone]),
        "camera" => Ok(vec![PermissionKind::Camera]),
        "microphone" => Ok(vec![PermissionKind::Microphone]),
        "geolocation" => Ok(vec![PermissionKind::Geolocation]),
        "notifications" => Ok(vec![PermissionKind::Notifications]),
        other => Err(Error::unknown_permission(other)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&PermissionKind::Geolocation).expect("serialize");
        assert_eq!(json, "\"geolocation\"");

        let kind: PermissionKind = serde_json::from_str("\"camera\"").expect("deserialize");
        assert_eq!(kind, PermissionKind::Camera);
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&PermissionStatus::Allow).expect("serialize");
        assert_eq!(json, "\"allow\"");
    }

    #[test]
    fn test_status_from_bool() {
        assert_eq!(PermissionStatus::from(true), PermissionStatus::Allow);
        assert_eq!(PermissionStatus::from(false), PermissionStatus::Deny);
    }

    #[test]
    fn test_media_expands_to_bundle() {
        let kinds = expand_permission_name("media").expect("known permission");
        assert_eq!(
            kinds,
            vec![PermissionKind::Camera, PermissionKind::Microphone]
        );
    }

    #[test]
    fn test_singleton_names() {
        assert_eq!(
            expand_permission_name("geolocation").expect("known permission"),
            vec![PermissionKind::Geolocation]
        );
        assert_eq!(
            expand_permission_name("notifications").expect("known permission"),
            vec![PermissionKind::Notifications]
        );
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = expand_permission_name("midi").unwrap_err();
        assert!(matches!(err, Error::UnknownPermission { .. }));
    }
}
