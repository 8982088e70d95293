//! Type-safe identifiers for shell entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time:
//!
//! - [`ViewId`] - identifies a content surface (tab)
//! - [`PromptId`] - identifies an in-flight permission prompt

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ViewId
// ============================================================================

/// Identifier for a content surface (tab).
///
/// View IDs are allocated monotonically starting at 1 by the view manager.
/// Zero is never a valid view ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(NonZeroU32);

impl ViewId {
    /// Creates a view ID from a raw value.
    ///
    /// Returns `None` if the value is zero.
    #[inline]
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// PromptId
// ============================================================================

/// Identifier for an in-flight permission prompt.
///
/// Used to correlate the overlay UI's response with the pending request,
/// the same way command responses are correlated by UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(Uuid);

impl PromptId {
    /// Generates a fresh random prompt ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_id_rejects_zero() {
        assert!(ViewId::new(0).is_none());
        assert!(ViewId::new(1).is_some());
    }

    #[test]
    fn test_view_id_roundtrip() {
        let id = ViewId::new(42).expect("valid view id");
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_view_id_serde() {
        let id = ViewId::new(7).expect("valid view id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "7");

        let back: ViewId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_prompt_id_unique() {
        let a = PromptId::generate();
        let b = PromptId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_prompt_id_serde() {
        let id = PromptId::generate();
        let json = serde_json::to_string(&id).expect("serialize");
        let back: PromptId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
