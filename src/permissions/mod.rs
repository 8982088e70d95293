//! Permission model and brokering.
//!
//! - [`kind`] - permission kinds, statuses, and engine-name expansion
//! - [`broker`] - the three-tier check/request/respond broker

pub mod broker;
pub mod kind;

pub use broker::{PermissionBroker, PromptResponse};
pub use kind::{
    PermissionDecision, PermissionKind, PermissionStatus, expand_permission_name,
};
