//! Shell assembly: view management and the top-level facade.
//!
//! [`ViewManager`] drives content surfaces; [`Shell`] bundles it with the
//! permission broker, the persisted store, and the tracker filter behind
//! one handle; [`ShellBuilder`] wires them together.

// ============================================================================
// Modules
// ============================================================================

mod builder;
pub(crate) mod core;
mod manager;

// ============================================================================
// Exports
// ============================================================================

pub use builder::ShellBuilder;
pub use manager::ViewManager;
pub use self::core::Shell;
