//! LokNet Shell - Multi-tab browser shell controller.
//!
//! This library provides the controller layer of a privacy-focused desktop
//! browser: tab lifecycle, permission brokering, persisted user data, and
//! the event stream that keeps an overlay UI in sync.
//!
//! # Architecture
//!
//! The shell sits between a content engine and the host window:
//!
//! - **Engine (below)**: creates content surfaces and reports navigation,
//!   title, and favicon changes via [`EngineEvent`]
//! - **Shell (this crate)**: [`ViewManager`] multiplexes commands onto the
//!   active surface; [`PermissionBroker`] reconciles persisted, session,
//!   and in-flight permission state; [`Store`] persists bookmarks, history,
//!   and site permissions to one JSON file
//! - **Overlay UI (above)**: consumes [`ShellEvent`]s and answers
//!   permission prompts with [`PromptResponse`]s
//!
//! Key design principles:
//!
//! - One active surface at a time; inactive surfaces stay alive but hidden
//! - Permission prompts are brokered, deduplicated per (host, kinds), and
//!   never reach the page until the user answers
//! - The shell is never tabless: closing the last view opens a blank one
//!
//! # Quick Start
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use loknet_shell::engine::Engine;
//! use loknet_shell::{Result, ShellBuilder};
//!
//! # async fn run(engine: Arc<dyn Engine>) -> Result<()> {
//! let (shell, mut events) = ShellBuilder::new()
//!     .data_path("loknet-data.json")
//!     .welcome_url("https://start.duckduckgo.com/")
//!     .build(engine)?;
//!
//! shell.views().create_view(None).await?;
//! shell.navigate("rust borrow checker").await?; // resolves to a search
//!
//! while let Some(event) = events.recv().await {
//!     // forward to the overlay UI
//!     let _ = event;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`address`] | Address-bar input resolution |
//! | [`engine`] | Content engine seam: [`Engine`], [`EngineSurface`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`events`] | Shell-to-UI event stream |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`permissions`] | Three-tier permission brokering |
//! | [`privacy`] | Tracker request filtering |
//! | [`shell`] | [`ViewManager`], [`Shell`], [`ShellBuilder`] |
//! | [`store`] | Persisted bookmarks, history, site permissions |

// ============================================================================
// Modules
// ============================================================================

/// Address-bar input resolution.
///
/// Turns free-form input into a loadable URL: scheme passthrough, bare
/// domains, or a search query.
pub mod address;

/// Content engine seam.
///
/// The shell drives any engine implementing [`Engine`] and
/// [`EngineSurface`]; events flow back as [`EngineEvent`].
pub mod engine;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Shell-to-UI event stream.
///
/// [`ShellEvent`]s mirror tab, navigation, and permission state to the
/// overlay UI.
pub mod events;

/// Type-safe identifiers for shell entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Three-tier permission brokering.
///
/// [`PermissionBroker`] reconciles persisted decisions, session grants,
/// and in-flight prompts.
pub mod permissions;

/// Tracker request filtering.
pub mod privacy;

/// Shell assembly: view management and the top-level facade.
pub mod shell;

/// Persisted user data.
///
/// One JSON file holding bookmarks, capped history, and site permissions.
pub mod store;

// ============================================================================
// Re-exports
// ============================================================================

// Shell types
pub use shell::{Shell, ShellBuilder, ViewManager};

// Engine seam
pub use engine::{Bounds, Engine, EngineEvent, EngineSurface, SurfaceOptions};

// Event types
pub use events::{ShellEvent, TabSnapshot};

// Permission types
pub use permissions::{
    PermissionBroker, PermissionDecision, PermissionKind, PermissionStatus, PromptResponse,
};

// Store types
pub use store::{HistoryEntry, Store};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{PromptId, ViewId};

// Privacy types
pub use privacy::RequestFilter;
