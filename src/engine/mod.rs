//! Embedded-engine abstraction.
//!
//! The rendering engine itself is out of scope for this crate; these
//! traits and types are the contract the embedding host implements:
//!
//! - [`Engine`] / [`EngineSurface`] - surface factory and per-tab control
//! - [`EngineEvent`] - engine notifications routed back into the shell

pub mod event;
pub mod surface;

pub use event::EngineEvent;
pub use surface::{Bounds, Engine, EngineSurface, SurfaceOptions};
