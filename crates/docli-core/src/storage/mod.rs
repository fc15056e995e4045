//! Storage layer
//!
//! Handles persistence of the documentation configuration.
//!
//! ## Architecture
//!
//! - **spec.json**: Source of truth, pretty-printed JSON
//! - **spec.md**: Markdown projection for humans, never read back
//!
//! Whenever the configuration changes, the Markdown mirror is re-rendered
//! from the new in-memory state.

pub mod error;
pub mod persistence;
pub mod projection;

pub use error::{StorageError, StorageErrorKind, StorageResult};
pub use persistence::SpecPersistence;
