//! docli Core Library
//!
//! This crate provides the core functionality for docli, a command-line tool
//! that keeps a structured record of the documents a project wants to keep in
//! sync with its documentation platforms.
//!
//! # Architecture
//!
//! - **spec.json**: Source of truth, the only file read back
//! - **spec.md**: Markdown mirror, fully re-rendered after every change
//!
//! # Quick Start
//!
//! ```text
//! let store = SpecStore::open()?;
//! store.initialize(["confluence"])?;
//!
//! // Add a document
//! let doc = store.new_doc_meta("README", None, vec!["README.md".into()])?;
//! store.add_doc_meta(doc)?;
//!
//! // Query documents
//! let docs = store.list_doc_meta()?;
//! ```
//!
//! # Modules
//!
//! - `store`: Repository over the configuration (main entry point)
//! - `models`: Document entries, the document set and platforms
//! - `id`: Short document ID generation
//! - `storage`: JSON persistence and Markdown projection
//! - `config`: Application configuration

pub mod config;
pub mod id;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{DocMeta, DocSpec, Platform, UnknownPlatform};
pub use storage::{SpecPersistence, StorageError, StorageErrorKind, StorageResult};
pub use store::SpecStore;
