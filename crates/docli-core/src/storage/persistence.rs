//! Spec persistence
//!
//! Handles loading and saving the documentation configuration.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `.docs/` (configurable via `Config`)
//!
//! Files:
//! - `spec.json` - The canonical configuration, the only file read back
//! - `spec.md` - Markdown mirror, regenerated on every save

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::models::DocSpec;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::projection;

/// Persistence layer for the documentation configuration
///
/// Owns both on-disk files. Nothing else reads or writes them.
pub struct SpecPersistence {
    config: Config,
}

impl SpecPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the canonical file exists on disk
    ///
    /// Path check only, the file is not parsed.
    pub fn exists(&self) -> bool {
        self.config.spec_json_path().exists()
    }

    /// Load the canonical configuration
    ///
    /// Fails if the file is missing, unreadable, or not valid JSON for a
    /// `DocSpec`. A broken canonical file is never papered over.
    pub fn load(&self) -> StorageResult<DocSpec> {
        let path = self.config.spec_json_path();
        debug!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(&path).map_err(|source| StorageError::ReadError {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|e| StorageError::InvalidFormat {
            path,
            details: e.to_string(),
        })
    }

    /// Save the configuration and regenerate the mirror
    ///
    /// The mirror is rendered from `spec` in memory before anything touches
    /// disk. The canonical file is written first. If that fails, the mirror
    /// is left alone and the error is returned.
    pub fn save(&self, spec: &DocSpec) -> StorageResult<()> {
        let mut json = serde_json::to_string_pretty(spec)?;
        json.push('\n');
        let markdown = projection::render(spec);

        let json_path = self.config.spec_json_path();
        atomic_write(&json_path, json.as_bytes())?;
        debug!("Saved configuration to {:?}", json_path);

        self.write_mirror(&markdown)
    }

    /// Regenerate only the mirror from the given configuration
    pub fn save_mirror(&self, spec: &DocSpec) -> StorageResult<()> {
        self.write_mirror(&projection::render(spec))
    }

    fn write_mirror(&self, markdown: &str) -> StorageResult<()> {
        let md_path = self.config.spec_md_path();
        atomic_write(&md_path, markdown.as_bytes())?;
        debug!("Rendered mirror to {:?}", md_path);
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);

    write_and_sync(&temp_path, data).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StorageError::from_io(e, path.to_path_buf())
    })?;

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        }
    })?;

    Ok(())
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// `spec.json` -> `spec.json.tmp`, so the two files never share a temp path
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
