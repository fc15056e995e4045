//! Command handlers
//!
//! Each handler performs at most one store operation and reports the
//! outcome through `Output`.

pub mod config;
pub mod docmeta;
pub mod init;
pub mod platform;
pub mod render;

use anyhow::{Context, Result};

use docli_core::StorageResult;

use crate::output::Output;

/// Unwrap a store result, reporting user-facing failures
///
/// Recoverable errors (not initialized, not found, already exists, invalid
/// input) are printed with a recovery suggestion and yield `Ok(None)`.
/// Load and write failures are fatal and propagate with `context` attached.
pub(crate) fn report<T>(result: StorageResult<T>, context: &str, output: &Output) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_recoverable() => {
            output.error(&err.to_string());
            if let Some(suggestion) = err.recovery_suggestion() {
                output.message(suggestion);
            }
            Ok(None)
        }
        Err(err) => {
            if let Some(suggestion) = err.recovery_suggestion() {
                output.warning(suggestion);
            }
            Err(err).context(context.to_string())
        }
    }
}
