//! Render command handler

use anyhow::Result;

use docli_core::SpecStore;

use crate::commands::report;
use crate::output::Output;

/// Regenerate spec.md from spec.json
pub fn run(store: &SpecStore, output: &Output) -> Result<()> {
    if report(store.render(), "Failed to render spec.md", output)?.is_some() {
        output.success(&format!(
            "Rendered {}",
            store.config().spec_md_path().display()
        ));
    }
    Ok(())
}
