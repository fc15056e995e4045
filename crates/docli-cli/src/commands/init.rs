//! Init command handler

use anyhow::Result;

use docli_core::{Platform, SpecStore};

use crate::commands::report;
use crate::output::Output;
use crate::prompt;

/// Initialize the documentation configuration
///
/// With no platforms given, asks interactively when attached to a terminal
/// and otherwise defaults to Confluence.
pub fn run(
    store: &SpecStore,
    platforms: Vec<Platform>,
    interactive: bool,
    output: &Output,
) -> Result<()> {
    if store.exists() {
        output.error(&format!(
            "A spec file already exists at {}",
            store.config().spec_json_path().display()
        ));
        output.message(&format!(
            "If you want to re-initialize, please back up your existing {} and delete it \
             before running 'docli init' again.",
            store.config().docs_dir.display()
        ));
        return Ok(());
    }

    let platforms = if !platforms.is_empty() {
        platforms
    } else if interactive {
        prompt::select_platforms_stdin()?
    } else {
        output.message("No platforms given. Defaulting to Confluence.");
        vec![Platform::Confluence]
    };

    output.message("Initializing documentation configuration...");
    let tokens: Vec<&str> = platforms.iter().map(|p| p.as_str()).collect();
    let Some(spec) = report(
        store.initialize(tokens),
        "Failed to initialize documentation configuration",
        output,
    )?
    else {
        return Ok(());
    };

    output.success(&format!(
        "Documentation configuration initialized successfully ({})",
        spec.platforms.join(", ")
    ));
    output.message(&format!(
        "Configuration saved to {}",
        store.config().spec_md_path().display()
    ));

    Ok(())
}
