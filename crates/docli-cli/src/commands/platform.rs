//! Platform command handlers

use anyhow::Result;

use docli_core::{Platform, SpecStore};

use crate::commands::report;
use crate::output::Output;

/// Add a platform to the configuration
pub fn add(store: &SpecStore, platform: Platform, output: &Output) -> Result<()> {
    let Some(added) = report(
        store.add_platform(platform.as_str()),
        "Error saving configuration",
        output,
    )?
    else {
        return Ok(());
    };

    if added {
        output.success(&format!("Added platform '{}'", platform));
    } else {
        output.message(&format!("Platform '{}' is already configured", platform));
    }
    Ok(())
}

/// Remove a platform from the configuration
///
/// Unrecognized names are passed through as-is so hand-edited entries can
/// still be removed.
pub fn remove(store: &SpecStore, name: String, output: &Output) -> Result<()> {
    let token = name
        .parse::<Platform>()
        .map(|p| p.as_str().to_string())
        .unwrap_or(name);

    if report(
        store.remove_platform(&token),
        "Error saving configuration",
        output,
    )?
    .is_some()
    {
        output.success(&format!("Removed platform '{}'", token));
    }
    Ok(())
}

/// List configured platforms
pub fn list(store: &SpecStore, output: &Output) -> Result<()> {
    if let Some(platforms) = report(store.platforms(), "Error retrieving platforms", output)? {
        output.print_platforms(&platforms);
    }
    Ok(())
}
