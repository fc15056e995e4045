//! Document metadata command handlers

use anyhow::{bail, Result};

use docli_core::SpecStore;

use crate::commands::report;
use crate::output::Output;
use crate::prompt::{self, DocMetaFields};

/// Field values given on the command line
#[derive(Debug, Default)]
pub struct CreateArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub hints: Vec<String>,
}

/// Create a new document metadata entry
///
/// Fields come from the command line when `--name` is given, otherwise they
/// are collected interactively.
pub fn create(
    store: &SpecStore,
    args: CreateArgs,
    interactive: bool,
    output: &Output,
) -> Result<()> {
    let fields = match args.name {
        Some(name) => DocMetaFields {
            name: name.trim().to_string(),
            description: args
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            file_hints: args
                .hints
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
        },
        None if interactive => {
            // Fail before prompting if there is nothing to add to
            if report(store.load(), "Failed to load configuration", output)?.is_none() {
                return Ok(());
            }
            match prompt::collect_doc_meta_stdin()? {
                Some(fields) => fields,
                None => {
                    output.message("Document creation cancelled");
                    return Ok(());
                }
            }
        }
        None => bail!("No document name given. Pass --name or run interactively."),
    };

    let Some(doc) = report(
        store.create_doc_meta(fields.name, fields.description, fields.file_hints),
        "Error saving configuration",
        output,
    )?
    else {
        return Ok(());
    };

    output.success(&format!(
        "Document metadata for '{}' added successfully",
        doc.name
    ));
    output.print_doc_meta(&doc);
    Ok(())
}

/// Delete a document metadata entry by ID
pub fn delete(store: &SpecStore, id: String, output: &Output) -> Result<()> {
    let Some(removed) = report(
        store.remove_doc_meta(id.trim()),
        "Error deleting document metadata",
        output,
    )?
    else {
        return Ok(());
    };

    output.success(&format!(
        "Document metadata with ID '{}' ({}) deleted successfully",
        removed.id, removed.name
    ));
    Ok(())
}

/// List all document metadata entries
pub fn list(store: &SpecStore, output: &Output) -> Result<()> {
    let Some(docs) = report(
        store.list_doc_meta(),
        "Error retrieving document metadata",
        output,
    )?
    else {
        return Ok(());
    };

    output.print_doc_metas(&docs);
    Ok(())
}
