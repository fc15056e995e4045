//! Markdown projection
//!
//! Renders the human-readable `spec.md` from an in-memory `DocSpec`.
//! The mirror is a pure function of the configuration: it is always rendered
//! in full and never parsed back.

use std::fmt::Write;

use crate::models::{DocMeta, DocSpec};

const TITLE: &str = "# Documentation Configuration";
const INTRO: &str =
    "This file contains the configuration for your documentation synchronization.";
const NO_PLATFORMS: &str = "No platforms configured.";
const NO_DOCUMENTS: &str = "No documents configured yet, nothing to do.";
const NO_FILE_HINTS: &str = "*No file hints provided.*";

/// Render the Markdown mirror for a configuration
pub fn render(spec: &DocSpec) -> String {
    let mut out = String::new();

    out.push_str(TITLE);
    out.push_str("\n\n");
    out.push_str(INTRO);
    out.push_str("\n\n");

    out.push_str("## Platforms\n\n");
    if spec.platforms.is_empty() {
        out.push_str(NO_PLATFORMS);
        out.push_str("\n\n");
    } else {
        out.push_str("**Target Platforms:**\n");
        for platform in &spec.platforms {
            let _ = writeln!(out, "- {}", capitalize(platform));
        }
        out.push('\n');
    }

    out.push_str("## Documents\n\n");
    if spec.docmeta.is_empty() {
        out.push_str(NO_DOCUMENTS);
        out.push_str("\n\n");
    } else {
        for (i, doc) in spec.docmeta.iter().enumerate() {
            render_doc_meta(&mut out, i + 1, doc);
        }
    }

    out
}

fn render_doc_meta(out: &mut String, number: usize, doc: &DocMeta) {
    let _ = write!(out, "### {}. {}\n\n", number, doc.name);

    if let Some(description) = doc.description() {
        let _ = write!(out, "**Description:** {}\n\n", description);
    }

    if doc.file_hints.is_empty() {
        out.push_str(NO_FILE_HINTS);
        out.push_str("\n\n");
    } else {
        out.push_str("**File/Folder Sources:**\n");
        for hint in &doc.file_hints {
            let _ = writeln!(out, "- `{}`", hint);
        }
        out.push('\n');
    }
}

/// Upper-case the first character, leaving the rest untouched
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
