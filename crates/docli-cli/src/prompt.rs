//! Interactive prompts
//!
//! Collects platform selections and document fields from the terminal.
//! The readers and writers are generic so the flows can be driven from tests.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use docli_core::Platform;

/// Document fields collected from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocMetaFields {
    pub name: String,
    pub description: Option<String>,
    pub file_hints: Vec<String>,
}

/// Check if stdin is attached to a terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Parse a comma-separated platform selection such as `1,2` or `readme`
///
/// Unknown entries are skipped. Duplicates are collapsed, keeping the order
/// of first selection.
pub fn parse_platform_selection(input: &str) -> Vec<Platform> {
    let mut platforms = Vec::new();
    for entry in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Ok(platform) = entry.parse::<Platform>() {
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
    }
    platforms
}

/// Ask which platforms to sync to
///
/// Empty or entirely invalid input falls back to Confluence.
pub fn select_platforms<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Vec<Platform>> {
    writeln!(out, "Which platforms do you want to sync your documentation to?")?;
    for platform in Platform::ALL {
        writeln!(out, "{}. {}", platform.menu_number(), platform.label())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "You can select multiple platforms by entering numbers separated by commas (e.g., 1,2)"
    )?;

    let answer = prompt_line(input, out, "Select platforms (1)")?;
    if answer.is_empty() {
        writeln!(out, "Selected: {}", Platform::Confluence.label())?;
        return Ok(vec![Platform::Confluence]);
    }

    let platforms = parse_platform_selection(&answer);
    if platforms.is_empty() {
        writeln!(out, "No valid platforms selected. Defaulting to Confluence.")?;
        return Ok(vec![Platform::Confluence]);
    }

    let labels: Vec<_> = platforms.iter().map(|p| p.label()).collect();
    writeln!(out, "Selected: {}", labels.join(", "))?;
    Ok(platforms)
}

/// Ask for a new document's name, description and file hints
///
/// Returns `None` if the user leaves the title empty.
pub fn collect_doc_meta<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<DocMetaFields>> {
    writeln!(out, "\n--- New Document Configuration ---")?;

    let name = prompt_line(input, out, "Enter document title")?;
    if name.is_empty() {
        return Ok(None);
    }

    let description = prompt_line(input, out, &format!("Enter description for '{}'", name))?;

    writeln!(
        out,
        "\nPlease provide file or folder names where we can find relevant content for '{}'.",
        name
    )?;
    writeln!(
        out,
        "You can specify multiple files/folders. Press Enter on an empty line when done."
    )?;

    let mut file_hints = Vec::new();
    loop {
        let hint = prompt_line(
            input,
            out,
            &format!("  File/Folder {} (or press Enter to finish)", file_hints.len() + 1),
        )?;
        if hint.is_empty() {
            break;
        }
        file_hints.push(hint);
    }

    if file_hints.is_empty() {
        writeln!(out, "No file hints provided for '{}'.", name)?;
    } else {
        writeln!(
            out,
            "Added {} file/folder hint(s) for '{}'",
            file_hints.len(),
            name
        )?;
    }

    Ok(Some(DocMetaFields {
        name,
        description: Some(description).filter(|d| !d.is_empty()),
        file_hints,
    }))
}

/// Select platforms on the real terminal
pub fn select_platforms_stdin() -> Result<Vec<Platform>> {
    let stdin = io::stdin();
    select_platforms(&mut stdin.lock(), &mut io::stdout())
}

/// Collect document fields on the real terminal
pub fn collect_doc_meta_stdin() -> Result<Option<DocMetaFields>> {
    let stdin = io::stdin();
    collect_doc_meta(&mut stdin.lock(), &mut io::stdout())
}

/// Print a prompt and read one trimmed line (empty on EOF)
fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{}: ", prompt)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
