//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! `Output` is the status reporter. Commands receive it explicitly and the
//! core library never prints.

use serde::Serialize;

use docli_core::DocMeta;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single document entry
    pub fn print_doc_meta(&self, doc: &DocMeta) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", doc.id);
                println!("Name:        {}", doc.name);
                if let Some(desc) = doc.description() {
                    println!("Description: {}", desc);
                }
                if doc.file_hints.is_empty() {
                    println!("File hints:  (none)");
                } else {
                    println!("File hints:  {}", doc.file_hints.join(", "));
                }
            }
            OutputFormat::Json => print_json(doc),
            OutputFormat::Quiet => {
                println!("{}", doc.id);
            }
        }
    }

    /// Print a list of document entries
    pub fn print_doc_metas(&self, docs: &[DocMeta]) {
        match self.format {
            OutputFormat::Human => {
                if docs.is_empty() {
                    println!("No document metadata entries found.");
                    return;
                }
                let id_width = docs
                    .iter()
                    .map(|d| d.id.len())
                    .max()
                    .unwrap_or(0)
                    .max("ID".len());
                println!("{:<width$}  Name", "ID", width = id_width);
                println!("{:<width$}  ----", "--", width = id_width);
                for doc in docs {
                    let hints = if doc.file_hints.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", doc.file_hints.len())
                    };
                    println!(
                        "{:<width$}  {}{}",
                        doc.id,
                        truncate(&doc.name, 50),
                        hints,
                        width = id_width
                    );
                }
                println!("\n{} document(s)", docs.len());
            }
            OutputFormat::Json => print_json(docs),
            OutputFormat::Quiet => {
                for doc in docs {
                    println!("{}", doc.id);
                }
            }
        }
    }

    /// Print the configured platforms
    pub fn print_platforms(&self, platforms: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if platforms.is_empty() {
                    println!("No platforms configured.");
                    return;
                }
                for platform in platforms {
                    println!("{}", platform);
                }
                println!("\n{} platform(s)", platforms.len());
            }
            OutputFormat::Json => print_json(platforms),
            OutputFormat::Quiet => {
                for platform in platforms {
                    println!("{}", platform);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning (stderr)
    pub fn warning(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("⚠ {}", msg),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({"status": "warning", "message": msg})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an error (stderr, shown even in quiet mode)
    pub fn error(&self, msg: &str) {
        match self.format {
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"status": "error", "message": msg}));
            }
            OutputFormat::Human | OutputFormat::Quiet => eprintln!("✗ {}", msg),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("✗ Failed to serialize output: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
