//! docli CLI
//!
//! Command-line interface for docli - document configuration for
//! documentation platforms.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docli_core::{Config, Platform, SpecStore};

mod commands;
mod output;
mod prompt;

use commands::docmeta::CreateArgs;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "docli")]
#[command(about = "docli - Keep track of the documents your project publishes")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the documentation configuration
    Init {
        /// Platforms to sync to (skips the interactive prompt)
        #[arg(short = 'p', long = "platform", value_delimiter = ',')]
        platforms: Vec<Platform>,
    },
    /// Create documentation resources
    Create {
        #[command(subcommand)]
        command: CreateCommands,
    },
    /// Delete documentation resources
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        command: DeleteCommands,
    },
    /// List documentation resources
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Regenerate spec.md from spec.json
    Render,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum CreateCommands {
    /// Create a new document metadata entry
    Docmeta {
        /// Document title (prompts when omitted)
        #[arg(short, long)]
        name: Option<String>,
        /// Document description
        #[arg(short, long)]
        description: Option<String>,
        /// File or folder with relevant content (repeatable)
        #[arg(long = "hint")]
        hints: Vec<String>,
    },
    /// Add a platform
    Platform {
        /// Platform name or menu number (confluence/1, readme/2)
        platform: Platform,
    },
}

#[derive(Subcommand)]
enum DeleteCommands {
    /// Delete a document metadata entry
    Docmeta {
        /// Document ID
        id: String,
    },
    /// Remove a platform
    Platform {
        /// Platform name
        platform: String,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// List document metadata entries
    Docmeta,
    /// List configured platforms
    #[command(alias = "platform")]
    Platforms,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (docs_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let Some(command) = cli.command else {
        output.message("Welcome to docli! Use --help to see available commands.");
        return Ok(());
    };

    // Commands that don't need the store
    let command = match command {
        Commands::Version => {
            println!("docli v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Config { command } => {
            return handle_config_command(command, cli.config.as_ref(), &output);
        }
        other => other,
    };

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    init_logging(&config, cli.verbose);
    tracing::debug!("Using docs directory {:?}", config.docs_dir);

    let store = SpecStore::with_config(config);
    let interactive = prompt::is_interactive();

    match command {
        Commands::Init { platforms } => commands::init::run(&store, platforms, interactive, &output),
        Commands::Create { command } => handle_create_command(command, &store, interactive, &output),
        Commands::Delete { command } => handle_delete_command(command, &store, &output),
        Commands::List { command } => handle_list_command(command, &store, &output),
        Commands::Render => commands::render::run(&store, &output),
        Commands::Version | Commands::Config { .. } => Ok(()), // Handled above
    }
}

fn handle_create_command(
    command: CreateCommands,
    store: &SpecStore,
    interactive: bool,
    output: &Output,
) -> Result<()> {
    match command {
        CreateCommands::Docmeta {
            name,
            description,
            hints,
        } => {
            let args = CreateArgs {
                name,
                description,
                hints,
            };
            commands::docmeta::create(store, args, interactive, output)
        }
        CreateCommands::Platform { platform } => commands::platform::add(store, platform, output),
    }
}

fn handle_delete_command(command: DeleteCommands, store: &SpecStore, output: &Output) -> Result<()> {
    match command {
        DeleteCommands::Docmeta { id } => commands::docmeta::delete(store, id, output),
        DeleteCommands::Platform { platform } => commands::platform::remove(store, platform, output),
    }
}

fn handle_list_command(command: ListCommands, store: &SpecStore, output: &Output) -> Result<()> {
    match command {
        ListCommands::Docmeta => commands::docmeta::list(store, output),
        ListCommands::Platforms => commands::platform::list(store, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize logging to the configured log file, or stderr
///
/// `RUST_LOG` takes precedence over the `--verbose` default.
fn init_logging(config: &Config, verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("docli_core={},docli={}", log_level, log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    // Ignore the error if a subscriber is already installed
    match &config.log_file {
        Some(path) => {
            let file = match OpenOptions::new().create(true).append(true).open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", path, e);
                    let _ = builder.with_writer(std::io::stderr).try_init();
                    return;
                }
            };
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}
