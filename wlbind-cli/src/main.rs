//! # wlbind
//!
//! CLI tool for generating Rust client bindings from Wayland protocol schemas.
//!
//! ## Usage
//!
//! ```bash
//! # Print the contract artifact
//! wlbind generate contract wayland.json
//!
//! # Write the glue artifact
//! wlbind generate glue wayland.json src/protocols/wayland_glue.rs
//!
//! # Preview without writing
//! wlbind generate glue wayland.json out.rs --dry-run
//!
//! # Fail with status 2 when a checked-in artifact is stale
//! wlbind check contract wayland.json src/protocols/wayland_contract.rs
//!
//! # Initialize configuration
//! wlbind init
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wlbind_cli::{
    config::{CliArgs, ConfigManager},
    error::CliError,
    pipeline,
    writer::{FileWriter, WriteResult},
};
use wlbind_gen::Mode;

#[derive(Parser)]
#[command(name = "wlbind")]
#[command(author, version, about = "Generate Rust client bindings from Wayland protocol schemas", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one artifact from a schema tree
    Generate {
        /// Artifact to generate (contract or glue)
        mode: Mode,

        /// Schema tree in JSON form, or - for stdin
        input: PathBuf,

        /// Output file, or - for stdout
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Module declaring the native symbols
        #[arg(long)]
        ffi_path: Option<String>,

        /// Path of the runtime support crate
        #[arg(long)]
        runtime_path: Option<String>,

        /// Leave out schema summaries
        #[arg(long)]
        no_docs: bool,

        /// Interface to leave out (repeatable)
        #[arg(long = "skip", value_name = "INTERFACE")]
        skip: Vec<String>,
    },

    /// Check that an existing artifact is up to date
    Check {
        /// Artifact kind (contract or glue)
        mode: Mode,

        /// Schema tree in JSON form
        input: PathBuf,

        /// Existing artifact to compare against
        existing: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new wlbind configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "wlbind.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "wlbind=debug" } else { "wlbind=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            mode,
            input,
            output,
            config,
            dry_run,
            ffi_path,
            runtime_path,
            no_docs,
            skip,
        } => {
            let args = CliArgs {
                ffi_path,
                runtime_path,
                no_docs,
                skip_interfaces: skip,
                ..Default::default()
            };
            cmd_generate(mode, input, output, config, dry_run, &args)
        }

        Commands::Check {
            mode,
            input,
            existing,
            config,
        } => cmd_check(mode, input, existing, config),

        Commands::Init { output, force } => cmd_init(output, force),
    }
}

/// Generate command implementation.
fn cmd_generate(
    mode: Mode,
    input: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    dry_run: bool,
    args: &CliArgs,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(config, args);

    let artifact = pipeline::render(&input, mode, &config)?;

    let Some(path) = pipeline::destination(output.as_deref(), &artifact, &config) else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(artifact.code.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    };

    match FileWriter::new(dry_run).write(&path, &artifact.code)? {
        WriteResult::Written { path, bytes } => {
            eprintln!(
                "{} Written {} {} ({} bytes, {} interfaces) to {}",
                "✓".green(),
                artifact.protocol,
                mode,
                bytes,
                artifact.interfaces.len(),
                path.display()
            );
        }
        WriteResult::DryRun { content, path } => {
            eprintln!("{} Would write to {}:", "[dry-run]".yellow(), path.display());
            eprintln!("{}", "─".repeat(60).dimmed());
            print!("{}", content);
            eprintln!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Check command implementation.
fn cmd_check(
    mode: Mode,
    input: PathBuf,
    existing: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    if !existing.exists() {
        return Err(CliError::MissingArtifact(existing));
    }
    let existing_content = std::fs::read_to_string(&existing)?;

    let config = ConfigManager::load(config_path.as_deref())?;
    let artifact = pipeline::render(&input, mode, &config)?;

    if pipeline::is_up_to_date(&existing_content, &artifact) {
        eprintln!("{} {} is up to date", "✓".green(), existing.display());
        Ok(())
    } else {
        eprintln!("{} {} is out of date", "✗".red(), existing.display());
        eprintln!("  Run 'wlbind generate {}' to update", mode);
        Err(CliError::Validation(format!(
            "{} is out of date",
            existing.display()
        )))
    }
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    let content = ConfigManager::default_config_content();
    FileWriter::new(false)
        .with_overwrite(force)
        .write(&output, content)?;

    eprintln!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}
