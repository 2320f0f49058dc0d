use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vercat::{
    build_catalog, load_declarations, render_fingerprints, render_plan, render_resolved, Config,
    OutputFormat,
};
use vercat_core::DeclarationKind;

#[derive(Parser)]
#[command(name = "vercat")]
#[command(about = "Compile dotted version catalog aliases into accessor namespaces", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Config file (defaults to ./vercat.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog name, overriding the config file
    #[arg(short, long, global = true, env = "VERCAT_CATALOG_NAME")]
    name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the accessor naming plan
    Plan {
        /// Declarations file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "outline")]
        format: OutputFormat,
    },

    /// Resolve a dotted alias to its value
    Resolve {
        /// Declarations file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Declaration kind (library, version, bundle, plugin)
        #[arg(short, long, default_value = "library")]
        kind: DeclarationKind,

        /// Dotted alias, e.g. androidx.compose.ui
        alias: String,
    },

    /// Print per-kind tree fingerprints
    Fingerprint {
        /// Declarations file (JSON array)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(cli.debug)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?.with_name(cli.name);

    match cli.command {
        Commands::Plan { input, format } => {
            let set = load_declarations(&input)?;
            let catalog = build_catalog(&config, &set)?;
            println!("{}", render_plan(&catalog, format)?.trim_end());
        }
        Commands::Resolve { input, kind, alias } => {
            let set = load_declarations(&input)?;
            let catalog = build_catalog(&config, &set)?;
            println!("{}", render_resolved(&catalog, kind, &alias)?);
        }
        Commands::Fingerprint { input } => {
            let set = load_declarations(&input)?;
            let catalog = build_catalog(&config, &set)?;
            println!("{}", render_fingerprints(&catalog));
        }
    }

    Ok(())
}
