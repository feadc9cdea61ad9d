//! jspec CLI - Main Entry Point
//!
//! Loads the harness configuration, builds the asset manifest, and either
//! starts the runner server or prints the manifest for an external driver.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use jspec_common::{config, AssetManifest, HarnessConfig, ManifestBuilder};

/// jspec - browser JavaScript test harness
#[derive(Parser)]
#[command(name = "jspec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project root directory
    #[arg(long, default_value = ".", global = true)]
    project_root: PathBuf,

    /// Config file path (default: <root>/spec/javascripts/support/jspec.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the harness's own browser assets
    #[arg(long, env = "JSPEC_HARNESS_ROOT", default_value = "lib", global = true)]
    harness_root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the runner server
    Server {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:8888")]
        addr: SocketAddr,
    },

    /// Print every JavaScript asset URL in load order
    Files {
        /// Restrict the spec group to files matching this single pattern
        #[arg(long)]
        filter: Option<String>,
    },

    /// Print the on-disk path of every registered spec file
    Specs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let manifest = build_manifest(&cli)?;

    match cli.command {
        Commands::Server { addr } => {
            info!("project root: {}", cli.project_root.display());
            jspec_web::serve(addr, manifest, cli.harness_root).await
        }
        Commands::Files { filter } => {
            for file in manifest.js_files(filter.as_deref()) {
                println!("{file}");
            }
            Ok(())
        }
        Commands::Specs => {
            for path in manifest.specs_full_paths()? {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn build_manifest(cli: &Cli) -> anyhow::Result<AssetManifest> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.project_root.join(config::DEFAULT_CONFIG_FILE));
    let config = HarnessConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    Ok(ManifestBuilder::new(cli.project_root.clone(), config).build())
}
