// Offline node maintenance for the gantry iLO deploy driver
use std::io::stderr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use gantry_common::{DirectoryNodeStore, NodeStore};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};
use uuid::Uuid;

mod cmd;
mod config;

use cmd::capability::CapabilityCommand;
use config::{GantryConfig, DEFAULT_STATE_DIR};

#[derive(Parser, Debug)]
#[command(author, version, about = "Gantry iLO deploy driver tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding node records (overrides the config file)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output - shows more detailed logs
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect or edit a node's capabilities
    #[command(subcommand)]
    Capability(CapabilityCommand),
    /// Check a node's iLO driver_info and boot_mode capability
    Validate { node: Uuid },
    /// List the driver_info parameters understood by the iLO driver
    Properties,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "gantry={level},gantry_common={level},gantry_ilo={level}",
            level = default_level
        ))
    });
    registry()
        .with(filter)
        .with(fmt::layer().with_writer(stderr))
        .init();

    let config = GantryConfig::load(cli.config.as_deref())?;
    let state_dir = cli
        .state_dir
        .or_else(|| config.state_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));
    debug!(state_dir = %state_dir.display(), "Using node store");
    let store: Arc<dyn NodeStore> = Arc::new(DirectoryNodeStore::new(state_dir));

    match cli.command {
        Commands::Capability(command) => cmd::capability::run(command, store).await,
        Commands::Validate { node } => {
            cmd::validate::run(node, store, &config.ilo).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Properties => {
            for (name, description) in gantry_ilo::common_properties() {
                println!("{:<16} {}", name, description);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
