//! Command-line node for the confidential asset contract
//!
//! Runs contract invocations against a local ledger persisted as a JSON
//! snapshot.

use anyhow::{Context, Result};
use asset_contract::Invocation;
use asset_core::OrgId;
use asset_node::runner::{parse_transient_entry, transient_map};
use asset_node::{NodeConfig, NodeRunner, SnapshotFile};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "asset-node")]
#[command(about = "Asset Node - Public/Private Split Asset Contract", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".asset-node/config.toml")]
    config: PathBuf,

    /// Organization (MSP id) the invocation runs as
    #[arg(long, global = true, default_value = "Org1MSP")]
    org: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one contract function and commit its writes
    Invoke {
        /// Function name (CreateAsset, ReadAsset, UpdateAsset, GetAllAssets, InitLedger)
        function: String,

        /// Function arguments
        args: Vec<String>,

        /// Transient entry as key=value
        #[arg(short, long = "transient", value_parser = parse_transient_entry)]
        transient: Vec<(String, Vec<u8>)>,
    },

    /// Seed the demonstration assets on a scratch ledger and list them per organization
    Demo {
        /// Additional organizations to list the assets as
        #[arg(long = "observer", default_value = "Org3MSP")]
        observers: Vec<String>,
    },

    /// Print the resolved configuration
    ShowConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = NodeConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    info!(
        chaincode_id = %config.chaincode_id,
        server_address = %config.server_address,
        collection = %config.contract.collection,
        policy = %config.contract.policy,
        "node configured"
    );

    match cli.command {
        Commands::Invoke {
            function,
            args,
            transient,
        } => {
            let runner = NodeRunner::new(&config)?;
            let snapshot = SnapshotFile::new(&config.state_path);
            snapshot.load_into(runner.peer()).await?;

            let invocation = Invocation::new(function, args);
            let outcome = runner
                .invoke(OrgId::new(cli.org), &invocation, transient_map(transient)?)
                .await
                .with_context(|| format!("{} failed", invocation.function))?;
            if outcome.function.is_write() {
                snapshot.save_from(runner.peer()).await?;
            }
            if !outcome.payload.is_empty() {
                println!("{}", String::from_utf8_lossy(&outcome.payload));
            }
        }

        Commands::Demo { observers } => {
            let runner = NodeRunner::new(&config)?;
            let mut orgs: BTreeSet<OrgId> = config
                .collection()
                .map(|collection| collection.member_orgs())
                .unwrap_or_default();
            orgs.extend(observers.into_iter().map(OrgId::new));

            for (org, assets) in runner.demo(OrgId::new(cli.org), &orgs).await? {
                println!("{org}: {}", serde_json::to_string(&assets)?);
            }
        }

        Commands::ShowConfig => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
