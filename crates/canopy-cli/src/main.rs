// CLI for planning and submitting atomic organizational deployments

use clap::{Parser, Subcommand};

mod commands {
    pub mod common;
    pub mod plan;
    pub mod simulate;
    pub mod submit;
}

#[derive(Parser)]
#[command(name = "canopy")]
#[command(about = "Canopy - atomic multisig hierarchy deployments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute predicted addresses and the packed batch, without any RPC
    /// besides the factory creation-code read
    Plan {
        /// Deployment manifest path
        #[arg(short, long, default_value = "canopy.toml")]
        manifest: String,

        /// Target chain (base, sepolia)
        #[arg(short, long, env = "CANOPY_CHAIN")]
        chain: String,

        /// JSON-RPC node URL
        #[arg(short, long, env = "CANOPY_RPC_URL")]
        rpc_url: String,
    },

    /// Plan, then dry-run the packed batch against the multisend executor
    Simulate {
        /// Deployment manifest path
        #[arg(short, long, default_value = "canopy.toml")]
        manifest: String,

        /// Target chain (base, sepolia)
        #[arg(short, long, env = "CANOPY_CHAIN")]
        chain: String,

        /// JSON-RPC node URL
        #[arg(short, long, env = "CANOPY_RPC_URL")]
        rpc_url: String,
    },

    /// Plan, dry-run, then submit via a node-held sender account
    Submit {
        /// Deployment manifest path
        #[arg(short, long, default_value = "canopy.toml")]
        manifest: String,

        /// Target chain (base, sepolia)
        #[arg(short, long, env = "CANOPY_CHAIN")]
        chain: String,

        /// JSON-RPC node URL
        #[arg(short, long, env = "CANOPY_RPC_URL")]
        rpc_url: String,

        /// Sender account held by the node; without it the run stays
        /// read-only
        #[arg(short, long, env = "CANOPY_SENDER")]
        sender: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .init();

    match cli.command {
        Commands::Plan {
            manifest,
            chain,
            rpc_url,
        } => {
            commands::plan::run(&manifest, &chain, &rpc_url).await?;
        }
        Commands::Simulate {
            manifest,
            chain,
            rpc_url,
        } => {
            commands::simulate::run(&manifest, &chain, &rpc_url).await?;
        }
        Commands::Submit {
            manifest,
            chain,
            rpc_url,
            sender,
        } => {
            commands::submit::run(&manifest, &chain, &rpc_url, sender.as_deref()).await?;
        }
    }

    Ok(())
}
