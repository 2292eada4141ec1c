use anyhow::Result;
use clap::{Parser, Subcommand};

/// agentlead - real-estate lead generation website backend
#[derive(Parser)]
#[command(name = "agentlead")]
#[command(about = "Contact form backend for the agentlead website", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = agentlead::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    agentlead::observability::init_observability(
        "agentlead",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => agentlead::server::serve(config, host, port).await,
    }
}
