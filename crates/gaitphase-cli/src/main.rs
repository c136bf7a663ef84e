//! Gaitphase CLI Entry Point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gaitphase_cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay(args) => {
            gaitphase_cli::replay::execute(args)?;
        }
        Commands::Version => {
            println!("gaitphase {}", env!("CARGO_PKG_VERSION"));
            println!("core version: {}", gaitphase_core::VERSION);
            println!("tracker version: {}", gaitphase_tracker::VERSION);
        }
    }

    Ok(())
}
