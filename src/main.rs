//! tfe - command-line entry point

use clap::Parser;
use log::debug;

use tfe_client::{cli, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    debug!(
        "CLI args: hostname={:?}, org={:?}, ws={:?}, insecure={}, command={:?}",
        cli.hostname, cli.org, cli.ws, cli.insecure, cli.command
    );

    if let Err(e) = cli::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
