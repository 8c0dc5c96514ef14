//! # Bazaar CLI Entry Point
//!
//! Drives a single walkthrough run:
//!
//! 1. **Initialization**: Installs the tracing subscriber and parses [`cli::Cli`].
//! 2. **Connection**: Opens the one channel every marketplace client shares.
//! 3. **Execution**: Hands the clients to the walkthrough, which reports each step.
//! 4. **Presentation**: Prints the first failure, if any. The connection is closed by the
//!    walkthrough on every path.

mod cli;
mod formatter;

use bazaar_core::client::MarketplaceClient;
use clap::Parser;
use cli::Cli;
use formatter::{ConsoleReporter, FormattedString};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Cli::parse();
    run(&args).await;
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Cli) {
    let config = args.connection_config();
    tracing::debug!(address = %config.address, scenario = %args.scenario, "starting walkthrough");

    let client = match MarketplaceClient::connect(&config).await {
        Ok(client) => client,
        Err(err) => {
            println!("{}", FormattedString::from(err));
            return;
        }
    };

    let mut reporter = ConsoleReporter;

    if let Err(err) = args.walkthrough().run(client, &mut reporter).await {
        println!("{}", FormattedString::from(err));
    }
}
