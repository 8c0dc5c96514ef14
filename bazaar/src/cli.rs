//! # CLI
//!
//! This module defines the command-line interface of `bazaar` using `clap`.
//!
//! Every argument is optional: with none given, the basic walkthrough runs against
//! `http://localhost:50051`.
use bazaar_core::connection::{ConnectionConfig, DEFAULT_ADDRESS};
use bazaar_core::fixtures::{Fixtures, OrderStatus};
use bazaar_core::walkthrough::{Scenario, Walkthrough};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "bazaar",
    version,
    about = "Scripted walkthrough of the marketplace gRPC API"
)]
pub struct Cli {
    /// The server URL to connect to (e.g. http://localhost:50051)
    #[arg(env = "BAZAAR_URL", default_value = DEFAULT_ADDRESS)]
    pub url: String,

    /// Which walkthrough to run (basic or extended)
    #[arg(long, default_value_t = Scenario::Basic)]
    pub scenario: Scenario,

    /// Status the created order is moved to
    #[arg(long, default_value_t = OrderStatus::Shipped)]
    pub status: OrderStatus,

    /// Send the session token obtained at login with every later call
    #[arg(long)]
    pub attach_token: bool,

    /// Per-call deadline in seconds (0 disables it)
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Connection deadline in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub connect_timeout: u64,

    /// Connect before the first call instead of on first use
    #[arg(long)]
    pub eager: bool,
}

impl Cli {
    pub fn connection_config(&self) -> ConnectionConfig {
        let mut config = ConnectionConfig::new(self.url.as_str())
            .with_connect_timeout(Duration::from_secs(self.connect_timeout));

        config = match self.timeout {
            0 => config.without_request_timeout(),
            secs => config.with_request_timeout(Duration::from_secs(secs)),
        };

        if self.eager {
            config = config.eager();
        }

        config
    }

    pub fn walkthrough(&self) -> Walkthrough {
        Walkthrough::new(self.scenario)
            .with_fixtures(Fixtures::default().with_target_status(self.status))
            .attach_token(self.attach_token)
    }
}
