//! # Bazaar Core
//!
//! `bazaar-core` drives a scripted walkthrough of the marketplace gRPC API: it creates a
//! user, logs in, publishes a listing, searches for it, orders it and moves the order
//! along, threading the identifiers returned by each call into the next one.
//!
//! ## Key Components
//!
//! * **[`connection::ConnectionConfig`]:** Where and how to reach the marketplace.
//! * **[`client::MarketplaceClient`]:** The user, session, listing and order clients
//!   bundled over a single shared transport. Dropping (or closing) the bundle releases
//!   that transport exactly once.
//! * **[`walkthrough::Walkthrough`]:** The runner. It executes a [`walkthrough::Scenario`]
//!   step by step, reports progress through a [`walkthrough::Reporter`] and stops at
//!   the first failure.
//! * **[`fixtures::Fixtures`]:** The literal demo data sent by each step.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bazaar_core::client::MarketplaceClient;
//! use bazaar_core::connection::ConnectionConfig;
//! use bazaar_core::walkthrough::{NoopReporter, Walkthrough};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionConfig::new("http://localhost:50051");
//! let client = MarketplaceClient::connect(&config).await?;
//!
//! let summary = Walkthrough::default().run(client, &mut NoopReporter).await?;
//! println!("order {:?} is now {:?}", summary.order_id, summary.order_status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports `tonic` and the generated bindings so consumers
//! use compatible versions of both.
pub mod client;
pub mod connection;
pub mod fixtures;
pub mod walkthrough;

// Re-exports
pub use bazaar_proto::pb;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
