//! # Bazaar Proto
//!
//! Generated bindings for the `marketplace` gRPC contract consumed by the walkthrough.
//!
//! Both halves of the contract are generated. The clients are what `bazaar-core` talks
//! through; the server traits exist so tests can stand up an in-process fake.

pub mod pb {
    tonic::include_proto!("marketplace");
}

pub use pb::listing_service_client::ListingServiceClient;
pub use pb::order_service_client::OrderServiceClient;
pub use pb::session_service_client::SessionServiceClient;
pub use pb::user_service_client::UserServiceClient;

pub use pb::listing_service_server::{ListingService, ListingServiceServer};
pub use pb::order_service_server::{OrderService, OrderServiceServer};
pub use pb::session_service_server::{SessionService, SessionServiceServer};
pub use pb::user_service_server::{UserService, UserServiceServer};
