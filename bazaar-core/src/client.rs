//! # Marketplace Client
//!
//! This module bundles the four generated marketplace clients (users, sessions, listings
//! and orders) over a single shared transport.
//!
//! ## How it works
//!
//! The transport `S` is cloned into each generated client. For a [`Channel`] the clones
//! are handles to the same underlying HTTP/2 connection, so the bundle holds exactly one
//! connection. The bundle also owns a [`ReleaseGuard`]: closing or dropping the bundle
//! releases the connection, and a registered release hook observes it exactly once.
//!
//! ## Metadata
//!
//! Every call is wrapped in a request that carries the session token
//! (when one was stored with [`MarketplaceClient::set_token`]) as an `authorization: Bearer`
//! entry and applies the configured per-call deadline.
use crate::{
    BoxError,
    connection::{ConnectError, ConnectionConfig, ReleaseGuard},
    pb::{
        CancelOrderRequest, CancelOrderResponse, GetUserRequest, Listing, ListingCreate,
        ListingsRequest, ListingsResponse, LoginResponse, Order, OrderCreate, OrdersRequest,
        OrdersResponse, UpdateOrderStatusRequest, User, UserCreate, UserLogin,
    },
};
use bazaar_proto::{
    ListingServiceClient, OrderServiceClient, SessionServiceClient, UserServiceClient,
};
use http_body::Body as HttpBody;
use std::time::Duration;
use tonic::{
    Status,
    client::GrpcService,
    metadata::{Ascii, MetadataValue, errors::InvalidMetadataValue},
    transport::Channel,
};

/// Metadata key the session token travels under.
pub const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Debug, thiserror::Error)]
#[error("Session token cannot be sent as metadata: '{0}'")]
pub struct InvalidToken(#[source] pub InvalidMetadataValue);

/// The user, session, listing and order clients sharing one transport.
#[derive(Debug)]
pub struct MarketplaceClient<S = Channel> {
    users: UserServiceClient<S>,
    sessions: SessionServiceClient<S>,
    listings: ListingServiceClient<S>,
    orders: OrderServiceClient<S>,
    token: Option<MetadataValue<Ascii>>,
    request_timeout: Option<Duration>,
    guard: ReleaseGuard,
}

impl MarketplaceClient<Channel> {
    /// Opens the channel described by `config` and builds the client bundle over it.
    ///
    /// # Returns
    ///
    /// * `Ok(MarketplaceClient)` - The client bundle.
    /// * `Err(ConnectError)` - If the URL is invalid or an eager connection fails.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ConnectError> {
        let channel = config.open().await?;
        let mut client = Self::from_service(channel);
        client.request_timeout = config.request_timeout;
        Ok(client)
    }
}

impl<S> MarketplaceClient<S>
where
    S: GrpcService<tonic::body::Body> + Clone,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a client bundle from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Self {
        Self {
            users: UserServiceClient::new(service.clone()),
            sessions: SessionServiceClient::new(service.clone()),
            listings: ListingServiceClient::new(service.clone()),
            orders: OrderServiceClient::new(service),
            token: None,
            request_timeout: None,
            guard: ReleaseGuard::new(),
        }
    }

    /// Sets the deadline sent with every call.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Registers a callback to run when the shared connection is released.
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.guard.on_release(hook);
        self
    }

    /// Stores a session token to be attached to every following call.
    pub fn set_token(&mut self, token: &str) -> Result<(), InvalidToken> {
        let value = MetadataValue::try_from(format!("Bearer {token}")).map_err(InvalidToken)?;
        self.token = Some(value);
        Ok(())
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Releases the shared connection.
    pub fn close(self) {
        drop(self);
    }

    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        if let Some(token) = &self.token {
            request
                .metadata_mut()
                .insert(AUTHORIZATION_HEADER, token.clone());
        }
        if let Some(timeout) = self.request_timeout {
            request.set_timeout(timeout);
        }
        request
    }

    pub async fn create_user(&mut self, message: UserCreate) -> Result<User, Status> {
        let request = self.request(message);
        Ok(self.users.create_user(request).await?.into_inner())
    }

    pub async fn get_user(&mut self, message: GetUserRequest) -> Result<User, Status> {
        let request = self.request(message);
        Ok(self.users.get_user(request).await?.into_inner())
    }

    pub async fn login(&mut self, message: UserLogin) -> Result<LoginResponse, Status> {
        let request = self.request(message);
        Ok(self.sessions.login(request).await?.into_inner())
    }

    pub async fn logout(&mut self) -> Result<(), Status> {
        let request = self.request(());
        self.sessions.logout(request).await?;
        Ok(())
    }

    pub async fn create_listing(&mut self, message: ListingCreate) -> Result<Listing, Status> {
        let request = self.request(message);
        Ok(self.listings.create_listing(request).await?.into_inner())
    }

    pub async fn search_listings(
        &mut self,
        message: ListingsRequest,
    ) -> Result<ListingsResponse, Status> {
        let request = self.request(message);
        Ok(self.listings.get_listings(request).await?.into_inner())
    }

    pub async fn create_order(&mut self, message: OrderCreate) -> Result<Order, Status> {
        let request = self.request(message);
        Ok(self.orders.create_order(request).await?.into_inner())
    }

    pub async fn list_orders(&mut self, message: OrdersRequest) -> Result<OrdersResponse, Status> {
        let request = self.request(message);
        Ok(self.orders.get_orders(request).await?.into_inner())
    }

    pub async fn update_order_status(
        &mut self,
        message: UpdateOrderStatusRequest,
    ) -> Result<Order, Status> {
        let request = self.request(message);
        Ok(self.orders.update_order_status(request).await?.into_inner())
    }

    pub async fn cancel_order(
        &mut self,
        message: CancelOrderRequest,
    ) -> Result<CancelOrderResponse, Status> {
        let request = self.request(message);
        Ok(self.orders.cancel_order(request).await?.into_inner())
    }
}
