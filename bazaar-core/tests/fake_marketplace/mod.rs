//! An in-memory marketplace used to observe what the walkthrough sends.
//!
//! Every call is written to a [`Journal`] before it is served, and any method can be
//! told to fail with a given status.
#![allow(dead_code)]

use bazaar_core::pb::{
    CancelOrderRequest, CancelOrderResponse, GetUserRequest, Listing, ListingCreate,
    ListingsRequest, ListingsResponse, LoginResponse, Order, OrderCreate, OrdersRequest,
    OrdersResponse, Pagination, UpdateOrderStatusRequest, User, UserCreate, UserLogin,
};
use bazaar_proto::{
    ListingService, ListingServiceServer, OrderService, OrderServiceServer, SessionService,
    SessionServiceServer, UserService, UserServiceServer,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tonic::service::Routes;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

pub const FIRST_USER_ID: i32 = 1;
pub const FIRST_LISTING_ID: i32 = 100;
pub const FIRST_ORDER_ID: i32 = 500;

/// Everything the fake received, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    pub calls: Vec<&'static str>,
    pub authorization: Vec<(&'static str, Option<String>)>,
    pub ordered_listing_ids: Vec<i32>,
    pub status_updates: Vec<(i32, String)>,
    pub cancelled_order_ids: Vec<i32>,
}

#[derive(Debug, Default)]
struct State {
    journal: Journal,
    failures: HashMap<&'static str, Status>,
    omit_pagination: bool,
    token: Option<String>,
    users: Vec<(User, String)>,
    listings: Vec<Listing>,
    orders: Vec<Order>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeMarketplace {
    state: Arc<Mutex<State>>,
}

impl FakeMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `method` (e.g. `"CreateOrder"`) fail with `status`.
    pub fn fail_on(self, method: &'static str, status: Status) -> Self {
        self.state.lock().unwrap().failures.insert(method, status);
        self
    }

    /// Answers `GetOrders` without pagination.
    pub fn omit_pagination(self) -> Self {
        self.state.lock().unwrap().omit_pagination = true;
        self
    }

    /// Hands out `token` from `Login` instead of the generated one.
    pub fn with_token(self, token: &str) -> Self {
        self.state.lock().unwrap().token = Some(token.to_string());
        self
    }

    pub fn journal(&self) -> Journal {
        self.state.lock().unwrap().journal.clone()
    }

    pub fn routes(&self) -> Routes {
        Routes::new(UserServiceServer::new(self.clone()))
            .add_service(SessionServiceServer::new(self.clone()))
            .add_service(ListingServiceServer::new(self.clone()))
            .add_service(OrderServiceServer::new(self.clone()))
    }

    /// Serves the fake over a real TCP listener and returns its URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let fake = self.clone();

        tokio::spawn(async move {
            Server::builder()
                .add_service(UserServiceServer::new(fake.clone()))
                .add_service(SessionServiceServer::new(fake.clone()))
                .add_service(ListingServiceServer::new(fake.clone()))
                .add_service(OrderServiceServer::new(fake))
                .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(listener))
                .await
                .unwrap();
        });

        format!("http://{}", addr)
    }

    fn enter<T>(&self, method: &'static str, request: &Request<T>) -> Result<(), Status> {
        let authorization = request
            .metadata()
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut state = self.state.lock().unwrap();
        state.journal.calls.push(method);
        state.journal.authorization.push((method, authorization));

        match state.failures.get(method) {
            Some(status) => Err(status.clone()),
            None => Ok(()),
        }
    }
}

#[tonic::async_trait]
impl UserService for FakeMarketplace {
    async fn create_user(&self, request: Request<UserCreate>) -> Result<Response<User>, Status> {
        self.enter("CreateUser", &request)?;
        let req = request.into_inner();

        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(user, _)| user.email == req.email) {
            return Err(Status::already_exists("Email already exists"));
        }

        let user = User {
            id: FIRST_USER_ID + state.users.len() as i32,
            username: req.username,
            email: req.email,
            created_at: None,
        };
        state.users.push((user.clone(), req.password));

        Ok(Response::new(user))
    }

    async fn get_user(&self, request: Request<GetUserRequest>) -> Result<Response<User>, Status> {
        self.enter("GetUser", &request)?;
        let id = request.into_inner().id;

        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| Response::new(user.clone()))
            .ok_or_else(|| Status::not_found("User not found"))
    }
}

#[tonic::async_trait]
impl SessionService for FakeMarketplace {
    async fn login(
        &self,
        request: Request<UserLogin>,
    ) -> Result<Response<LoginResponse>, Status> {
        self.enter("Login", &request)?;
        let req = request.into_inner();

        let state = self.state.lock().unwrap();
        let (user, _) = state
            .users
            .iter()
            .find(|(user, password)| user.email == req.email && *password == req.password)
            .ok_or_else(|| Status::unauthenticated("Invalid credentials"))?;

        let token = state
            .token
            .clone()
            .unwrap_or_else(|| format!("fake-session-token-for-user-{}", user.id));

        Ok(Response::new(LoginResponse { token }))
    }

    async fn logout(&self, request: Request<()>) -> Result<Response<()>, Status> {
        self.enter("Logout", &request)?;
        Ok(Response::new(()))
    }
}

#[tonic::async_trait]
impl ListingService for FakeMarketplace {
    async fn create_listing(
        &self,
        request: Request<ListingCreate>,
    ) -> Result<Response<Listing>, Status> {
        self.enter("CreateListing", &request)?;
        let req = request.into_inner();

        let mut state = self.state.lock().unwrap();
        let listing = Listing {
            id: FIRST_LISTING_ID + state.listings.len() as i32,
            title: req.title,
            description: req.description,
            price: req.price,
            category: req.category,
            condition: req.condition,
            location: req.location,
            images: Vec::new(),
            user_id: FIRST_USER_ID,
            created_at: None,
            updated_at: None,
        };
        state.listings.push(listing.clone());

        Ok(Response::new(listing))
    }

    async fn get_listings(
        &self,
        request: Request<ListingsRequest>,
    ) -> Result<Response<ListingsResponse>, Status> {
        self.enter("GetListings", &request)?;
        let req = request.into_inner();

        let state = self.state.lock().unwrap();
        let listings = state
            .listings
            .iter()
            .filter(|l| l.title.to_lowercase().contains(&req.search.to_lowercase()))
            .filter(|l| req.price_min <= 0.0 || l.price >= req.price_min)
            .filter(|l| req.price_max <= 0.0 || l.price <= req.price_max)
            .cloned()
            .collect();

        Ok(Response::new(ListingsResponse { listings }))
    }
}

#[tonic::async_trait]
impl OrderService for FakeMarketplace {
    async fn create_order(&self, request: Request<OrderCreate>) -> Result<Response<Order>, Status> {
        self.enter("CreateOrder", &request)?;
        let req = request.into_inner();

        let mut state = self.state.lock().unwrap();
        state.journal.ordered_listing_ids.push(req.listing_id);

        let price = state
            .listings
            .iter()
            .find(|l| l.id == req.listing_id)
            .map(|l| l.price)
            .ok_or_else(|| Status::not_found("Listing not found"))?;

        let order = Order {
            id: FIRST_ORDER_ID + state.orders.len() as i32,
            user_id: FIRST_USER_ID,
            listing_id: req.listing_id,
            quantity: req.quantity,
            total_price: price * f64::from(req.quantity),
            status: "pending".to_string(),
            shipping_address: req.shipping_address,
            buyer_notes: req.buyer_notes,
            ..Order::default()
        };
        state.orders.push(order.clone());

        Ok(Response::new(order))
    }

    async fn get_orders(
        &self,
        request: Request<OrdersRequest>,
    ) -> Result<Response<OrdersResponse>, Status> {
        self.enter("GetOrders", &request)?;
        let req = request.into_inner();

        let state = self.state.lock().unwrap();
        let limit = if req.limit <= 0 { 10 } else { req.limit };
        let total = state.orders.len() as i32;
        let pagination = Pagination {
            total,
            pages: (total + limit - 1) / limit,
        };

        Ok(Response::new(OrdersResponse {
            orders: state.orders.clone(),
            pagination: (!state.omit_pagination).then_some(pagination),
        }))
    }

    async fn update_order_status(
        &self,
        request: Request<UpdateOrderStatusRequest>,
    ) -> Result<Response<Order>, Status> {
        self.enter("UpdateOrderStatus", &request)?;
        let req = request.into_inner();

        let mut state = self.state.lock().unwrap();
        state
            .journal
            .status_updates
            .push((req.id, req.status.clone()));

        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == req.id)
            .ok_or_else(|| Status::not_found("Order not found"))?;
        order.status = req.status;

        Ok(Response::new(order.clone()))
    }

    async fn cancel_order(
        &self,
        request: Request<CancelOrderRequest>,
    ) -> Result<Response<CancelOrderResponse>, Status> {
        self.enter("CancelOrder", &request)?;
        let req = request.into_inner();

        let mut state = self.state.lock().unwrap();
        state.journal.cancelled_order_ids.push(req.id);

        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == req.id)
            .ok_or_else(|| Status::not_found("Order not found"))?;
        order.status = "cancelled".to_string();
        order.cancel_reason = req.cancel_reason;

        Ok(Response::new(CancelOrderResponse {
            message: "Order cancelled successfully".to_string(),
            order: Some(order.clone()),
        }))
    }
}
