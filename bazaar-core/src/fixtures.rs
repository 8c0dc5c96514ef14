//! Literal demo data sent by each walkthrough step.
use crate::pb::{
    Address, CancelOrderRequest, GetUserRequest, ListingCreate, ListingsRequest, OrderCreate,
    OrdersRequest, UpdateOrderStatusRequest, UserCreate, UserLogin,
};
use std::fmt::Display;
use std::str::FromStr;

/// Order status literals understood by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status '{0}'. Expected one of: pending, confirmed, shipped, delivered")]
pub struct UnknownOrderStatus(pub String);

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    /// Parses a status an order can be moved to.
    ///
    /// `cancelled` is rejected: orders only reach it through cancellation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            _ => Err(UnknownOrderStatus(s.to_string())),
        }
    }
}

/// The account created and logged into by the walkthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountFixture {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The listing published by the walkthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFixture {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub condition: String,
    pub location: String,
}

/// The search run after publishing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFixture {
    pub term: String,
    pub price_min: f64,
    pub price_max: f64,
}

/// The order placed against the published listing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFixture {
    pub quantity: i32,
    pub shipping_address: Address,
    pub buyer_notes: String,
    pub target_status: OrderStatus,
    pub cancel_reason: String,
    pub page: i32,
    pub limit: i32,
}

/// Everything the walkthrough sends that does not come from an earlier response.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixtures {
    pub account: AccountFixture,
    pub listing: ListingFixture,
    pub search: SearchFixture,
    pub order: OrderFixture,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            account: AccountFixture {
                username: "bazaaruser".to_string(),
                email: "bazaar@example.com".to_string(),
                password: "bazaarpass".to_string(),
            },
            listing: ListingFixture {
                title: "MacBook Pro".to_string(),
                description: "Excellent condition laptop".to_string(),
                price: 1299.99,
                category: "electronics".to_string(),
                condition: "like-new".to_string(),
                location: "San Francisco, CA".to_string(),
            },
            search: SearchFixture {
                term: "MacBook".to_string(),
                price_min: 1000.0,
                price_max: 2000.0,
            },
            order: OrderFixture {
                quantity: 1,
                shipping_address: Address {
                    street: "456 Market St".to_string(),
                    city: "San Francisco".to_string(),
                    state: "CA".to_string(),
                    zip_code: "94102".to_string(),
                    country: "USA".to_string(),
                },
                buyer_notes: "Handle with care".to_string(),
                target_status: OrderStatus::Shipped,
                cancel_reason: "Changed my mind".to_string(),
                page: 1,
                limit: 10,
            },
        }
    }
}

impl Fixtures {
    pub fn with_target_status(mut self, status: OrderStatus) -> Self {
        self.order.target_status = status;
        self
    }

    pub(crate) fn user_create(&self) -> UserCreate {
        UserCreate {
            username: self.account.username.clone(),
            email: self.account.email.clone(),
            password: self.account.password.clone(),
        }
    }

    pub(crate) fn user_login(&self) -> UserLogin {
        UserLogin {
            email: self.account.email.clone(),
            password: self.account.password.clone(),
        }
    }

    pub(crate) fn get_user(&self, id: i32) -> GetUserRequest {
        GetUserRequest { id }
    }

    pub(crate) fn listing_create(&self) -> ListingCreate {
        let listing = &self.listing;
        ListingCreate {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            category: listing.category.clone(),
            condition: listing.condition.clone(),
            location: listing.location.clone(),
            images: Vec::new(),
        }
    }

    pub(crate) fn listings_request(&self) -> ListingsRequest {
        ListingsRequest {
            search: self.search.term.clone(),
            price_min: self.search.price_min,
            price_max: self.search.price_max,
        }
    }

    pub(crate) fn order_create(&self, listing_id: i32) -> OrderCreate {
        OrderCreate {
            listing_id,
            quantity: self.order.quantity,
            shipping_address: Some(self.order.shipping_address.clone()),
            buyer_notes: self.order.buyer_notes.clone(),
        }
    }

    pub(crate) fn orders_request(&self) -> OrdersRequest {
        OrdersRequest {
            user_id: 0,
            status: String::new(),
            page: self.order.page,
            limit: self.order.limit,
        }
    }

    pub(crate) fn status_update(&self, order_id: i32) -> UpdateOrderStatusRequest {
        UpdateOrderStatusRequest {
            id: order_id,
            status: self.order.target_status.to_string(),
        }
    }

    pub(crate) fn cancel_order(&self, order_id: i32) -> CancelOrderRequest {
        CancelOrderRequest {
            id: order_id,
            cancel_reason: self.order.cancel_reason.clone(),
        }
    }
}
