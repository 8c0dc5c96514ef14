//! Progress reporting for a running walkthrough.
use super::{Scenario, Step, Summary};
use crate::pb::{Listing, Order, User};

/// Number of token characters shown in reports.
pub const TOKEN_PREVIEW_LEN: usize = 20;

/// What a completed step produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    UserCreated(User),
    LoggedIn { token: String },
    UserFetched(User),
    ListingCreated(Listing),
    ListingsFound { count: usize },
    OrderCreated(Order),
    OrdersFound { count: usize, total: i32, pages: i32 },
    OrderStatusUpdated(Order),
    OrderCancelled { message: String },
    LoggedOut,
}

impl StepOutcome {
    /// The step this outcome belongs to.
    pub fn step(&self) -> Step {
        match self {
            StepOutcome::UserCreated(_) => Step::CreateUser,
            StepOutcome::LoggedIn { .. } => Step::Login,
            StepOutcome::UserFetched(_) => Step::GetUser,
            StepOutcome::ListingCreated(_) => Step::CreateListing,
            StepOutcome::ListingsFound { .. } => Step::SearchListings,
            StepOutcome::OrderCreated(_) => Step::CreateOrder,
            StepOutcome::OrdersFound { .. } => Step::ListOrders,
            StepOutcome::OrderStatusUpdated(_) => Step::UpdateOrderStatus,
            StepOutcome::OrderCancelled { .. } => Step::CancelOrder,
            StepOutcome::LoggedOut => Step::Logout,
        }
    }
}

/// Shortens a session token for display.
pub fn token_preview(token: &str) -> String {
    let preview: String = token.chars().take(TOKEN_PREVIEW_LEN).collect();
    format!("{preview}...")
}

/// Receives progress notifications from [`super::Walkthrough::run`].
///
/// Positions are 1-based.
pub trait Reporter {
    fn walkthrough_started(&mut self, _scenario: Scenario) {}

    fn step_started(&mut self, _position: usize, _step: Step) {}

    fn step_completed(&mut self, position: usize, outcome: &StepOutcome);

    fn walkthrough_completed(&mut self, _summary: &Summary) {}
}

/// A reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn step_completed(&mut self, _position: usize, _outcome: &StepOutcome) {}
}
