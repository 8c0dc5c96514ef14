//! # Walkthrough Runner
//!
//! Executes a [`Scenario`] against the marketplace, one call at a time.
//!
//! Each step waits for the previous one to finish and may consume what an earlier step
//! returned: the listing id from `create listing` is ordered by `create order`, and the
//! order id from `create order` is what `update order status` (and `cancel order`) act on.
//!
//! The first failure stops the run. Whatever happens, the client bundle handed to
//! [`Walkthrough::run`] is closed before it returns, releasing the connection once.
pub mod report;
mod step;

pub use report::{NoopReporter, Reporter, StepOutcome, token_preview};
pub use step::{Scenario, Step};

use crate::{
    BoxError,
    client::MarketplaceClient,
    connection::ConnectError,
    fixtures::Fixtures,
    pb::LoginResponse,
};
use http_body::Body as HttpBody;
use tonic::{Status, client::GrpcService};

/// Errors that stop a walkthrough.
#[derive(Debug, thiserror::Error)]
pub enum WalkthroughError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error("{} failed: {:?} - {}", .step, .status.code(), .status.message())]
    Rpc {
        step: Step,
        #[source]
        status: Status,
    },
    #[error("{step} failed: {reason}")]
    Unexpected { step: Step, reason: String },
}

impl WalkthroughError {
    /// The step that was running when the walkthrough stopped, if any.
    pub fn step(&self) -> Option<Step> {
        match self {
            WalkthroughError::Connect(_) => None,
            WalkthroughError::Rpc { step, .. } | WalkthroughError::Unexpected { step, .. } => {
                Some(*step)
            }
        }
    }

    /// The status reported by the call layer, for remote faults.
    pub fn status(&self) -> Option<&Status> {
        match self {
            WalkthroughError::Rpc { status, .. } => Some(status),
            _ => None,
        }
    }

    fn unexpected(step: Step, reason: impl Into<String>) -> Self {
        WalkthroughError::Unexpected {
            step,
            reason: reason.into(),
        }
    }
}

/// What a walkthrough observed, filled in as steps complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub completed: Vec<Step>,
    pub user_id: Option<i32>,
    pub listing_id: Option<i32>,
    pub order_id: Option<i32>,
    pub order_status: Option<String>,
}

/// A configured walkthrough, ready to run against a [`MarketplaceClient`].
#[derive(Debug, Clone, Default)]
pub struct Walkthrough {
    scenario: Scenario,
    fixtures: Fixtures,
    attach_token: bool,
}

impl Walkthrough {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            ..Self::default()
        }
    }

    pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
        self.fixtures = fixtures;
        self
    }

    /// When enabled, the token returned by `login` is sent with every later call.
    pub fn attach_token(mut self, attach: bool) -> Self {
        self.attach_token = attach;
        self
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Runs every step of the scenario in order, stopping at the first failure.
    ///
    /// Takes ownership of `client` and closes it before returning, on success and on
    /// failure alike.
    pub async fn run<S, R>(
        &self,
        mut client: MarketplaceClient<S>,
        reporter: &mut R,
    ) -> Result<Summary, WalkthroughError>
    where
        S: GrpcService<tonic::body::Body> + Clone,
        S::Error: Into<BoxError>,
        S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
        <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
        R: Reporter + ?Sized,
    {
        reporter.walkthrough_started(self.scenario);

        let result = self.execute(&mut client, reporter).await;
        client.close();

        match &result {
            Ok(summary) => {
                tracing::debug!(
                    scenario = %self.scenario,
                    steps = summary.completed.len(),
                    "walkthrough completed"
                );
                reporter.walkthrough_completed(summary);
            }
            Err(err) => {
                tracing::warn!(scenario = %self.scenario, error = %err, "walkthrough aborted")
            }
        }

        result
    }

    async fn execute<S, R>(
        &self,
        client: &mut MarketplaceClient<S>,
        reporter: &mut R,
    ) -> Result<Summary, WalkthroughError>
    where
        S: GrpcService<tonic::body::Body> + Clone,
        S::Error: Into<BoxError>,
        S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
        <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
        R: Reporter + ?Sized,
    {
        let mut summary = Summary::default();

        for (index, &step) in self.scenario.steps().iter().enumerate() {
            let position = index + 1;
            reporter.step_started(position, step);
            tracing::debug!(position, %step, "running step");

            let outcome = self.perform(step, client, &mut summary).await?;

            summary.completed.push(step);
            reporter.step_completed(position, &outcome);
        }

        Ok(summary)
    }

    async fn perform<S>(
        &self,
        step: Step,
        client: &mut MarketplaceClient<S>,
        summary: &mut Summary,
    ) -> Result<StepOutcome, WalkthroughError>
    where
        S: GrpcService<tonic::body::Body> + Clone,
        S::Error: Into<BoxError>,
        S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
        <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
    {
        let rpc = |status| WalkthroughError::Rpc { step, status };
        let fixtures = &self.fixtures;

        match step {
            Step::CreateUser => {
                let user = client
                    .create_user(fixtures.user_create())
                    .await
                    .map_err(rpc)?;
                summary.user_id = Some(user.id);
                Ok(StepOutcome::UserCreated(user))
            }
            Step::Login => {
                let LoginResponse { token } =
                    client.login(fixtures.user_login()).await.map_err(rpc)?;
                if self.attach_token {
                    client
                        .set_token(&token)
                        .map_err(|e| WalkthroughError::unexpected(step, e.to_string()))?;
                }
                Ok(StepOutcome::LoggedIn { token })
            }
            Step::GetUser => {
                let id = require(step, summary.user_id, "no user was created")?;
                let user = client
                    .get_user(fixtures.get_user(id))
                    .await
                    .map_err(rpc)?;
                Ok(StepOutcome::UserFetched(user))
            }
            Step::CreateListing => {
                let listing = client
                    .create_listing(fixtures.listing_create())
                    .await
                    .map_err(rpc)?;
                summary.listing_id = Some(listing.id);
                Ok(StepOutcome::ListingCreated(listing))
            }
            Step::SearchListings => {
                let found = client
                    .search_listings(fixtures.listings_request())
                    .await
                    .map_err(rpc)?;
                Ok(StepOutcome::ListingsFound {
                    count: found.listings.len(),
                })
            }
            Step::CreateOrder => {
                let listing_id = require(step, summary.listing_id, "no listing was created")?;
                let order = client
                    .create_order(fixtures.order_create(listing_id))
                    .await
                    .map_err(rpc)?;
                summary.order_id = Some(order.id);
                summary.order_status = Some(order.status.clone());
                Ok(StepOutcome::OrderCreated(order))
            }
            Step::ListOrders => {
                let response = client
                    .list_orders(fixtures.orders_request())
                    .await
                    .map_err(rpc)?;
                let pagination = response.pagination.ok_or_else(|| {
                    WalkthroughError::unexpected(step, "response is missing pagination")
                })?;
                Ok(StepOutcome::OrdersFound {
                    count: response.orders.len(),
                    total: pagination.total,
                    pages: pagination.pages,
                })
            }
            Step::UpdateOrderStatus => {
                let order_id = require(step, summary.order_id, "no order was created")?;
                let order = client
                    .update_order_status(fixtures.status_update(order_id))
                    .await
                    .map_err(rpc)?;
                summary.order_status = Some(order.status.clone());
                Ok(StepOutcome::OrderStatusUpdated(order))
            }
            Step::CancelOrder => {
                let order_id = require(step, summary.order_id, "no order was created")?;
                let response = client
                    .cancel_order(fixtures.cancel_order(order_id))
                    .await
                    .map_err(rpc)?;
                if let Some(order) = response.order {
                    summary.order_status = Some(order.status);
                }
                Ok(StepOutcome::OrderCancelled {
                    message: response.message,
                })
            }
            Step::Logout => {
                client.logout().await.map_err(rpc)?;
                client.clear_token();
                Ok(StepOutcome::LoggedOut)
            }
        }
    }
}

/// Fetches an id an earlier step should have produced.
fn require(step: Step, id: Option<i32>, missing: &str) -> Result<i32, WalkthroughError> {
    id.ok_or_else(|| WalkthroughError::unexpected(step, missing))
}
