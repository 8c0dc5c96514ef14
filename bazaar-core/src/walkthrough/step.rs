use std::fmt::Display;
use std::str::FromStr;

/// A single remote call made by the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CreateUser,
    Login,
    GetUser,
    CreateListing,
    SearchListings,
    CreateOrder,
    ListOrders,
    UpdateOrderStatus,
    CancelOrder,
    Logout,
}

impl Step {
    /// Progress label shown while the step runs (e.g. `Creating user`).
    pub fn label(&self) -> &'static str {
        match self {
            Step::CreateUser => "Creating user",
            Step::Login => "Logging in",
            Step::GetUser => "Getting user",
            Step::CreateListing => "Creating listing",
            Step::SearchListings => "Searching listings",
            Step::CreateOrder => "Creating order",
            Step::ListOrders => "Getting orders",
            Step::UpdateOrderStatus => "Updating order status",
            Step::CancelOrder => "Cancelling order",
            Step::Logout => "Logging out",
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::CreateUser => "create user",
            Step::Login => "login",
            Step::GetUser => "get user",
            Step::CreateListing => "create listing",
            Step::SearchListings => "search listings",
            Step::CreateOrder => "create order",
            Step::ListOrders => "list orders",
            Step::UpdateOrderStatus => "update order status",
            Step::CancelOrder => "cancel order",
            Step::Logout => "logout",
        };
        f.write_str(name)
    }
}

/// The ordered list of steps a walkthrough executes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scenario {
    /// Create user, login, create listing, search, create order, update its status.
    #[default]
    Basic,
    /// The basic flow plus fetching the user, listing orders, cancelling the order and
    /// logging out.
    Extended,
}

const BASIC: &[Step] = &[
    Step::CreateUser,
    Step::Login,
    Step::CreateListing,
    Step::SearchListings,
    Step::CreateOrder,
    Step::UpdateOrderStatus,
];

const EXTENDED: &[Step] = &[
    Step::CreateUser,
    Step::Login,
    Step::GetUser,
    Step::CreateListing,
    Step::SearchListings,
    Step::CreateOrder,
    Step::ListOrders,
    Step::UpdateOrderStatus,
    Step::CancelOrder,
    Step::Logout,
];

impl Scenario {
    pub fn steps(&self) -> &'static [Step] {
        match self {
            Scenario::Basic => BASIC,
            Scenario::Extended => EXTENDED,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Basic => "basic",
            Scenario::Extended => "extended",
        }
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Scenario::Basic),
            "extended" => Ok(Scenario::Extended),
            other => Err(format!(
                "Unknown scenario '{other}'. Expected 'basic' or 'extended'"
            )),
        }
    }
}
