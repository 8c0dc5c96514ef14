use bazaar_core::connection::ConnectError;
use bazaar_core::walkthrough::{
    Reporter, Scenario, Step, StepOutcome, Summary, WalkthroughError, token_preview,
};
use colored::*;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<&StepOutcome> for FormattedString {
    fn from(outcome: &StepOutcome) -> Self {
        let line = match outcome {
            StepOutcome::UserCreated(user) => format!(
                "Created user: ID={}, Username={}, Email={}",
                user.id, user.username, user.email
            ),
            StepOutcome::LoggedIn { token } => {
                format!("Login successful, token: {}", token_preview(token))
            }
            StepOutcome::UserFetched(user) => {
                format!("Retrieved user: ID={}, Username={}", user.id, user.username)
            }
            StepOutcome::ListingCreated(listing) => format!(
                "Created listing: ID={}, Title={}, Price=${:.2}",
                listing.id, listing.title, listing.price
            ),
            StepOutcome::ListingsFound { count } => format!("Found {count} listings"),
            StepOutcome::OrderCreated(order) => format!(
                "Created order: ID={}, Status={}, Total=${:.2}",
                order.id, order.status, order.total_price
            ),
            StepOutcome::OrdersFound {
                count,
                total,
                pages,
            } => format!("Found {count} orders (Total: {total}, Pages: {pages})"),
            StepOutcome::OrderStatusUpdated(order) => {
                format!("Updated order status to: {}", order.status)
            }
            StepOutcome::OrderCancelled { message } => format!("Order cancelled: {message}"),
            StepOutcome::LoggedOut => "Logout successful".to_string(),
        };

        FormattedString(line)
    }
}

impl From<WalkthroughError> for FormattedString {
    fn from(err: WalkthroughError) -> Self {
        match err {
            WalkthroughError::Connect(err) => FormattedString::from(err),
            WalkthroughError::Rpc { step, status } => FormattedString(format!(
                "{} {:?} - {}\n\n(while running step '{}')",
                "gRPC Error:".red().bold(),
                status.code(),
                status.message(),
                step
            )),
            WalkthroughError::Unexpected { step, reason } => FormattedString(format!(
                "{} {}\n\n(while running step '{}')",
                "Error:".red().bold(),
                reason,
                step
            )),
        }
    }
}

impl From<ConnectError> for FormattedString {
    fn from(err: ConnectError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

/// Prints walkthrough progress to standard output.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn walkthrough_started(&mut self, scenario: Scenario) {
        let banner = format!("=== Bazaar gRPC Client Walkthrough ({scenario}) ===");
        println!("{}", banner.as_str().bold());
    }

    fn step_started(&mut self, position: usize, step: Step) {
        println!("\n{}. {}...", position, step.label());
    }

    fn step_completed(&mut self, _position: usize, outcome: &StepOutcome) {
        println!("{}", FormattedString::from(outcome).0);
    }

    fn walkthrough_completed(&mut self, _summary: &Summary) {
        println!(
            "\n{}",
            "=== Walkthrough completed successfully! ===".green().bold()
        );
    }
}
