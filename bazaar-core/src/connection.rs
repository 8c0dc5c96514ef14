//! # Connection
//!
//! Building the single transport every marketplace client shares, and tracking its release.
use std::fmt::Debug;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

/// Default marketplace endpoint.
pub const DEFAULT_ADDRESS: &str = "http://localhost:50051";

/// Errors that can occur when opening the connection to the marketplace.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

/// Configuration for the channel to the marketplace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server address (e.g. `http://localhost:50051`).
    pub address: String,
    /// Deadline for establishing the HTTP/2 connection.
    pub connect_timeout: Option<Duration>,
    /// Deadline applied to every call made over the connection.
    pub request_timeout: Option<Duration>,
    /// When set, the channel connects on first use instead of up front, so an
    /// unreachable server shows up as an `Unavailable` status on the first call.
    pub lazy: bool,
}

impl ConnectionConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into().trim().to_string(),
            connect_timeout: Some(Duration::from_secs(5)),
            request_timeout: Some(Duration::from_secs(10)),
            lazy: true,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    /// Connect up front; failures surface as [`ConnectError::ConnectionFailed`].
    pub fn eager(mut self) -> Self {
        self.lazy = false;
        self
    }

    fn endpoint(&self) -> Result<Endpoint, ConnectError> {
        let mut endpoint = Endpoint::from_shared(self.address.clone())
            .map_err(|e| ConnectError::InvalidUrl(self.address.clone(), e))?;

        if let Some(timeout) = self.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }

        if let Some(timeout) = self.request_timeout {
            endpoint = endpoint.timeout(timeout);
        }

        Ok(endpoint)
    }

    /// Opens the channel described by this config.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn open(&self) -> Result<Channel, ConnectError> {
        let endpoint = self.endpoint()?;

        let channel = if self.lazy {
            endpoint.connect_lazy()
        } else {
            endpoint
                .connect()
                .await
                .map_err(|e| ConnectError::ConnectionFailed(self.address.clone(), e))?
        };

        tracing::debug!(address = %self.address, lazy = self.lazy, "marketplace channel opened");

        Ok(channel)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

type ReleaseHook = Box<dyn FnOnce() + Send + 'static>;

/// Marks the lifetime of the shared transport.
///
/// The guard fires its hook when dropped. The hook is taken out of the guard before it
/// runs, so it can only ever fire once.
#[derive(Default)]
pub struct ReleaseGuard {
    hook: Option<ReleaseHook>,
}

impl ReleaseGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback to run when the connection is released.
    ///
    /// A previously registered callback is replaced.
    pub fn on_release(&mut self, hook: impl FnOnce() + Send + 'static) {
        self.hook = Some(Box::new(hook));
    }
}

impl Debug for ReleaseGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseGuard")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        tracing::debug!("marketplace connection released");
        if let Some(hook) = self.hook.take() {
            hook();
        }
    }
}
