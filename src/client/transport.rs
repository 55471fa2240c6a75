//! Transport seam between the typed client and the wire

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{operation::parse_envelope, Fault, Operation};
use crate::config::ServicesConfig;

/// The four independent backend services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    Room,
    Reservation,
    Guest,
    Billing,
}

impl ServiceKey {
    pub fn all() -> &'static [ServiceKey] {
        &[
            ServiceKey::Room,
            ServiceKey::Reservation,
            ServiceKey::Guest,
            ServiceKey::Billing,
        ]
    }
}

impl std::fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKey::Room => write!(f, "room"),
            ServiceKey::Reservation => write!(f, "reservation"),
            ServiceKey::Guest => write!(f, "guest"),
            ServiceKey::Billing => write!(f, "billing"),
        }
    }
}

/// Executes an operation against a service and yields the `data` object
#[async_trait]
pub trait ServiceTransport: Send + Sync {
    async fn execute(&self, service: ServiceKey, operation: &Operation) -> Result<Value, Fault>;
}

/// GraphQL-over-HTTP transport
pub struct HttpTransport {
    client: Client,
    endpoints: ServicesConfig,
}

impl HttpTransport {
    /// Create a transport for the configured endpoints
    ///
    /// Every request is bounded by `request_timeout_ms`; expiry surfaces as
    /// [`Fault::Network`].
    pub fn new(endpoints: ServicesConfig) -> Result<Self, Fault> {
        let client = Client::builder()
            .timeout(Duration::from_millis(endpoints.request_timeout_ms))
            .user_agent(concat!("frontdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Fault::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoints })
    }
}

#[async_trait]
impl ServiceTransport for HttpTransport {
    async fn execute(&self, service: ServiceKey, operation: &Operation) -> Result<Value, Fault> {
        let url = self.endpoints.endpoint(service);
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::trace!(
            %service,
            operation = operation.name(),
            request_id = %request_id,
            url,
            "Sending request"
        );

        let response = self
            .client
            .post(url)
            .header("x-request-id", &request_id)
            .json(&operation.body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Fault::Transport(status.as_u16()));
        }

        let body: Value = response.json().await?;
        parse_envelope(body)
    }
}
