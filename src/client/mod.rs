//! Remote Service Client
//!
//! Typed access to the room, reservation, guest and billing services.
//!
//! ## Architecture
//!
//! - **Operation**: a constant GraphQL document plus bound variables
//! - **ServiceTransport**: executes an operation against one service
//!   (HTTP in production, scripted in tests)
//! - **ServiceClient**: decodes the operation's root field into a typed
//!   result and exposes one method per remote operation
//!
//! Every failure is reported as a [`Fault`].

mod billing;
mod error;
mod guests;
mod operation;
mod reservations;
mod rooms;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Fault, FaultResult};
pub use operation::{parse_envelope, Operation, RequestBody};
pub use transport::{HttpTransport, ServiceKey, ServiceTransport};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ServicesConfig;

/// Typed client over the four hotel services
#[derive(Clone)]
pub struct ServiceClient {
    transport: Arc<dyn ServiceTransport>,
}

impl ServiceClient {
    pub fn new(transport: Arc<dyn ServiceTransport>) -> Self {
        Self { transport }
    }

    /// Client speaking GraphQL over HTTP to the configured endpoints
    pub fn http(config: &ServicesConfig) -> Result<Self, Fault> {
        Ok(Self::new(Arc::new(HttpTransport::new(config.clone())?)))
    }

    /// Run an operation and decode its root field
    ///
    /// A root that is missing or does not match `T` is an
    /// [`Fault::Application`]; use `Option<_>` for nullable roots.
    pub async fn request<T: DeserializeOwned>(
        &self,
        service: ServiceKey,
        operation: &Operation,
    ) -> Result<T, Fault> {
        let started = Instant::now();
        let outcome = self.transport.execute(service, operation).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let mut data = match outcome {
            Ok(data) => {
                tracing::debug!(%service, operation = operation.name(), elapsed_ms, "Request completed");
                data
            }
            Err(fault) => {
                tracing::debug!(
                    %service,
                    operation = operation.name(),
                    elapsed_ms,
                    fault = fault.kind(),
                    error = %fault,
                    "Request failed"
                );
                return Err(fault);
            }
        };

        let payload = data
            .get_mut(operation.root())
            .map(Value::take)
            .unwrap_or(Value::Null);

        serde_json::from_value(payload).map_err(|e| {
            Fault::application(format!(
                "Malformed `{}` payload from {} service: {}",
                operation.root(),
                service,
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedTransport;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_request_decodes_root_field() {
        let transport = ScriptedTransport::new(|_, _| Ok(json!({"deleteBill": true})));
        let client = ServiceClient::new(Arc::new(transport));

        let op = Operation::new("DeleteBill", "deleteBill", "mutation { deleteBill(id: $id) }");
        let deleted: bool = client.request(ServiceKey::Billing, &op).await.unwrap();
        assert!(deleted);
    }

    #[tokio::test]
    async fn test_null_root_decodes_as_none() {
        let transport = ScriptedTransport::new(|_, _| Ok(json!({"reservation": null})));
        let client = ServiceClient::new(Arc::new(transport));

        let op = Operation::new("Reservation", "reservation", "query { reservation }");
        let found: Option<i64> = client.request(ServiceKey::Reservation, &op).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_application_fault() {
        let transport = ScriptedTransport::new(|_, _| Ok(json!({"bills": {"not": "a list"}})));
        let client = ServiceClient::new(Arc::new(transport));

        let op = Operation::new("Bills", "bills", "query { bills }");
        let fault = client
            .request::<Vec<i64>>(ServiceKey::Billing, &op)
            .await
            .unwrap_err();

        match fault {
            Fault::Application(messages) => assert!(messages[0].contains("`bills`")),
            other => panic!("unexpected fault: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_fault_passes_through() {
        let transport = ScriptedTransport::new(|_, _| Err(Fault::Transport(500)));
        let client = ServiceClient::new(Arc::new(transport));

        let op = Operation::new("Bills", "bills", "query { bills }");
        let fault = client
            .request::<Vec<i64>>(ServiceKey::Billing, &op)
            .await
            .unwrap_err();
        assert_eq!(fault, Fault::Transport(500));
    }
}
