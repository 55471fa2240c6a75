//! In-memory transport for exercising the client and aggregator

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Fault, Operation, ServiceKey, ServiceTransport};

type Handler = dyn Fn(ServiceKey, &Operation) -> Result<Value, Fault> + Send + Sync;
type Delay = dyn Fn(ServiceKey, &Operation) -> Option<Duration> + Send + Sync;

/// A transport answering from a closure, recording every call it receives
#[derive(Clone)]
pub struct ScriptedTransport {
    handler: Arc<Handler>,
    delay: Option<Arc<Delay>>,
    calls: Arc<Mutex<Vec<(ServiceKey, Operation)>>>,
}

impl ScriptedTransport {
    /// The handler returns the `data` object for an operation
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(ServiceKey, &Operation) -> Result<Value, Fault> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Builder method: hold individual responses back before answering
    pub fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(ServiceKey, &Operation) -> Option<Duration> + Send + Sync + 'static,
    {
        self.delay = Some(Arc::new(delay));
        self
    }

    pub fn calls(&self) -> Vec<(ServiceKey, Operation)> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the operations issued, in call order
    pub fn operation_names(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, op)| op.name())
            .collect()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, op)| op.name() == name)
            .count()
    }
}

#[async_trait]
impl ServiceTransport for ScriptedTransport {
    async fn execute(&self, service: ServiceKey, operation: &Operation) -> Result<Value, Fault> {
        self.calls
            .lock()
            .unwrap()
            .push((service, operation.clone()));

        if let Some(delay) = self.delay.as_ref().and_then(|d| d(service, operation)) {
            tokio::time::sleep(delay).await;
        }

        (self.handler)(service, operation)
    }
}
