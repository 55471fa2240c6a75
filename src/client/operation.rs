//! GraphQL operations with bound variables
//!
//! Operation documents are compile-time constants. Runtime values only
//! ever travel in the `variables` object, so quotes, newlines or braces in
//! user input cannot change the shape of a request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Fault;

/// A single query or mutation against one service
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    name: &'static str,
    root: &'static str,
    document: &'static str,
    variables: Map<String, Value>,
}

impl Operation {
    /// `root` is the top-level field of `data` the result is read from
    pub fn new(name: &'static str, root: &'static str, document: &'static str) -> Self {
        Self {
            name,
            root,
            document,
            variables: Map::new(),
        }
    }

    /// Builder method: bind a variable
    pub fn var(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(key.to_string(), value.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn root(&self) -> &'static str {
        self.root
    }

    pub fn document(&self) -> &'static str {
        self.document
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Look up a bound variable
    pub fn variable(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    /// Request body as posted to the service
    pub fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: self.document,
            operation_name: self.name,
            variables: &self.variables,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody<'a> {
    pub query: &'a str,
    pub operation_name: &'a str,
    pub variables: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: Option<String>,
}

/// Unwrap a GraphQL response envelope into its `data` object
///
/// A non-empty `errors` list wins over any partial `data`.
pub fn parse_envelope(body: Value) -> Result<Value, Fault> {
    let envelope: ResponseEnvelope = serde_json::from_value(body)
        .map_err(|e| Fault::application(format!("Malformed response envelope: {}", e)))?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages = errors
            .into_iter()
            .map(|e| e.message.unwrap_or_else(|| "Unknown error".to_string()))
            .collect();
        return Err(Fault::Application(messages));
    }

    match envelope.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(Fault::application("Response contained no data")),
    }
}
