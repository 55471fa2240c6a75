//! Service fault taxonomy
//!
//! Every way a service call can fail collapses into one of three kinds so
//! callers can decide between propagating, degrading or retrying.

use thiserror::Error;

/// Failure of a single request to one of the hotel services
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Fault {
    /// No response: connection refused, DNS failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success HTTP status
    #[error("Transport error: HTTP {0}")]
    Transport(u16),

    /// The service answered 200 but reported errors, or the payload was
    /// missing or did not have the expected shape
    #[error("Application error: {}", .0.join("; "))]
    Application(Vec<String>),
}

impl Fault {
    pub fn application(message: impl Into<String>) -> Self {
        Fault::Application(vec![message.into()])
    }

    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::Network(_) => "network",
            Fault::Transport(_) => "transport",
            Fault::Application(_) => "application",
        }
    }
}

impl From<reqwest::Error> for Fault {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Fault::application(format!("Invalid response body: {}", err))
        } else if let Some(status) = err.status() {
            Fault::Transport(status.as_u16())
        } else if err.is_timeout() {
            Fault::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            Fault::Network(format!("Service unavailable: {}", err))
        } else {
            Fault::Network(err.to_string())
        }
    }
}

/// Result type for service calls
pub type FaultResult<T> = Result<T, Fault>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display() {
        assert_eq!(Fault::Transport(502).to_string(), "Transport error: HTTP 502");
        assert_eq!(
            Fault::Application(vec!["Bill not found".into(), "try again".into()]).to_string(),
            "Application error: Bill not found; try again"
        );
        assert_eq!(
            Fault::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
    }

    #[test]
    fn test_fault_kind() {
        assert_eq!(Fault::Network(String::new()).kind(), "network");
        assert_eq!(Fault::Transport(500).kind(), "transport");
        assert_eq!(Fault::application("x").kind(), "application");
    }
}
