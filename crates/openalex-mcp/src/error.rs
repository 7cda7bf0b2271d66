//! Error types for the OpenAlex MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the OpenAlex API (429 response)
    #[error("Rate limited by OpenAlex, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400/403 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Entity identifier that cannot be placed in a URL path safely
    #[error("Invalid entity identifier: {id}")]
    InvalidIdentifier {
        /// The offending identifier
        id: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Every retry attempt failed; carries the attempt count and last cause
    #[error("{operation} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// The operation that was retried (request path)
        operation: String,
        /// Number of attempts made
        attempts: u32,
        /// Message of the last underlying error
        last_error: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(id: impl Into<String>) -> Self {
        Self::InvalidIdentifier { id: id.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create a retries exhausted error from the last underlying failure.
    #[must_use]
    pub fn retries_exhausted(operation: impl Into<String>, attempts: u32, last: &Self) -> Self {
        Self::RetriesExhausted {
            operation: operation.into(),
            attempts,
            last_error: last.to_string(),
        }
    }

    /// Returns true if this error is worth retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. } | Self::Http(_))
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Input validation failed; every violation is collected before reporting
    #[error("Invalid arguments: {}", .violations.join("; "))]
    Validation {
        /// One entry per violated field, "field: reason"
        violations: Vec<String>,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal tool logic error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a validation error from collected violations.
    #[must_use]
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Validation { violations }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Convert to a user-friendly error message for the MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by the OpenAlex API. Please wait {retry_after:?} before retrying."
                )
            }
            Self::Client(ClientError::NotFound { resource }) => {
                format!("Not found: {resource}. Please check the ID is correct.")
            }
            Self::Validation { violations } => {
                let mut msg = String::from("Invalid arguments:");
                for v in violations {
                    msg.push_str("\n- ");
                    msg.push_str(v);
                }
                msg
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::rate_limited(60).is_retryable());
        assert!(ClientError::server(500, "Internal error").is_retryable());

        assert!(!ClientError::not_found("W123").is_retryable());
        assert!(!ClientError::bad_request("invalid filter").is_retryable());
        assert!(!ClientError::invalid_identifier("a/b").is_retryable());
    }

    #[test]
    fn test_client_error_retry_after() {
        let err = ClientError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::not_found("work");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_retries_exhausted_embeds_attempts_and_cause() {
        let last = ClientError::server(503, "unavailable");
        let err = ClientError::retries_exhausted("/works", 3, &last);

        let msg = err.to_string();
        assert!(msg.contains("/works"));
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("unavailable"));
    }

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ToolError::validation(vec![
            "per_page: must be at most 200".to_string(),
            "entity_type: unknown value 'journals'".to_string(),
        ]);

        let msg = err.to_user_message();
        assert!(msg.contains("per_page"));
        assert!(msg.contains("entity_type"));
    }
}
