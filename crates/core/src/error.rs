//! Error types for the FlightDesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//!
//! Only planner faults ever reach the front door: argument, backend and
//! transport failures are rendered to text inside the operations.

use thiserror::Error;

/// The top-level error type for all FlightDesk operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the planning oracle. Fatal to the request that hit them.
#[derive(Debug, Clone, Error)]
pub enum PlannerError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by planner, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Planner not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not parse planner output: `{0}`")]
    MalformedOutput(String),
}

#[derive(Debug, Clone, Error)]
pub enum OperationError {
    #[error("Operation not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_error_displays_correctly() {
        let err = Error::Planner(PlannerError::ApiError {
            status_code: 503,
            message: "Service unavailable".into(),
        });
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service unavailable"));
    }

    #[test]
    fn malformed_output_quotes_the_text() {
        let err = PlannerError::MalformedOutput("I am not sure".into());
        assert_eq!(
            err.to_string(),
            "Could not parse planner output: `I am not sure`"
        );
    }

    #[test]
    fn planner_error_converts_into_top_level() {
        let err: Error = PlannerError::Timeout("30s".into()).into();
        assert!(matches!(err, Error::Planner(PlannerError::Timeout(_))));
        assert_eq!(err.to_string(), "Planner error: Request timed out: 30s");
    }
}
