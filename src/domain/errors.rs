use thiserror::Error;

/// Message shown to the user whenever a report request fails.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to generate business report. The model may be unavailable or the request may have timed out.";

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Required configuration is missing; the planner cannot be used at all.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A single report request failed. The cause is logged, never displayed.
    #[error("Failed to generate business report. The model may be unavailable or the request may have timed out.")]
    RequestFailed,
}

impl ReportError {
    /// Text suitable for the error panel.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message() {
        assert_eq!(ReportError::RequestFailed.to_string(), REQUEST_FAILED_MESSAGE);
        assert_eq!(ReportError::RequestFailed.user_message(), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn test_configuration_message() {
        let error = ReportError::Configuration("API_KEY environment variable not set".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: API_KEY environment variable not set"
        );
    }
}
