use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Scanner API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected scanner response: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Scan cancelled: {0}")]
    Cancelled(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TriggerError {
    /// Process exit code reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TriggerError::Config(_) | TriggerError::Yaml(_) => 2,
            TriggerError::Api { .. }
            | TriggerError::Network(_)
            | TriggerError::Timeout(_)
            | TriggerError::Parse(_) => 3,
            TriggerError::Authentication(_) => 4,
            TriggerError::Cancelled(_) => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(TriggerError::Config("x".into()).exit_code(), 2);
        assert_eq!(TriggerError::Api { status: 500, message: "x".into() }.exit_code(), 3);
        assert_eq!(TriggerError::Network("x".into()).exit_code(), 3);
        assert_eq!(TriggerError::Authentication("x".into()).exit_code(), 4);
        assert_eq!(TriggerError::Cancelled("x".into()).exit_code(), 5);
        assert_eq!(TriggerError::Database("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_api_error_display() {
        let err = TriggerError::Api { status: 502, message: "bad gateway".into() };
        assert_eq!(err.to_string(), "Scanner API error (HTTP 502): bad gateway");
    }
}
