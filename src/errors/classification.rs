use super::types::TriggerError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl TriggerError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            TriggerError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            TriggerError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            TriggerError::Api { status, .. } => ErrorClassification {
                error_type: "ApiError",
                retryable: *status >= 500,
            },
            TriggerError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                retryable: true,
            },

            // Non-retryable errors
            TriggerError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: false,
            },
            TriggerError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            TriggerError::Parse(_) => ErrorClassification {
                error_type: "ParseError",
                retryable: false,
            },
            TriggerError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                retryable: false,
            },
            TriggerError::Cancelled(_) => ErrorClassification {
                error_type: "CancelledError",
                retryable: false,
            },
            TriggerError::Report(_) => ErrorClassification {
                error_type: "ReportError",
                retryable: false,
            },
            TriggerError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },

            TriggerError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },
            TriggerError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            TriggerError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_retryable() {
        let err = TriggerError::Network("connection refused".into());
        let class = err.classify();
        assert!(class.retryable);
        assert_eq!(class.error_type, "NetworkError");
    }

    #[test]
    fn test_auth_error_not_retryable() {
        let err = TriggerError::Authentication("bad api key".into());
        let class = err.classify();
        assert!(!class.retryable);
        assert_eq!(class.error_type, "AuthenticationError");
    }

    #[test]
    fn test_server_error_retryable() {
        let err = TriggerError::Api { status: 503, message: "unavailable".into() };
        assert!(err.classify().retryable);
    }

    #[test]
    fn test_client_error_not_retryable() {
        let err = TriggerError::Api { status: 400, message: "does_not_exist".into() };
        assert!(!err.classify().retryable);
    }

    #[test]
    fn test_timeout_retryable() {
        let err = TriggerError::Timeout("timed out".into());
        assert!(err.classify().retryable);
    }

    #[test]
    fn test_cancelled_not_retryable() {
        let err = TriggerError::Cancelled("interrupted".into());
        assert!(!err.classify().retryable);
    }

    #[test]
    fn test_parse_not_retryable() {
        let err = TriggerError::Parse("missing field".into());
        assert!(!err.classify().retryable);
    }
}
