use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Redact sensitive values in a string. Replaces known credential patterns
/// with [REDACTED].
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if !secret.is_empty() && secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("changeme"), "changeme");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_ZAPTRIGGER_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_ZAPTRIGGER_CRED"), "secret123");
        std::env::remove_var("TEST_ZAPTRIGGER_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        let result = resolve_credential("$NONEXISTENT_ZAPTRIGGER_VAR");
        assert_eq!(result, "$NONEXISTENT_ZAPTRIGGER_VAR");
    }

    #[test]
    fn test_redact_credentials_in_url() {
        let text = "error sending request for url (http://localhost:8082/JSON/ascan/view/status/?apikey=k3yk3y&scanId=0)";
        let redacted = redact_credentials(text, &["k3yk3y"]);
        assert!(redacted.contains("apikey=[REDACTED]"));
        assert!(!redacted.contains("k3yk3y"));
    }

    #[test]
    fn test_redact_credentials_short_secret_ignored() {
        let text = "key=ab";
        let redacted = redact_credentials(text, &["ab"]);
        assert_eq!(redacted, "key=ab"); // too short to redact
    }
}
