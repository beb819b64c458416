use crate::errors::TriggerError;

const DANGEROUS_MARKUP: &[&str] = &["<script"];

const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
];

/// Checked separately by the http/https host validation.
const SKIPPED_PATHS: &[&str] = &["zap.host"];

pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), TriggerError> {
    check_value(value, &[])?;
    Ok(())
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), TriggerError> {
    match value {
        serde_yaml::Value::String(s) => {
            let path_str = if path.is_empty() { "root".to_string() } else { path.join(".") };
            if SKIPPED_PATHS.iter().any(|p| *p == path_str) {
                return Ok(());
            }

            let lower = s.trim().to_lowercase();
            let found = DANGEROUS_MARKUP.iter().find(|p| lower.contains(*p))
                .or_else(|| DANGEROUS_SCHEMES.iter().find(|p| lower.starts_with(*p)));
            if let Some(pattern) = found {
                return Err(TriggerError::Config(
                    format!("Dangerous pattern '{}' found at config path: {}", pattern, path_str)
                ));
            }
            Ok(())
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_config_passes() {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>(
            "zap:\n  host: http://localhost:8082\nstorage:\n  database: ./db/scan_db.sqlite"
        ).unwrap();
        assert!(validate_security_patterns(&yaml).is_ok());
    }

    #[test]
    fn test_file_scheme_reports_dir_rejected() {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>(
            "storage:\n  reports_dir: \" FILE:///etc/cron.d\""
        ).unwrap();
        let err = validate_security_patterns(&yaml).unwrap_err();
        assert!(err.to_string().contains("storage.reports_dir"));
    }

    #[test]
    fn test_hostnames_containing_scheme_words_pass() {
        for host in ["http://metadata:8080", "http://profile:8082", "http://zapdata:8082"] {
            let yaml = serde_yaml::from_str::<serde_yaml::Value>(
                &format!("zap:\n  host: {}", host)
            ).unwrap();
            assert!(validate_security_patterns(&yaml).is_ok(), "{} rejected", host);
        }
    }

    #[test]
    fn test_scheme_words_inside_paths_pass() {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>(
            "storage:\n  database: ./metadata:cache/scans.sqlite"
        ).unwrap();
        assert!(validate_security_patterns(&yaml).is_ok());
    }

    #[test]
    fn test_script_in_nested_value_rejected() {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>(
            "storage:\n  reports_dir: \"<SCRIPT>alert(1)</script>\""
        ).unwrap();
        assert!(validate_security_patterns(&yaml).is_err());
    }
}
