use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Alert risk level as reported by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
    Informational,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Informational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Informational => "Informational",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert counts per severity, as returned by `alertsSummary`.
///
/// The scanner keys the object by capitalized severity name. Missing keys
/// count as zero; values may be numbers or numeric strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    #[serde(rename = "High", default, deserialize_with = "count")]
    pub high: u32,
    #[serde(rename = "Medium", default, deserialize_with = "count")]
    pub medium: u32,
    #[serde(rename = "Low", default, deserialize_with = "count")]
    pub low: u32,
    #[serde(rename = "Informational", default, deserialize_with = "count")]
    pub informational: u32,
}

impl AlertSummary {
    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Informational => self.informational,
        }
    }

    pub fn total(&self) -> u32 {
        self.high
            .saturating_add(self.medium)
            .saturating_add(self.low)
            .saturating_add(self.informational)
    }
}

fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_count(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid alert count: {}", value))
    })
}

/// Accepts `3` or `"3"`; the scanner's JSON API encodes most integers as strings.
pub(crate) fn parse_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_from_numbers() {
        let summary: AlertSummary = serde_json::from_value(json!({
            "High": 1, "Medium": 2, "Low": 3, "Informational": 4
        })).unwrap();
        assert_eq!(summary, AlertSummary { high: 1, medium: 2, low: 3, informational: 4 });
        assert_eq!(summary.total(), 10);
    }

    #[test]
    fn test_summary_from_strings() {
        let summary: AlertSummary = serde_json::from_value(json!({
            "High": "0", "Medium": "5", "Low": "12", "Informational": "7"
        })).unwrap();
        assert_eq!(summary.medium, 5);
        assert_eq!(summary.get(Severity::Low), 12);
    }

    #[test]
    fn test_summary_missing_keys_default_to_zero() {
        let summary: AlertSummary = serde_json::from_value(json!({ "High": 2 })).unwrap();
        assert_eq!(summary.high, 2);
        assert_eq!(summary.informational, 0);
    }

    #[test]
    fn test_total_saturates_on_huge_counts() {
        let summary: AlertSummary = serde_json::from_value(json!({
            "High": u32::MAX.to_string(), "Medium": "1", "Low": 2, "Informational": 3
        })).unwrap();
        assert_eq!(summary.total(), u32::MAX);
    }

    #[test]
    fn test_summary_rejects_garbage() {
        let result = serde_json::from_value::<AlertSummary>(json!({ "High": "lots" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_severity_display_order() {
        let names: Vec<String> = Severity::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["High", "Medium", "Low", "Informational"]);
    }
}
