use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "zap": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "host": { "type": "string", "format": "uri" },
                    "api_key": { "type": "string" },
                    "context_id": { "type": "integer", "minimum": 0 },
                    "request_timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "scan": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "poll_interval_secs": { "type": "integer", "minimum": 1 },
                    "max_duration_secs": { "type": "integer", "minimum": 1 },
                    "max_retries": { "type": "integer", "minimum": 0 }
                }
            },
            "storage": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "database": { "type": "string" },
                    "reports_dir": { "type": "string" }
                }
            }
        }
    })
});
