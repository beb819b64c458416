use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::credentials::redact_credentials;
use crate::config::Settings;
use crate::errors::TriggerError;
use crate::models::AlertSummary;
use super::api::ScannerApi;

const START_SCAN_PATH: &str = "/JSON/ascan/action/scan/";
const STOP_SCAN_PATH: &str = "/JSON/ascan/action/stop/";
const SCAN_STATUS_PATH: &str = "/JSON/ascan/view/status/";
const ALERTS_SUMMARY_PATH: &str = "/JSON/alert/view/alertsSummary/";
const HTML_REPORT_PATH: &str = "/OTHER/core/other/htmlreport/";

/// reqwest-backed client for the ZAP JSON/OTHER API.
pub struct ZapClient {
    client: Client,
    host: String,
    api_key: String,
}

impl ZapClient {
    pub fn new(host: &str, api_key: &str, timeout: Duration) -> Result<Self, TriggerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriggerError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TriggerError> {
        Self::new(
            &settings.host,
            &settings.api_key,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Issue a GET with the API key and `params` as query parameters.
    /// Anything other than 200 OK is logged and returned as an error.
    async fn get(&self, path: &str, params: &[(&str, String)], action: &str) -> Result<Response, TriggerError> {
        let url = format!("{}{}", self.host, path);
        let mut query: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str())];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        debug!(url = %url, "Scanner request");
        let resp = self.client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                let message = redact_credentials(&e.to_string(), &[&self.api_key]);
                if e.is_timeout() {
                    TriggerError::Timeout(format!("Failed to {}: {}", action, message))
                } else {
                    TriggerError::Network(format!("Failed to {}: {}", action, message))
                }
            })?;

        let status = resp.status();
        if status == StatusCode::OK {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let (code, detail) = parse_api_error(&body);
        error!(status = status.as_u16(), path = %path, code = %code, "Failed to {}", action);

        let message = if detail.is_empty() {
            format!("Failed to {}", action)
        } else {
            format!("Failed to {}: {}", action, detail)
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || code == "bad_api_key" {
            return Err(TriggerError::Authentication(message));
        }
        Err(TriggerError::Api { status: status.as_u16(), message })
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)], action: &str) -> Result<Value, TriggerError> {
        let resp = self.get(path, params, action).await?;
        resp.json::<Value>().await
            .map_err(|e| TriggerError::Parse(format!("Failed to {}: invalid JSON: {}", action, e)))
    }
}

#[async_trait]
impl ScannerApi for ZapClient {
    async fn start_scan(&self, context_id: u32) -> Result<i64, TriggerError> {
        let data = self.get_json(
            START_SCAN_PATH,
            &[("contextId", context_id.to_string())],
            "trigger scan",
        ).await?;

        let scan = data.get("scan")
            .ok_or_else(|| TriggerError::Parse("No 'scan' field in start response".into()))?;
        as_integer(scan)
            .ok_or_else(|| TriggerError::Parse(format!("Invalid scan id: {}", scan)))
    }

    async fn scan_progress(&self, scan_id: i64) -> Result<u8, TriggerError> {
        let data = self.get_json(
            SCAN_STATUS_PATH,
            &[("scanId", scan_id.to_string())],
            "get the status",
        ).await?;

        let status = data.get("status")
            .ok_or_else(|| TriggerError::Parse("No 'status' field in status response".into()))?;
        let progress = as_integer(status)
            .ok_or_else(|| TriggerError::Parse(format!("Invalid scan status: {}", status)))?;
        Ok(progress.clamp(0, 100) as u8)
    }

    async fn alerts_summary(&self) -> Result<AlertSummary, TriggerError> {
        let data = self.get_json(ALERTS_SUMMARY_PATH, &[], "get the summary").await?;

        let summary = data.get("alertsSummary")
            .cloned()
            .ok_or_else(|| TriggerError::Parse("No 'alertsSummary' field in summary response".into()))?;
        serde_json::from_value(summary)
            .map_err(|e| TriggerError::Parse(format!("Invalid alerts summary: {}", e)))
    }

    async fn html_report(&self) -> Result<String, TriggerError> {
        let resp = self.get(HTML_REPORT_PATH, &[], "create report").await?;
        let bytes = resp.bytes().await
            .map_err(|e| TriggerError::Network(format!("Failed to read report body: {}", e)))?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| TriggerError::Parse(format!("Report is not valid UTF-8: {}", e)))
    }

    async fn stop_scan(&self, scan_id: i64) -> Result<(), TriggerError> {
        self.get_json(
            STOP_SCAN_PATH,
            &[("scanId", scan_id.to_string())],
            "stop scan",
        ).await?;
        Ok(())
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// The scanner encodes integers as JSON strings ("0", "42"); accept both forms.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extract `(code, message)` from a ZAP error body, if it is one.
fn parse_api_error(body: &str) -> (String, String) {
    match serde_json::from_str::<Value>(body) {
        Ok(v) => (
            v["code"].as_str().unwrap_or("").to_string(),
            v["message"].as_str().unwrap_or("").to_string(),
        ),
        Err(_) => (String::new(), String::new()),
    }
}
