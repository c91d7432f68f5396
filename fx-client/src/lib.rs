//! # FX Client
//!
//! A typed Rust client for the remote exchange rate service.
//!
//! Endpoints: `GET /latest`, `GET /{date}`, `GET /{start}..{end}` and
//! `GET /currencies`, each taking optional `base` and comma-joined
//! `symbols` query parameters.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use fx_types::{CurrencyCode, ExchangeRate, RateProvider, ServiceError, TimeSeries};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Longest error body text carried into a [`ServiceError::Api`] message.
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Exchange rate service client.
pub struct ForexClient {
    base_url: String,
    http: Client,
}

impl ForexClient {
    /// Creates a new client whose requests all use the same `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ServiceError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, ?params, "GET");
        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(transport_error)?;
            serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::warn!(status = status.as_u16(), %message, "rate service returned an error");
            Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait::async_trait]
impl RateProvider for ForexClient {
    async fn get_latest_rates(
        &self,
        base: Option<&CurrencyCode>,
        symbols: &[CurrencyCode],
    ) -> Result<ExchangeRate, ServiceError> {
        self.get("latest", &query_params(base, symbols)).await
    }

    async fn get_historical_rates(
        &self,
        date: NaiveDate,
        base: Option<&CurrencyCode>,
        symbols: &[CurrencyCode],
    ) -> Result<ExchangeRate, ServiceError> {
        let endpoint = date.format("%Y-%m-%d").to_string();
        self.get(&endpoint, &query_params(base, symbols)).await
    }

    async fn get_time_series(
        &self,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        base: Option<&CurrencyCode>,
        symbols: &[CurrencyCode],
    ) -> Result<TimeSeries, ServiceError> {
        let endpoint = time_series_endpoint(start_date, end_date);
        self.get(&endpoint, &query_params(base, symbols)).await
    }

    async fn get_currencies(&self) -> Result<BTreeMap<CurrencyCode, String>, ServiceError> {
        self.get("currencies", &[]).await
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Transport(format!("request timed out: {}", err))
    } else {
        ServiceError::Transport(err.to_string())
    }
}

/// Pulls a one-line, human-readable message out of an error body.
///
/// Uses the JSON `error` or `message` field when present, otherwise the body
/// text with whitespace runs collapsed and its length capped. An empty body
/// falls back to the status reason.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let text = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or_else(|| body.to_string());

    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.is_empty() {
        return status.canonical_reason().unwrap_or_default().to_string();
    }
    if line.chars().count() > MAX_ERROR_MESSAGE_CHARS {
        let cut: String = line.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
        return format!("{}...", cut);
    }
    line
}

fn query_params(
    base: Option<&CurrencyCode>,
    symbols: &[CurrencyCode],
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(base) = base {
        params.push(("base", base.to_string()));
    }
    if !symbols.is_empty() {
        let joined = symbols
            .iter()
            .map(CurrencyCode::as_str)
            .collect::<Vec<_>>()
            .join(",");
        params.push(("symbols", joined));
    }
    params
}

fn time_series_endpoint(start_date: NaiveDate, end_date: Option<NaiveDate>) -> String {
    match end_date {
        Some(end) => format!(
            "{}..{}",
            start_date.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
        None => format!("{}..", start_date.format("%Y-%m-%d")),
    }
}
