use gloo::net::http::Request;
use serde::Deserialize;

use crate::domain::{
    errors::ChartError,
    logging::LogComponent,
    market_data::{CandleEnvelope, CandleRequest, CandleSource},
};
use crate::{log_debug, log_warn};

/// Shown when a failed response carries no usable `error` field
pub const FETCH_FAILED: &str = "Failed to fetch";

/// Body of a non-2xx response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Message to show for a non-2xx response body
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FETCH_FAILED.to_string())
}

/// Parse a 2xx body from the candles endpoint
pub fn parse_candle_envelope(body: &str) -> Result<CandleEnvelope, ChartError> {
    Ok(serde_json::from_str(body)?)
}

/// HTTP client for the backend candles endpoint, built on gloo
#[derive(Clone, Debug, Default)]
pub struct ApiCandleSource {
    base_url: String,
}

impl ApiCandleSource {
    /// `base_url` is prepended to `/api/...`; empty means same origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn url_for(&self, request: &CandleRequest) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), request.path())
    }
}

impl CandleSource for ApiCandleSource {
    async fn fetch(&self, request: &CandleRequest) -> Result<CandleEnvelope, ChartError> {
        let url = self.url_for(request);
        log_debug!(LogComponent::Infrastructure("HTTP"), "🌐 GET: {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ChartError::Network(format!("Request failed: {}", e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| ChartError::Network(format!("Failed to read body: {}", e)))?;

        if !response.ok() {
            log_warn!(
                LogComponent::Infrastructure("HTTP"),
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            );
            return Err(ChartError::Api(api_error_message(&body)));
        }

        parse_candle_envelope(&body)
    }
}
