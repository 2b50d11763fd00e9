use super::types::{CurrentWeatherReport, UpstreamErrorBody};
use super::{COUNTRY_CODE, UNITS};
use crate::config::Config;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenWeatherError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: HTTP {status}: {message}")]
    ApiError { status: StatusCode, message: String },
}

// reqwest errors print the request URL, and ours carries the API key.
impl From<reqwest::Error> for OpenWeatherError {
    fn from(err: reqwest::Error) -> Self {
        OpenWeatherError::RequestFailed(err.without_url())
    }
}

/// Longest slice of a non-JSON error body passed on to callers.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// The ZIP code is interpolated verbatim; the provider does its own validation.
pub fn current_weather_url(base_url: &str, zip_code: &str, token: &str) -> String {
    format!(
        "{}/weather?zip={},{}&units={}&appid={}",
        base_url, zip_code, COUNTRY_CODE, UNITS, token
    )
}

fn redact_token(url: &str, token: &str) -> String {
    if token.is_empty() {
        return url.to_string();
    }
    url.replace(&format!("appid={}", token), "appid=***")
}

fn truncate_error_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, OpenWeatherError> {
        let client = Client::builder()
            .user_agent(concat!("currentweather-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.openweather_base_url.clone(),
            token: config.token.clone(),
            timeout: config.upstream_timeout,
        })
    }

    pub async fn get_current_weather(
        &self,
        zip_code: &str,
    ) -> Result<CurrentWeatherReport, OpenWeatherError> {
        let url = current_weather_url(&self.base_url, zip_code, &self.token);
        tracing::debug!(url = %redact_token(&url, &self.token), "requesting current weather");

        let response = self.client.get(&url).timeout(self.timeout).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<UpstreamErrorBody>(&body)
                .ok()
                .map(|err| err.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| truncate_error_body(&body));
            return Err(OpenWeatherError::ApiError { status, message });
        }

        let report: CurrentWeatherReport = serde_json::from_slice(&body)?;
        Ok(report)
    }
}
