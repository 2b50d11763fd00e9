use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::weather::openweather::OpenWeatherError;

/// Failures a request handler reports back to the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("weather provider unreachable: {0}")]
    UpstreamUnreachable(String),
    #[error("weather provider returned an unreadable response: {0}")]
    UpstreamInvalidResponse(String),
    #[error("no weather data for this location: {0}")]
    LocationNotFound(String),
    #[error("weather provider error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnreachable(_)
            | ApiError::UpstreamInvalidResponse(_)
            | ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UpstreamUnreachable(_) => "upstream_unreachable",
            ApiError::UpstreamInvalidResponse(_) => "upstream_invalid_response",
            ApiError::LocationNotFound(_) => "location_not_found",
            ApiError::Upstream { .. } => "upstream_error",
        }
    }
}

impl From<OpenWeatherError> for ApiError {
    fn from(err: OpenWeatherError) -> Self {
        match err {
            OpenWeatherError::RequestFailed(e) => ApiError::UpstreamUnreachable(e.to_string()),
            OpenWeatherError::JsonParsing(e) => ApiError::UpstreamInvalidResponse(e.to_string()),
            OpenWeatherError::ApiError { status, message } => {
                if status == reqwest::StatusCode::NOT_FOUND {
                    ApiError::LocationNotFound(message)
                } else {
                    ApiError::Upstream {
                        status: status.as_u16(),
                        message,
                    }
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            code: code.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(&self.to_string(), self.code());
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::UpstreamUnreachable("refused".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::UpstreamInvalidResponse("eof".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::LocationNotFound("city not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Upstream { status: 401, message: "Invalid API key".into() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_from_openweather_error() {
        let not_found = ApiError::from(OpenWeatherError::ApiError {
            status: reqwest::StatusCode::NOT_FOUND,
            message: "city not found".into(),
        });
        assert!(matches!(not_found, ApiError::LocationNotFound(ref m) if m == "city not found"));

        let unauthorized = ApiError::from(OpenWeatherError::ApiError {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "Invalid API key".into(),
        });
        assert!(matches!(unauthorized, ApiError::Upstream { status: 401, .. }));

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::from(OpenWeatherError::from(decode)).code(), "upstream_invalid_response");
    }

    #[test]
    fn test_error_response_body() {
        let response = ApiError::LocationNotFound("city not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
