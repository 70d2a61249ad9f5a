use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors for a single weather query, shared by the current-weather and
/// forecast fetches.
///
/// Both provider endpoints get the same taxonomy: 404 and 401 are
/// distinguished for the forecast fetch as well, not just for current weather.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("City name must not be empty")]
    EmptyQuery,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather provider rejected the API key")]
    Unauthorized,

    #[error("Weather provider request failed with status {status}")]
    ProviderError { status: u16 },

    #[error("Failed to reach weather provider: {0}")]
    TransportFailure(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Short human message for the degraded-forecast notice.
    pub fn notice(&self) -> String {
        match self {
            Self::CityNotFound(city) => format!("No forecast available for {city}"),
            _ => "Forecast data temporarily unavailable. Showing current conditions only."
                .to_string(),
        }
    }
}

impl HttpError for FetchError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyQuery => StatusCode::BAD_REQUEST,
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::ProviderError { .. } | Self::TransportFailure(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::EmptyQuery => Some("EMPTY_QUERY"),
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::Unauthorized => Some("PROVIDER_UNAUTHORIZED"),
            Self::ProviderError { .. } => Some("PROVIDER_ERROR"),
            Self::TransportFailure(_) => Some("TRANSPORT_FAILURE"),
            Self::MalformedResponse(_) => Some("MALFORMED_RESPONSE"),
        }
    }
}

/// Standard error response format for all API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }

    pub fn with_code(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
        }
    }
}

/// Trait for errors that can be converted to HTTP responses
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Optional error code for programmatic handling (e.g., "CITY_NOT_FOUND")
    fn error_code(&self) -> Option<&'static str> {
        None
    }
}

/// Convert any HttpError into an Axum response
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let code = err.error_code();
    let message = err.to_string();

    tracing::error!(
        error = %message,
        status = %status,
        code = ?code,
        "API error"
    );

    let body = if let Some(code) = code {
        ErrorResponse::with_code(message, code)
    } else {
        ErrorResponse::new(message)
    };

    (status, Json(body)).into_response()
}

/// Macro to implement IntoResponse for HttpError types
#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}

crate::impl_into_response!(FetchError);
