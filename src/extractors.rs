use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::FetchError;

/// Query parameters for weather/forecast/dashboard requests
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City name from query string
    pub city: Option<String>,
    /// Units: metric, imperial, or standard
    pub units: Option<String>,
}

/// Extracts the city from either path parameter or query parameter
///
/// Checks path first, then falls back to query parameter.
#[derive(Debug)]
pub struct CityParam(pub Option<String>);

impl CityParam {
    /// Resolve the queried city, falling back to the configured default.
    ///
    /// A city that is present but blank after trimming is an `EmptyQuery`,
    /// as is a missing city with a blank configured default.
    pub fn resolve(self, config: &AppConfig) -> Result<String, FetchError> {
        let city = match self.0 {
            Some(city) => city,
            None => config.default_city.clone(),
        };
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyQuery);
        }
        Ok(city.to_string())
    }
}

impl<S> FromRequestParts<S> for CityParam
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Try to extract city from path first
        if let Ok(Path(city)) = Path::<String>::from_request_parts(parts, state).await {
            if !city.is_empty() {
                return Ok(CityParam(Some(city)));
            }
        }

        // Fall back to query parameter
        if let Ok(Query(query)) = Query::<WeatherQuery>::from_request_parts(parts, state).await {
            return Ok(CityParam(query.city));
        }

        // No city provided - handler decides between default and EmptyQuery
        Ok(CityParam(None))
    }
}

/// Extracts units from query parameter
#[derive(Debug)]
pub struct UnitsParam(pub Option<String>);

impl UnitsParam {
    /// Get the units value or use a default
    pub fn or_default(self, default: impl Into<String>) -> String {
        self.0.unwrap_or_else(|| default.into())
    }
}

impl<S> FromRequestParts<S> for UnitsParam
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Query(query)) = Query::<WeatherQuery>::from_request_parts(parts, state).await {
            return Ok(UnitsParam(query.units));
        }

        Ok(UnitsParam(None))
    }
}
