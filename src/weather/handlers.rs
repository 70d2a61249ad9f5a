use axum::{extract::State, Json};
use serde::Serialize;

use super::service::CurrentConditions;
use crate::error::FetchError;
use crate::extractors::{CityParam, UnitsParam};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Get current conditions for a city
///
/// GET /api/v1/weather?city=Oslo&units=metric
/// GET /api/v1/weather/{city}?units=metric
pub async fn get_current(
    State(state): State<AppState>,
    city: CityParam,
    units: UnitsParam,
) -> Result<Json<CurrentConditions>, FetchError> {
    let city = city.resolve(&state.config)?;
    let units = units.or_default(state.config.units.as_str());

    let conditions = state.weather_service.get_current(&city, &units).await?;
    Ok(Json(conditions))
}
