use axum::{extract::State, Json};

use super::models::ForecastSeries;
use crate::error::FetchError;
use crate::extractors::{CityParam, UnitsParam};
use crate::AppState;

/// Get the normalized 5-day/3-hour forecast for a city
///
/// GET /api/v1/forecast?city=Oslo&units=metric
/// GET /api/v1/forecast/{city}?units=metric
pub async fn get_forecast(
    State(state): State<AppState>,
    city: CityParam,
    units: UnitsParam,
) -> Result<Json<ForecastSeries>, FetchError> {
    let city = city.resolve(&state.config)?;
    let units = units.or_default(state.config.units.as_str());

    let series = state.forecast_service.get_forecast(&city, &units).await?;
    Ok(Json(series))
}
