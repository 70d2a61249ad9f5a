use axum::{extract::State, Json};

use super::models::Dashboard;
use crate::error::FetchError;
use crate::extractors::{CityParam, UnitsParam};
use crate::AppState;

/// Get the composed dashboard for a city
///
/// GET /api/v1/dashboard?city=Oslo&units=metric
/// GET /api/v1/dashboard/{city}?units=metric
///
/// Renders current conditions plus forecast panel; if only the forecast
/// fetch fails the response still carries current conditions and a notice.
pub async fn get_dashboard(
    State(state): State<AppState>,
    city: CityParam,
    units: UnitsParam,
) -> Result<Json<Dashboard>, FetchError> {
    let city = city.resolve(&state.config)?;
    let units = units.or_default(state.config.units.as_str());

    let dashboard = state.dashboard_service.assemble(&city, &units).await?;
    Ok(Json(dashboard))
}
