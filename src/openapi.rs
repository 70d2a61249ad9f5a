use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dashboard::models::{
    ChartSeries, CurrentCard, Dashboard, ForecastCard, ForecastPanel, MetricTile,
};
use crate::error::ErrorResponse;
use crate::forecast::models::{ForecastPoint, ForecastSeries};
use crate::weather::service::CurrentConditions;

/// OpenAPI documentation for the weatherdash API
///
/// This provides basic schema documentation. Full path annotations
/// can be added incrementally to handlers as needed.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weatherdash API",
        version = "1.0.0",
        description = "Weather dashboard API backed by OpenWeatherMap. Serves normalized current conditions, a 5-day/3-hour forecast, and render-ready dashboard payloads."
    ),
    tags(
        (name = "weather", description = "Current weather conditions"),
        (name = "forecast", description = "5-day/3-hour forecast series"),
        (name = "dashboard", description = "Composed dashboard render instructions")
    ),
    components(
        schemas(
            ErrorResponse,
            CurrentConditions,
            ForecastPoint,
            ForecastSeries,
            Dashboard,
            CurrentCard,
            MetricTile,
            ForecastPanel,
            ForecastCard,
            ChartSeries,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
