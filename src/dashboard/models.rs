use serde::Serialize;
use utoipa::ToSchema;

/// Render instructions for one dashboard view of a single city.
///
/// `forecast` is absent when the forecast fetch failed while current
/// conditions succeeded; `forecast_notice` then carries the banner text.
#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub current: CurrentCard,
    pub metrics: Vec<MetricTile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_notice: Option<String>,
}

/// Main current-conditions card
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentCard {
    pub city: String,
    pub country: String,
    /// Display temperature, rounded to whole degrees
    pub temperature: i64,
    /// Description with the first letter capitalized
    pub description: String,
    pub icon_url: String,
    /// Observation time label in the city's local time
    pub observed_at: String,
}

/// One labeled metric tile (feels-like, humidity, wind, ...)
#[derive(Debug, Serialize, ToSchema)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastPanel {
    /// First 8 forecast points: 8 x 3h = next 24 hours
    pub next_24h: Vec<ForecastCard>,
    pub chart: ChartSeries,
}

/// One card in the next-24-hours strip
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastCard {
    /// "Today", "Tomorrow", or abbreviated weekday
    pub day: String,
    /// Clock label in the city's local time
    pub time: String,
    pub temperature: i64,
    pub description: String,
    pub icon_url: String,
}

/// Two-row time series over the full forecast window: temperature plus
/// feels-like on one row, humidity on the other. Values are raw floats;
/// rounding is a card concern, not a chart concern.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChartSeries {
    pub timestamps: Vec<i64>,
    pub temperature: Vec<f64>,
    pub feels_like: Vec<f64>,
    pub humidity: Vec<u32>,
}
