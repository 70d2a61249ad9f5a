use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Raw provider schema (5-day/3-hour forecast endpoint, internal)
// Only the fields the normalizer consumes are declared; the rest of the
// provider payload is ignored by serde.
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RawForecast {
    pub list: Vec<RawForecastEntry>,
    pub city: RawCity,
}

#[derive(Debug, Deserialize)]
pub struct RawForecastEntry {
    pub dt: i64,
    pub main: RawEntryMain,
    pub weather: Vec<RawEntryCondition>,
}

#[derive(Debug, Deserialize)]
pub struct RawEntryMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawEntryCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct RawCity {
    pub name: String,
    pub country: String,
    /// City UTC offset in seconds
    pub timezone: i32,
}

// ============================================================================
// API response models (external)
// ============================================================================

/// One 3-hour forecast sample, provider order preserved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ForecastPoint {
    /// Forecast time, unix seconds
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity, percent
    pub humidity: u32,
    pub description: String,
    pub icon: String,
}

/// Normalized 5-day/3-hour forecast: at most 40 points, ascending by
/// timestamp as delivered by the provider. Never re-sorted or deduplicated.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ForecastSeries {
    pub city: String,
    pub country: String,
    /// City UTC offset in seconds, used for local day/time labels
    pub utc_offset: i32,
    pub points: Vec<ForecastPoint>,
}
