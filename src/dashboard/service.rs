use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use super::models::{ChartSeries, CurrentCard, Dashboard, ForecastCard, ForecastPanel, MetricTile};
use crate::error::FetchError;
use crate::forecast::models::ForecastSeries;
use crate::forecast::service::day_label;
use crate::forecast::ForecastService;
use crate::weather::service::CurrentConditions;
use crate::weather::WeatherService;

/// 8 points at 3-hour cadence cover the next 24 hours
const NEXT_24H_POINTS: usize = 8;

/// Icon sizes the provider serves: @4x for the hero card, @2x for strip cards
const CURRENT_ICON_SIZE: u8 = 4;
const FORECAST_ICON_SIZE: u8 = 2;

/// The Presenter: composes normalized weather data into render instructions.
///
/// Runs the two fetches sequentially. A current-conditions failure is
/// terminal for the query; a forecast failure degrades the dashboard to
/// current conditions plus a notice.
pub struct DashboardService {
    weather: Arc<WeatherService>,
    forecast: Arc<ForecastService>,
    icon_base_url: String,
}

impl DashboardService {
    pub fn new(
        weather: Arc<WeatherService>,
        forecast: Arc<ForecastService>,
        icon_base_url: &str,
    ) -> Self {
        Self {
            weather,
            forecast,
            icon_base_url: icon_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn assemble(&self, city: &str, units: &str) -> Result<Dashboard, FetchError> {
        let current = self.weather.get_current(city, units).await?;
        // Independent second fetch; its failure must not sink the query
        let forecast = self.forecast.get_forecast(city, units).await;
        let now_ts = Utc::now().timestamp();

        Ok(self.compose(current, forecast, now_ts))
    }

    fn compose(
        &self,
        current: CurrentConditions,
        forecast: Result<ForecastSeries, FetchError>,
        now_ts: i64,
    ) -> Dashboard {
        let metrics = Self::metric_tiles(&current);

        let current_card = CurrentCard {
            icon_url: self.icon_url(&current.icon, CURRENT_ICON_SIZE),
            observed_at: format_observed(current.timestamp, current.utc_offset),
            temperature: round_display(current.temperature),
            description: capitalize(&current.description),
            city: current.city,
            country: current.country,
        };

        let (panel, notice) = match forecast {
            Ok(series) => (Some(self.forecast_panel(&series, now_ts)), None),
            Err(err) => {
                tracing::warn!(error = %err, "Forecast unavailable, degrading dashboard");
                (None, Some(err.notice()))
            }
        };

        Dashboard {
            current: current_card,
            metrics,
            forecast: panel,
            forecast_notice: notice,
        }
    }

    fn metric_tiles(current: &CurrentConditions) -> Vec<MetricTile> {
        let visibility_km = f64::from(current.visibility) / 1000.0;

        vec![
            tile("Feels Like", round_display(current.feels_like), "°C"),
            tile("Humidity", current.humidity, "%"),
            tile("Wind Speed", current.wind_speed, "m/s"),
            tile("Pressure", current.pressure, "hPa"),
            tile("Visibility", format!("{visibility_km:.1}"), "km"),
            tile(
                "Sunrise",
                format_clock(current.sunrise, current.utc_offset),
                "",
            ),
            tile(
                "Sunset",
                format_clock(current.sunset, current.utc_offset),
                "",
            ),
        ]
    }

    fn forecast_panel(&self, series: &ForecastSeries, now_ts: i64) -> ForecastPanel {
        let next_24h = series
            .points
            .iter()
            .take(NEXT_24H_POINTS)
            .map(|point| ForecastCard {
                day: day_label(point.timestamp, now_ts, series.utc_offset),
                time: format_clock(point.timestamp, series.utc_offset),
                temperature: round_display(point.temperature),
                description: capitalize(&point.description),
                icon_url: self.icon_url(&point.icon, FORECAST_ICON_SIZE),
            })
            .collect();

        let chart = ChartSeries {
            timestamps: series.points.iter().map(|p| p.timestamp).collect(),
            temperature: series.points.iter().map(|p| p.temperature).collect(),
            feels_like: series.points.iter().map(|p| p.feels_like).collect(),
            humidity: series.points.iter().map(|p| p.humidity).collect(),
        };

        ForecastPanel { next_24h, chart }
    }

    fn icon_url(&self, icon: &str, size: u8) -> String {
        format!("{}/{}@{}x.png", self.icon_base_url, icon, size)
    }
}

fn tile(label: &str, value: impl ToString, unit: &str) -> MetricTile {
    MetricTile {
        label: label.to_string(),
        value: value.to_string(),
        unit: unit.to_string(),
    }
}

/// Display rounding for temperatures: half away from zero, so 21.7 shows as
/// 22 and -0.5 as -1.
fn round_display(value: f64) -> i64 {
    value.round() as i64
}

/// Uppercase the first letter only: "light rain" -> "Light rain"
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn format_clock(ts: i64, utc_offset_secs: i32) -> String {
    format_local(ts, utc_offset_secs, "%I:%M %p")
}

fn format_observed(ts: i64, utc_offset_secs: i32) -> String {
    format_local(ts, utc_offset_secs, "%B %d, %Y at %I:%M %p")
}

fn format_local(ts: i64, utc_offset_secs: i32, fmt: &str) -> String {
    let offset = FixedOffset::east_opt(utc_offset_secs).unwrap_or_else(|| Utc.fix());
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&offset).format(fmt).to_string())
        .unwrap_or_default()
}
