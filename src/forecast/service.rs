use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use reqwest::Client;

use super::models::{ForecastPoint, ForecastSeries, RawForecast};
use crate::error::FetchError;

/// Provider cadence is one point per 3 hours; 40 points cover 5 days.
pub const MAX_FORECAST_POINTS: usize = 40;

pub struct ForecastService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ForecastService {
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and normalize the 5-day/3-hour forecast for a city.
    ///
    /// Same transport contract as the current-weather fetch, including the
    /// 404/401 branches.
    pub async fn get_forecast(&self, city: &str, units: &str) -> Result<ForecastSeries, FetchError> {
        tracing::debug!(city = %city, units = %units, "Fetching forecast");

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[("q", city), ("appid", &self.api_key), ("units", units)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received forecast response");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::CityNotFound(city.to_string()));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FetchError::ProviderError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let raw: RawForecast = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        let series = Self::to_forecast_series(raw)?;

        tracing::info!(
            city = %series.city,
            points = series.points.len(),
            "Forecast fetched"
        );

        Ok(series)
    }

    /// Take the first 40 list entries (or fewer) in provider order.
    /// Downstream consumers rely on the sequence staying ascending by time,
    /// so no sorting or deduplication happens here.
    fn to_forecast_series(raw: RawForecast) -> Result<ForecastSeries, FetchError> {
        let points = raw
            .list
            .into_iter()
            .take(MAX_FORECAST_POINTS)
            .map(|entry| {
                let condition = entry.weather.first().ok_or_else(|| {
                    FetchError::MalformedResponse(
                        "no weather condition in forecast entry".to_string(),
                    )
                })?;
                Ok(ForecastPoint {
                    timestamp: entry.dt,
                    temperature: entry.main.temp,
                    feels_like: entry.main.feels_like,
                    humidity: entry.main.humidity,
                    description: condition.description.clone(),
                    icon: condition.icon.clone(),
                })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok(ForecastSeries {
            city: raw.city.name,
            country: raw.city.country,
            utc_offset: raw.city.timezone,
            points,
        })
    }
}

/// Label a forecast point relative to a reference instant: "Today",
/// "Tomorrow", or the abbreviated weekday name.
///
/// The UTC offset is an explicit input (the provider-reported city offset),
/// so the label never depends on the host timezone.
pub fn day_label(point_ts: i64, now_ts: i64, utc_offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_secs).unwrap_or_else(|| Utc.fix());
    let point_date = local_date(point_ts, offset);
    let now_date = local_date(now_ts, offset);

    if point_date == now_date {
        "Today".to_string()
    } else if Some(point_date) == now_date.succ_opt() {
        "Tomorrow".to_string()
    } else {
        point_date.format("%a").to_string()
    }
}

fn local_date(ts: i64, offset: FixedOffset) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&offset).date_naive())
        .unwrap_or(NaiveDate::MIN)
}
