use reqwest::Client;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::FetchError;

/// Normalized current conditions for one city at one fetch instant.
///
/// Numeric fields are the provider's raw floats; rounding for display happens
/// in the dashboard layer only.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    /// Observation time, unix seconds
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity, percent
    pub humidity: u32,
    /// Pressure, hPa
    pub pressure: u32,
    /// Wind speed, m/s for metric units
    pub wind_speed: f64,
    /// Visibility in meters; 0 when the provider omits it.
    /// Conversion to km is a presentation concern.
    pub visibility: u32,
    pub description: String,
    pub icon: String,
    /// Sunrise, unix seconds
    pub sunrise: i64,
    /// Sunset, unix seconds
    pub sunset: i64,
    /// City UTC offset in seconds, used for local time labels
    pub utc_offset: i32,
}

// ============================================================================
// Raw provider schema (current weather endpoint)
// Non-optional fields are required; their absence fails the whole parse.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawCurrentWeather {
    name: String,
    dt: i64,
    timezone: i32,
    sys: RawSys,
    main: RawMain,
    weather: Vec<RawCondition>,
    wind: RawWind,
    #[serde(default)]
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct RawSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    temp: f64,
    feels_like: f64,
    humidity: u32,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: f64,
}

pub struct WeatherService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherService {
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and normalize current conditions for a city.
    ///
    /// Single attempt, no retries. 404 and 401 are mapped to their own error
    /// kinds; any other non-success status carries the code.
    pub async fn get_current(
        &self,
        city: &str,
        units: &str,
    ) -> Result<CurrentConditions, FetchError> {
        tracing::debug!(city = %city, units = %units, "Fetching current weather");

        // Query builder handles URL encoding for city names with spaces
        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", city), ("appid", &self.api_key), ("units", units)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received current weather response");

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
        let raw: RawCurrentWeather = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        let conditions = Self::to_current_conditions(raw)?;

        tracing::info!(
            city = %conditions.city,
            temp = %conditions.temperature,
            "Current weather fetched"
        );

        Ok(conditions)
    }

    fn to_current_conditions(raw: RawCurrentWeather) -> Result<CurrentConditions, FetchError> {
        let condition = raw.weather.first().ok_or_else(|| {
            FetchError::MalformedResponse("no weather condition in response".to_string())
        })?;

        Ok(CurrentConditions {
            city: raw.name.clone(),
            country: raw.sys.country.clone(),
            timestamp: raw.dt,
            temperature: raw.main.temp,
            feels_like: raw.main.feels_like,
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            wind_speed: raw.wind.speed,
            visibility: raw.visibility,
            description: condition.description.clone(),
            icon: condition.icon.clone(),
            sunrise: raw.sys.sunrise,
            sunset: raw.sys.sunset,
            utc_offset: raw.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_raw() -> RawCurrentWeather {
        RawCurrentWeather {
            name: "Oslo".to_string(),
            dt: 1_756_000_000,
            timezone: 7200,
            sys: RawSys {
                country: "NO".to_string(),
                sunrise: 1_755_980_000,
                sunset: 1_756_030_000,
            },
            main: RawMain {
                temp: 21.7,
                feels_like: 20.9,
                humidity: 58,
                pressure: 1013,
            },
            weather: vec![RawCondition {
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
            wind: RawWind { speed: 3.6 },
            visibility: 9700,
        }
    }

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Oslo",
            "dt": 1_756_000_000_i64,
            "timezone": 7200,
            "sys": {"country": "NO", "sunrise": 1_755_980_000_i64, "sunset": 1_756_030_000_i64},
            "main": {"temp": 21.7, "feels_like": 20.9, "humidity": 58, "pressure": 1013},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "wind": {"speed": 3.6, "deg": 220},
            "visibility": 9700
        })
    }

    fn test_service(base_url: &str) -> WeatherService {
        WeatherService::new(Client::new(), "test_api_key", base_url)
    }

    #[test]
    fn test_transform_preserves_every_field() {
        let conditions = WeatherService::to_current_conditions(sample_raw()).unwrap();

        assert_eq!(conditions.city, "Oslo");
        assert_eq!(conditions.country, "NO");
        assert_eq!(conditions.timestamp, 1_756_000_000);
        assert_eq!(conditions.temperature, 21.7);
        assert_eq!(conditions.feels_like, 20.9);
        assert_eq!(conditions.humidity, 58);
        assert_eq!(conditions.pressure, 1013);
        assert_eq!(conditions.wind_speed, 3.6);
        assert_eq!(conditions.visibility, 9700);
        assert_eq!(conditions.description, "light rain");
        assert_eq!(conditions.icon, "10d");
        assert_eq!(conditions.sunrise, 1_755_980_000);
        assert_eq!(conditions.sunset, 1_756_030_000);
        assert_eq!(conditions.utc_offset, 7200);
    }

    #[test]
    fn test_transform_rejects_empty_weather_array() {
        let mut raw = sample_raw();
        raw.weather.clear();

        let result = WeatherService::to_current_conditions(raw);
        assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_visibility_defaults_to_zero_meters() {
        let mut body = sample_body();
        body.as_object_mut().unwrap().remove("visibility");

        let raw: RawCurrentWeather = serde_json::from_value(body).unwrap();
        let conditions = WeatherService::to_current_conditions(raw).unwrap();
        assert_eq!(conditions.visibility, 0);
    }

    #[tokio::test]
    async fn test_get_current_success_sends_expected_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Oslo"))
            .and(query_param("appid", "test_api_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let result = service.get_current("Oslo", "metric").await;

        assert!(result.is_ok(), "Expected success, got: {result:?}");
        let conditions = result.unwrap();
        assert_eq!(conditions.city, "Oslo");
        assert_eq!(conditions.temperature, 21.7);
    }

    #[tokio::test]
    async fn test_get_current_404_is_city_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let result = service.get_current("Atlantis", "metric").await;

        assert!(
            matches!(result, Err(FetchError::CityNotFound(ref city)) if city == "Atlantis"),
            "Expected CityNotFound, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_get_current_401_is_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"cod": 401, "message": "Invalid API key"})),
            )
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let result = service.get_current("Oslo", "metric").await;

        assert!(
            matches!(result, Err(FetchError::Unauthorized)),
            "Expected Unauthorized, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_get_current_500_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let result = service.get_current("Oslo", "metric").await;

        assert!(
            matches!(result, Err(FetchError::ProviderError { status: 500 })),
            "Expected ProviderError, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_get_current_unparseable_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let result = service.get_current("Oslo", "metric").await;

        assert!(
            matches!(result, Err(FetchError::MalformedResponse(_))),
            "Expected MalformedResponse, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_get_current_missing_required_field_is_malformed() {
        let server = MockServer::start().await;

        let mut body = sample_body();
        body.as_object_mut().unwrap().remove("main");

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let result = service.get_current("Oslo", "metric").await;

        assert!(
            matches!(result, Err(FetchError::MalformedResponse(_))),
            "Expected MalformedResponse, got: {result:?}"
        );
    }
}
