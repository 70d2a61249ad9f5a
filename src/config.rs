use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key (injected, never a source literal)
    pub openweathermap_api_key: String,

    /// Base URL for the OpenWeatherMap data API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL for weather icon assets
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// Default city for weather queries
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Temperature units: metric, imperial, or standard
    #[serde(default = "default_units")]
    pub units: String,

    /// Per-request timeout for provider calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_icon_base_url() -> String {
    "https://openweathermap.org/img/wn".to_string()
}

fn default_city() -> String {
    "London".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Start with default values
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("default_city", default_city())?
            .set_default("units", default_units())?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with WEATHERDASH_)
            // Convert SCREAMING_SNAKE_CASE env vars to snake_case config keys
            .add_source(
                Environment::with_prefix("WEATHERDASH")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
