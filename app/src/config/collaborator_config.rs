use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct WeatherConfig {
    #[serde(default = "WeatherConfig::default_base_url")]
    pub base_url: String,
    pub api_key: String,
    pub city: String,
    #[serde(default = "WeatherConfig::default_units")]
    pub units: String,
    #[serde(default = "WeatherConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl WeatherConfig {
    fn default_base_url() -> String {
        "http://api.openweathermap.org/data/2.5/weather".into()
    }

    fn default_units() -> String {
        "metric".into()
    }

    fn default_timeout_secs() -> u64 {
        10
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "BackendConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    fn default_timeout_secs() -> u64 {
        5
    }
}
