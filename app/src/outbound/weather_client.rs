use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use internal::{
    domain::weather::{TemperatureUnits, WeatherReport},
    port::collaborator::WeatherDrivenPort,
};
use log::debug;
use reqwest::{Client, Request};
use serde::Deserialize;

use crate::config::collaborator_config::WeatherConfig;

/// OpenWeatherMap current-weather lookup.
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
    units: TemperatureUnits,
}

#[derive(Deserialize, Debug)]
struct WeatherResponse {
    main: MainReadings,
}

#[derive(Deserialize, Debug)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

impl WeatherResponse {
    fn into_report(self, city: &str, units: TemperatureUnits) -> WeatherReport {
        WeatherReport {
            city: city.to_string(),
            temperature: self.main.temp,
            humidity: self.main.humidity,
            units,
        }
    }
}

impl OpenWeatherClient {
    pub fn new(config: WeatherConfig) -> anyhow::Result<Self> {
        let units = config.units.parse::<TemperatureUnits>().map_err(|e| anyhow!(e))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(OpenWeatherClient { client, config, units })
    }

    fn request(&self, city: &str) -> anyhow::Result<Request> {
        self.client
            .get(&self.config.base_url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", self.units.name()),
            ])
            .build()
            .context("Invalid weather request")
    }
}

impl WeatherDrivenPort for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> anyhow::Result<WeatherReport> {
        let request = self.request(city)?;
        debug!("GET {}", request.url().path());
        // reqwest errors carry the request URL, and with it the API key
        let response = self
            .client
            .execute(request)
            .await
            .map_err(reqwest::Error::without_url)
            .context("Network error")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Weather service answered {}: {}", status.as_u16(), body);
        }
        let body: WeatherResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Unexpected weather payload")?;
        Ok(body.into_report(city, self.units))
    }
}
