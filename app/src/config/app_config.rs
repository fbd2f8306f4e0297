use anyhow::anyhow;
use internal::domain::{action::ActionBindings, error::ConfigurationError};
use serde::Deserialize;
use std::{fs, path::Path};

use super::{
    collaborator_config::{BackendConfig, WeatherConfig},
    sensor_config::{ActionsConfig, SensorConfig},
};

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    pub sensor: SensorConfig,
    #[serde(default)]
    pub actions: ActionsConfig,
    pub weather: WeatherConfig,
    pub backend: BackendConfig,
}

impl AppConfig {
    /// Loads `file_name` from the panel crate's directory.
    pub fn load(file_name: &str) -> anyhow::Result<AppConfig> {
        let project_root = env!("CARGO_MANIFEST_DIR");
        Self::load_from(&Path::new(project_root).join(file_name))
    }

    pub fn load_from(file_path: &Path) -> anyhow::Result<AppConfig> {
        let content = fs::read_to_string(file_path)
            .map_err(|err| anyhow!("Could not read config file {}: {:?}", file_path.display(), err))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<AppConfig> {
        toml::from_str(content).map_err(|err| anyhow!("Could not parse TOML config: {}", err))
    }

    pub fn bindings(&self) -> Result<ActionBindings, ConfigurationError> {
        ActionBindings::from_commands(
            self.actions.soil_moisture.as_deref(),
            self.actions.soil_nutrients.as_deref(),
            self.actions.soil_ph.as_deref(),
            &self.weather.city,
        )
    }
}
