use std::time::Duration;

use internal::domain::{command::Endpoint, error::ConfigurationError};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct SensorConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "SensorConfig::default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "SensorConfig::default_max_reply_len")]
    pub max_reply_len: usize,
}

impl SensorConfig {
    fn default_timeout_ms() -> u64 {
        5000
    }

    fn default_max_reply_len() -> usize {
        1024
    }

    pub fn endpoint(&self) -> Result<Endpoint, ConfigurationError> {
        Endpoint::new(&self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Soil actions and the command the node expects for each. An action
/// without a command is shown on the panel but not sent.
#[derive(Deserialize, Debug, Clone)]
pub struct ActionsConfig {
    pub soil_moisture: Option<String>,
    pub soil_nutrients: Option<String>,
    pub soil_ph: Option<String>,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        ActionsConfig {
            soil_moisture: Some("moisture".into()),
            soil_nutrients: None,
            soil_ph: None,
        }
    }
}
