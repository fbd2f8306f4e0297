use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::domain::{command::Command, error::ConfigurationError};

/// One user-triggerable operation of the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAction {
    SoilMoisture,
    SoilNutrients,
    SoilPh,
    TrackWeather,
    BackendHealth,
}

impl PanelAction {
    pub const ALL: [PanelAction; 5] = [
        PanelAction::SoilMoisture,
        PanelAction::SoilNutrients,
        PanelAction::SoilPh,
        PanelAction::TrackWeather,
        PanelAction::BackendHealth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PanelAction::SoilMoisture => "Soil Moisture",
            PanelAction::SoilNutrients => "Soil Nutrients",
            PanelAction::SoilPh => "Soil pH",
            PanelAction::TrackWeather => "Track Weather",
            PanelAction::BackendHealth => "Backend Health",
        }
    }

    /// Word typed on the console to trigger the action.
    pub fn keyword(&self) -> &'static str {
        match self {
            PanelAction::SoilMoisture => "moisture",
            PanelAction::SoilNutrients => "nutrients",
            PanelAction::SoilPh => "ph",
            PanelAction::TrackWeather => "weather",
            PanelAction::BackendHealth => "health",
        }
    }

    pub fn pending_message(&self) -> &'static str {
        match self {
            PanelAction::SoilMoisture => "Measuring Soil Moisture...",
            PanelAction::SoilNutrients => "Measuring Nutrient Levels...",
            PanelAction::SoilPh => "Measuring Soil pH...",
            PanelAction::TrackWeather => "Fetching weather...",
            PanelAction::BackendHealth => "Checking backend...",
        }
    }
}

impl Display for PanelAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PanelAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_lowercase();
        PanelAction::ALL
            .into_iter()
            .find(|action| action.keyword() == word)
            .ok_or_else(|| format!("Unknown action: {}", s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionBinding {
    SensorCommand { command: Command },
    /// Defined on the panel but not yet supported by the sensor node.
    Placeholder { message: String },
    WeatherLookup { city: String },
    BackendStatus,
}

/// Static action to operation mapping, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct ActionBindings {
    bindings: HashMap<PanelAction, ActionBinding>,
}

impl ActionBindings {
    pub fn new() -> Self {
        ActionBindings::default()
    }

    /// Binds each soil action to its sensor command, or to its pending
    /// message when the node has no command for it yet.
    pub fn from_commands(
        moisture: Option<&str>, nutrients: Option<&str>, ph: Option<&str>, city: &str,
    ) -> Result<Self, ConfigurationError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ConfigurationError::MissingCity);
        }
        let mut bindings = ActionBindings::new();
        for (action, command) in [
            (PanelAction::SoilMoisture, moisture),
            (PanelAction::SoilNutrients, nutrients),
            (PanelAction::SoilPh, ph),
        ] {
            bindings = match command {
                Some(text) => bindings.bind(
                    action,
                    ActionBinding::SensorCommand {
                        command: Command::new(text)?,
                    },
                ),
                None => bindings.bind(
                    action,
                    ActionBinding::Placeholder {
                        message: action.pending_message().to_string(),
                    },
                ),
            };
        }
        Ok(bindings
            .bind(PanelAction::TrackWeather, ActionBinding::WeatherLookup { city: city.into() })
            .bind(PanelAction::BackendHealth, ActionBinding::BackendStatus))
    }

    pub fn bind(mut self, action: PanelAction, binding: ActionBinding) -> Self {
        self.bindings.insert(action, binding);
        self
    }

    pub fn get(&self, action: PanelAction) -> Option<&ActionBinding> {
        self.bindings.get(&action)
    }
}
