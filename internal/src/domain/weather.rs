use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnits {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl TemperatureUnits {
    /// Value of the `units` query parameter.
    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnits::Metric => "metric",
            TemperatureUnits::Imperial => "imperial",
            TemperatureUnits::Standard => "standard",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnits::Metric => "°C",
            TemperatureUnits::Imperial => "°F",
            TemperatureUnits::Standard => "K",
        }
    }
}

impl FromStr for TemperatureUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(TemperatureUnits::Metric),
            "imperial" => Ok(TemperatureUnits::Imperial),
            "standard" => Ok(TemperatureUnits::Standard),
            other => Err(format!("Unknown temperature units: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub units: TemperatureUnits,
}

impl Display for WeatherReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Temperature in {}: {}{}\nHumidity: {}%",
            self.city,
            self.temperature,
            self.units.symbol(),
            self.humidity
        )
    }
}
