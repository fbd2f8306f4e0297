use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationError {
    #[error("Command must not be empty")]
    EmptyCommand,
    #[error("Command {0:?} must fit on a single line")]
    MultiLineCommand(String),
    #[error("Command {0:?} must be ASCII text")]
    NonAsciiCommand(String),
    #[error("Sensor node host must not be empty")]
    MissingHost,
    #[error("Invalid sensor node port: {0}")]
    InvalidPort(u16),
    #[error("Sensor reply timeout must be greater than zero")]
    ZeroTimeout,
    #[error("Sensor reply buffer must hold at least one byte")]
    ZeroReplyBuffer,
    #[error("Weather lookup requires a city name")]
    MissingCity,
}
