use std::fmt::{Display, Formatter};

use crate::domain::error::ConfigurationError;

const DELIMITER: char = '\n';

/// Newline-terminated ASCII text understood by the sensor node's parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    /// Builds a command from `text`, with or without its trailing delimiter.
    ///
    /// The stored command always ends with exactly one `\n`.
    pub fn new(text: &str) -> Result<Self, ConfigurationError> {
        let body = text.strip_suffix("\r\n").or_else(|| text.strip_suffix(DELIMITER)).unwrap_or(text);
        if body.trim().is_empty() {
            return Err(ConfigurationError::EmptyCommand);
        }
        if body.contains(['\n', '\r']) {
            return Err(ConfigurationError::MultiLineCommand(body.to_string()));
        }
        if !body.is_ascii() {
            return Err(ConfigurationError::NonAsciiCommand(body.to_string()));
        }
        Ok(Command(format!("{body}{DELIMITER}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The command without its delimiter, for logs and messages.
    pub fn name(&self) -> &str {
        self.0.trim_end_matches(DELIMITER)
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Address of the remote sensor node, fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: &str, port: u16) -> Result<Self, ConfigurationError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigurationError::MissingHost);
        }
        if port == 0 {
            return Err(ConfigurationError::InvalidPort(port));
        }
        Ok(Endpoint {
            host: host.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
