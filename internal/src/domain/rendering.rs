use std::fmt::{Display, Formatter};

use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Informational,
    Warning,
    Error,
}

impl Style {
    pub fn name(&self) -> &'static str {
        match self {
            Style::Informational => "INFO",
            Style::Warning => "WARN",
            Style::Error => "ERROR",
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// User-visible text shown in the panel's output area.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub message: String,
    pub style: Style,
    pub rendered_at: OffsetDateTime,
}

impl Rendering {
    pub fn new(message: impl Into<String>, style: Style) -> Self {
        Rendering {
            message: message.into(),
            style,
            rendered_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Style::Informational)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Style::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Style::Error)
    }
}
