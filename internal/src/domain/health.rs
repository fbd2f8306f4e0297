/// Answer of the backend's `GET /`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// Answer of the backend's `GET /health`.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
