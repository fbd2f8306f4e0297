use std::time::Duration;

use anyhow::{Context, bail};
use internal::{
    domain::health::{HealthStatus, ServiceDescriptor},
    port::collaborator::HealthDrivenPort,
};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::config::collaborator_config::BackendConfig;

/// Read-only client for the companion backend's status endpoints.
pub struct BackendHealthClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize, Debug)]
struct DescriptorBody {
    message: String,
    status: String,
    version: String,
}

#[derive(Deserialize, Debug)]
struct HealthBody {
    status: String,
}

impl From<DescriptorBody> for ServiceDescriptor {
    fn from(body: DescriptorBody) -> Self {
        ServiceDescriptor {
            message: body.message,
            status: body.status,
            version: body.version,
        }
    }
}

impl From<HealthBody> for HealthStatus {
    fn from(body: HealthBody) -> Self {
        HealthStatus { status: body.status }
    }
}

impl BackendHealthClient {
    pub fn new(config: BackendConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(BackendHealthClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("GET {} answered {}", url, status.as_u16());
        }
        response
            .json()
            .await
            .with_context(|| format!("GET {url} returned an unexpected body"))
    }
}

impl HealthDrivenPort for BackendHealthClient {
    async fn descriptor(&self) -> anyhow::Result<ServiceDescriptor> {
        self.get::<DescriptorBody>("/").await.map(ServiceDescriptor::from)
    }

    async fn health(&self) -> anyhow::Result<HealthStatus> {
        self.get::<HealthBody>("/health").await.map(HealthStatus::from)
    }
}
