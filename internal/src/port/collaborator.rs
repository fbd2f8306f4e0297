use crate::domain::{
    health::{HealthStatus, ServiceDescriptor},
    weather::WeatherReport,
};

pub trait WeatherDrivenPort {
    fn current_weather(&self, city: &str) -> impl Future<Output = anyhow::Result<WeatherReport>> + Send;
}

pub trait HealthDrivenPort {
    fn descriptor(&self) -> impl Future<Output = anyhow::Result<ServiceDescriptor>> + Send;
    fn health(&self) -> impl Future<Output = anyhow::Result<HealthStatus>> + Send;
}
