pub mod app_config;
pub mod collaborator_config;
pub mod sensor_config;
