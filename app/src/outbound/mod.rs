pub mod console_display;
pub mod health_client;
pub mod udp_sensor_client;
pub mod weather_client;
