use std::path::Path;

use anyhow::Result;
use app::{
    config::app_config::AppConfig,
    inbound::console,
    outbound::{
        console_display::ConsoleDisplay, health_client::BackendHealthClient, udp_sensor_client::SensorCommandClient,
        weather_client::OpenWeatherClient,
    },
};
use internal::service::control_panel_service::ControlPanelController;
use log::info;
use tokio::io::{BufReader, stdin};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let conf = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from(Path::new(&path))?,
        None => AppConfig::load("config.toml")?,
    };

    let sensor = SensorCommandClient::from_config(&conf.sensor)?;
    info!("Sensor node at {}, replies expected within {:?}", sensor.endpoint(), sensor.timeout());
    let weather = OpenWeatherClient::new(conf.weather.clone())?;
    let health = BackendHealthClient::new(conf.backend.clone())?;
    let bindings = conf.bindings()?;
    let controller = ControlPanelController::new(sensor, weather, health, ConsoleDisplay, bindings);

    controller.show_welcome();
    println!("{}", console::help());
    console::run(&controller, BufReader::new(stdin())).await?;
    info!("Panel closed");
    Ok(())
}
