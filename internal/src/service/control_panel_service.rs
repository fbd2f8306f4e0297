use std::time::Duration;

use anyhow::Context;
use log::{debug, error, info, warn};
use tokio::sync::Mutex;

use crate::{
    domain::{
        action::{ActionBinding, ActionBindings, PanelAction},
        command::Command,
        health::{HealthStatus, ServiceDescriptor},
        outcome::Outcome,
        rendering::Rendering,
    },
    port::{
        collaborator::{HealthDrivenPort, WeatherDrivenPort},
        panel::{DisplayDrivenPort, PanelDriverPort},
        sensor::SensorCommandDrivenPort,
    },
};

const MAX_DETAIL_LEN: usize = 200;
pub const WELCOME_MESSAGE: &str = "Click any button to get output";
pub const BUSY_MESSAGE: &str = "A sensor reading is already in progress, please wait";
pub const EMPTY_REPLY_MESSAGE: &str = "Sensor node sent an empty reply";
pub const WEATHER_FAILURE_MESSAGE: &str = "Error fetching weather data.";
pub const BACKEND_UNAVAILABLE_MESSAGE: &str = "Backend service unavailable";

/// Dispatches panel actions to the sensor node and the collaborator
/// services, and renders every result on the display.
///
/// The sensor client sits behind a mutex: a sensor action triggered while
/// another exchange awaits its reply is rejected, never queued.
pub struct ControlPanelController<S, W, H, D>
where
    S: SensorCommandDrivenPort,
    W: WeatherDrivenPort,
    H: HealthDrivenPort,
    D: DisplayDrivenPort,
{
    sensor: Mutex<S>,
    weather: W,
    health: H,
    display: D,
    bindings: ActionBindings,
}

impl<S, W, H, D> PanelDriverPort for ControlPanelController<S, W, H, D>
where
    S: SensorCommandDrivenPort,
    W: WeatherDrivenPort,
    H: HealthDrivenPort,
    D: DisplayDrivenPort,
{
    async fn on_action_triggered(&self, action: PanelAction) -> Rendering {
        let rendering = match self.bindings.get(action) {
            Some(ActionBinding::SensorCommand { command }) => self.exchange(action, command).await,
            Some(ActionBinding::Placeholder { message }) if !message.trim().is_empty() => {
                Rendering::info(message.as_str())
            }
            Some(ActionBinding::Placeholder { .. }) => Rendering::info(action.pending_message()),
            Some(ActionBinding::WeatherLookup { city }) => {
                self.display.render(&Rendering::info(action.pending_message()));
                self.lookup_weather(city).await
            }
            Some(ActionBinding::BackendStatus) => {
                self.display.render(&Rendering::info(action.pending_message()));
                self.check_backend().await
            }
            None => {
                warn!("{action} has no binding");
                Rendering::error(format!("No operation is configured for {}", action.label()))
            }
        };
        self.display.render(&rendering);
        rendering
    }
}

impl<S, W, H, D> ControlPanelController<S, W, H, D>
where
    S: SensorCommandDrivenPort,
    W: WeatherDrivenPort,
    H: HealthDrivenPort,
    D: DisplayDrivenPort,
{
    pub fn new(sensor: S, weather: W, health: H, display: D, bindings: ActionBindings) -> Self {
        ControlPanelController {
            sensor: Mutex::new(sensor),
            weather,
            health,
            display,
            bindings,
        }
    }

    /// Shows the message the panel starts with, before any action.
    pub fn show_welcome(&self) -> Rendering {
        let rendering = Rendering::info(WELCOME_MESSAGE);
        self.display.render(&rendering);
        rendering
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.sensor.try_lock().is_err()
    }

    async fn exchange(&self, action: PanelAction, command: &Command) -> Rendering {
        let Ok(sensor) = self.sensor.try_lock() else {
            warn!("{action} rejected, a sensor exchange is already awaiting its reply");
            return Rendering::warning(BUSY_MESSAGE);
        };
        self.display.render(&Rendering::info(action.pending_message()));
        debug!("{action}: Idle -> AwaitingReply ({command})");
        let outcome = sensor.send_command(command).await;
        drop(sensor);
        debug!("{action}: AwaitingReply -> Rendered ({})", outcome.name());
        render_outcome(outcome)
    }

    async fn lookup_weather(&self, city: &str) -> Rendering {
        match self.weather.current_weather(city).await {
            Ok(report) => {
                info!("Weather in {}: {} / {}%", report.city, report.temperature, report.humidity);
                Rendering::info(report.to_string())
            }
            Err(e) => {
                error!("Weather lookup for {city} failed: {e:#}");
                Rendering::error(WEATHER_FAILURE_MESSAGE)
            }
        }
    }

    async fn check_backend(&self) -> Rendering {
        match self.backend_status().await {
            Ok((descriptor, health)) => {
                let message = format!("{} (v{}): {}", descriptor.message, descriptor.version, health.status);
                if health.is_healthy() {
                    Rendering::info(message)
                } else {
                    warn!("Backend reports {}", health.status);
                    Rendering::warning(message)
                }
            }
            Err(e) => {
                error!("{e:#}");
                Rendering::error(BACKEND_UNAVAILABLE_MESSAGE)
            }
        }
    }

    async fn backend_status(&self) -> anyhow::Result<(ServiceDescriptor, HealthStatus)> {
        let descriptor = self.health.descriptor().await.context("Backend descriptor lookup failed")?;
        let health = self.health.health().await.context("Backend health check failed")?;
        Ok((descriptor, health))
    }
}

/// Maps every outcome variant to a non-empty message and its style.
pub fn render_outcome(outcome: Outcome) -> Rendering {
    match outcome {
        Outcome::Success(text) => {
            let text = strip_control(&text, true);
            let text = text.trim_end();
            if text.trim().is_empty() {
                Rendering::warning(EMPTY_REPLY_MESSAGE)
            } else {
                Rendering::info(text)
            }
        }
        Outcome::Timeout(after) => Rendering::warning(format!(
            "No response received from the sensor node within {}",
            describe_deadline(after)
        )),
        Outcome::TransportError(detail) => {
            Rendering::error(format!("Sensor exchange failed: {}", sanitize(&detail)))
        }
    }
}

fn describe_deadline(deadline: Duration) -> String {
    match (deadline.as_secs(), deadline.subsec_millis()) {
        (1, 0) => "1 second".to_string(),
        (secs, 0) => format!("{secs} seconds"),
        _ => format!("{} ms", deadline.as_millis()),
    }
}

/// Replaces control characters with spaces. Line breaks survive when
/// `keep_newlines` is set.
fn strip_control(text: &str, keep_newlines: bool) -> String {
    text.chars()
        .map(|c| match c {
            '\n' if keep_newlines => c,
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

fn sanitize(detail: &str) -> String {
    let cleaned = strip_control(detail, false);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return "unknown transport failure".to_string();
    }
    if cleaned.chars().count() > MAX_DETAIL_LEN {
        format!("{}...", cleaned.chars().take(MAX_DETAIL_LEN).collect::<String>())
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod test {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use anyhow::anyhow;
    use mockall::{Sequence, predicate};

    use super::*;
    use crate::{
        domain::{
            rendering::Style,
            weather::{TemperatureUnits, WeatherReport},
        },
        port::panel::MockDisplayDrivenPort,
    };

    struct ScriptedSensor {
        outcome: Outcome,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSensor {
        fn replying(outcome: Outcome) -> Self {
            ScriptedSensor {
                outcome,
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl SensorCommandDrivenPort for ScriptedSensor {
        async fn send_command(&self, _command: &Command) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.outcome.clone()
        }
    }

    struct StubWeather(Option<WeatherReport>);

    impl WeatherDrivenPort for StubWeather {
        async fn current_weather(&self, _city: &str) -> anyhow::Result<WeatherReport> {
            self.0.clone().ok_or_else(|| anyhow!("401 Unauthorized"))
        }
    }

    struct StubHealth(Option<&'static str>);

    impl HealthDrivenPort for StubHealth {
        async fn descriptor(&self) -> anyhow::Result<ServiceDescriptor> {
            Ok(ServiceDescriptor {
                message: "Welcome to AgroMesh API".into(),
                status: "operational".into(),
                version: "1.0.0".into(),
            })
        }

        async fn health(&self) -> anyhow::Result<HealthStatus> {
            self.0
                .map(|status| HealthStatus { status: status.into() })
                .ok_or_else(|| anyhow!("connection refused"))
        }
    }

    fn bindings() -> ActionBindings {
        ActionBindings::from_commands(Some("moisture"), None, None, "Gettysburg").unwrap()
    }

    fn any_display() -> MockDisplayDrivenPort {
        let mut display = MockDisplayDrivenPort::new();
        display.expect_render().return_const(());
        display
    }

    fn controller(
        sensor: ScriptedSensor, display: MockDisplayDrivenPort,
    ) -> ControlPanelController<ScriptedSensor, StubWeather, StubHealth, MockDisplayDrivenPort> {
        let weather = StubWeather(Some(WeatherReport {
            city: "Gettysburg".into(),
            temperature: 18.3,
            humidity: 71.0,
            units: TemperatureUnits::Metric,
        }));
        ControlPanelController::new(sensor, weather, StubHealth(Some("healthy")), display, bindings())
    }

    #[test]
    fn should_render_every_outcome_variant() {
        let outcomes = [
            Outcome::Success("MOISTURE=42%\n".into()),
            Outcome::Success("\r\n".into()),
            Outcome::Timeout(Duration::from_secs(5)),
            Outcome::TransportError("Connection refused (os error 111)".into()),
            Outcome::TransportError("\u{7}\n".into()),
        ];
        for outcome in outcomes {
            let rendering = render_outcome(outcome.clone());
            assert!(!rendering.message.trim().is_empty(), "{outcome:?} rendered nothing");
        }
    }

    #[test]
    fn should_map_outcomes_to_styles() {
        let success = render_outcome(Outcome::Success("MOISTURE=42%\n".into()));
        assert_eq!(success.message, "MOISTURE=42%");
        assert_eq!(success.style, Style::Informational);

        let timeout = render_outcome(Outcome::Timeout(Duration::from_secs(5)));
        assert_eq!(timeout.message, "No response received from the sensor node within 5 seconds");
        assert_eq!(timeout.style, Style::Warning);

        let failure = render_outcome(Outcome::TransportError("Connection refused (os error 111)".into()));
        assert_eq!(failure.message, "Sensor exchange failed: Connection refused (os error 111)");
        assert_eq!(failure.style, Style::Error);

        let empty = render_outcome(Outcome::Success(String::new()));
        assert_eq!(empty.message, EMPTY_REPLY_MESSAGE);
        assert_eq!(empty.style, Style::Warning);
    }

    #[test]
    fn should_describe_sub_second_deadlines_in_millis() {
        assert_eq!(describe_deadline(Duration::from_secs(1)), "1 second");
        assert_eq!(describe_deadline(Duration::from_millis(1500)), "1500 ms");
    }

    #[test]
    fn should_strip_terminal_escapes_from_replies() {
        let rendering = render_outcome(Outcome::Success("MOISTURE=\u{1b}[31m42%\r\nPH=7\u{7}\r\n".into()));
        assert_eq!(rendering.message, "MOISTURE= [31m42% \nPH=7");
        assert!(!rendering.message.chars().any(|c| c.is_control() && c != '\n'));
        assert_eq!(rendering.style, Style::Informational);

        let rendering = render_outcome(Outcome::Success("\u{1b}\u{7}\n".into()));
        assert_eq!(rendering.message, EMPTY_REPLY_MESSAGE);
    }

    #[test]
    fn should_sanitize_transport_details() {
        assert_eq!(sanitize("bad\u{1b}[31m\nthing"), "bad [31m thing");
        assert_eq!(sanitize(" \t "), "unknown transport failure");
        let long = "x".repeat(MAX_DETAIL_LEN + 50);
        assert_eq!(sanitize(&long).chars().count(), MAX_DETAIL_LEN + 3);
    }

    #[tokio::test]
    async fn should_render_pending_message_then_reply() {
        let mut display = MockDisplayDrivenPort::new();
        let mut seq = Sequence::new();
        display
            .expect_render()
            .withf(|r| r.message == "Measuring Soil Moisture...")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        display
            .expect_render()
            .withf(|r| r.message == "MOISTURE=42%" && r.style == Style::Informational)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        let sensor = ScriptedSensor::replying(Outcome::Success("MOISTURE=42%\n".into()));
        let calls = sensor.calls.clone();
        let controller = controller(sensor, display);

        let rendering = controller.on_action_triggered(PanelAction::SoilMoisture).await;
        assert_eq!(rendering.message, "MOISTURE=42%");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_show_welcome_message() {
        let mut display = MockDisplayDrivenPort::new();
        display
            .expect_render()
            .withf(|r| r.message == WELCOME_MESSAGE)
            .times(1)
            .return_const(());
        let sensor = ScriptedSensor::replying(Outcome::Timeout(Duration::from_secs(5)));
        let controller = controller(sensor, display);
        assert_eq!(controller.show_welcome().style, Style::Informational);
    }

    #[tokio::test]
    async fn should_render_timeout_as_warning() {
        let sensor = ScriptedSensor::replying(Outcome::Timeout(Duration::from_secs(5)));
        let controller = controller(sensor, any_display());

        let rendering = controller.on_action_triggered(PanelAction::SoilMoisture).await;
        assert_eq!(rendering.style, Style::Warning);
        assert!(rendering.message.contains("5 seconds"));
    }

    #[tokio::test]
    async fn should_render_placeholder_without_contacting_sensor() {
        let mut display = MockDisplayDrivenPort::new();
        display
            .expect_render()
            .with(predicate::function(|r: &Rendering| r.message == "Measuring Nutrient Levels..."))
            .times(1)
            .return_const(());
        let sensor = ScriptedSensor::replying(Outcome::Success("unused".into()));
        let calls = sensor.calls.clone();
        let controller = controller(sensor, display);

        let rendering = controller.on_action_triggered(PanelAction::SoilNutrients).await;
        assert_eq!(rendering.style, Style::Informational);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_sensor_action_while_awaiting_reply() {
        let mut sensor = ScriptedSensor::replying(Outcome::Success("MOISTURE=42%\n".into()));
        sensor.delay = Duration::from_millis(200);
        let calls = sensor.calls.clone();
        let controller = controller(sensor, any_display());

        let (first, second) = futures::join!(controller.on_action_triggered(PanelAction::SoilMoisture), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            assert!(controller.is_awaiting_reply());
            controller.on_action_triggered(PanelAction::SoilMoisture).await
        });

        assert_eq!(first.message, "MOISTURE=42%");
        assert_eq!(second.message, BUSY_MESSAGE);
        assert_eq!(second.style, Style::Warning);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_awaiting_reply());
    }

    #[tokio::test]
    async fn should_accept_non_sensor_actions_while_awaiting_reply() {
        let mut sensor = ScriptedSensor::replying(Outcome::Success("MOISTURE=42%\n".into()));
        sensor.delay = Duration::from_millis(200);
        let controller = controller(sensor, any_display());

        let (_, weather) = futures::join!(controller.on_action_triggered(PanelAction::SoilMoisture), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.on_action_triggered(PanelAction::TrackWeather).await
        });
        assert_eq!(weather.message, "Temperature in Gettysburg: 18.3°C\nHumidity: 71%");
    }

    #[tokio::test]
    async fn should_render_weather_failure_uniformly() {
        let sensor = ScriptedSensor::replying(Outcome::Timeout(Duration::from_secs(5)));
        let controller = ControlPanelController::new(
            sensor,
            StubWeather(None),
            StubHealth(Some("healthy")),
            any_display(),
            bindings(),
        );

        let rendering = controller.on_action_triggered(PanelAction::TrackWeather).await;
        assert_eq!(rendering.message, WEATHER_FAILURE_MESSAGE);
        assert_eq!(rendering.style, Style::Error);
    }

    #[tokio::test]
    async fn should_render_backend_status() {
        let sensor = ScriptedSensor::replying(Outcome::Timeout(Duration::from_secs(5)));
        let controller = controller(sensor, any_display());
        let rendering = controller.on_action_triggered(PanelAction::BackendHealth).await;
        assert_eq!(rendering.message, "Welcome to AgroMesh API (v1.0.0): healthy");
        assert_eq!(rendering.style, Style::Informational);

        let sensor = ScriptedSensor::replying(Outcome::Timeout(Duration::from_secs(5)));
        let controller =
            ControlPanelController::new(sensor, StubWeather(None), StubHealth(None), any_display(), bindings());
        let rendering = controller.on_action_triggered(PanelAction::BackendHealth).await;
        assert_eq!(rendering.message, BACKEND_UNAVAILABLE_MESSAGE);
        assert_eq!(rendering.style, Style::Error);
    }

    #[tokio::test]
    async fn should_render_error_for_unbound_action() {
        let sensor = ScriptedSensor::replying(Outcome::Timeout(Duration::from_secs(5)));
        let controller = ControlPanelController::new(
            sensor,
            StubWeather(None),
            StubHealth(None),
            any_display(),
            ActionBindings::new(),
        );
        for action in PanelAction::ALL {
            let rendering = controller.on_action_triggered(action).await;
            assert_eq!(rendering.style, Style::Error);
            assert!(rendering.message.contains(action.label()));
        }
    }
}
