use crate::domain::{action::PanelAction, rendering::Rendering};

pub trait PanelDriverPort {
    fn on_action_triggered(&self, action: PanelAction) -> impl Future<Output = Rendering>;
}

/// Output area of the panel.
#[cfg_attr(test, mockall::automock)]
pub trait DisplayDrivenPort {
    fn render(&self, rendering: &Rendering);
}
