pub mod collaborator;
pub mod panel;
pub mod sensor;
