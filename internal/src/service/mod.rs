pub mod control_panel_service;
