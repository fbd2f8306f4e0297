pub mod action;
pub mod command;
pub mod error;
pub mod health;
pub mod outcome;
pub mod rendering;
pub mod weather;
