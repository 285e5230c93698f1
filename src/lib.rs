// Public API for integration tests and the terminal binary

pub mod app;
pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod loader;
pub mod protocol;
pub mod quiz;
pub mod router;
pub mod session;
pub mod standings;
pub mod types;
pub mod views;
