pub mod app;
pub mod commands;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod render;

pub use app::{Calculator, seed_session};
pub use config::AppConfig;
