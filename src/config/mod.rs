/// Application settings loaded from config.toml
pub mod app;

/// Config file discovery and environment variable overrides
pub mod env;

pub use app::{AppConfig, load_config};
pub use env::load_app_configuration;
