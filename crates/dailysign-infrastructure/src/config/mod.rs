mod app_config;
mod timeouts;

pub use app_config::{resolve_config_path, AppConfig, CONFIG_PATH_ENV};
pub use timeouts::TimeoutConfig;
