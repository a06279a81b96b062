mod config;
mod error;

pub use config::{APP_NAME, AppConfigExt, CONFIG_NAME, parse_config};
pub use error::ConfigError;
