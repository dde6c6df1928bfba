//! Server configuration
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::{
    ConfigManager,
    PORT_ENV,
};
pub use types::{
    ConfigError,
    DEFAULT_PORT,
    ServerSettings,
    ValidationError,
};
