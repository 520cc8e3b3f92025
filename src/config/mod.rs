//! Configuration: TOML file under the platform config dir, with defaults
//! for every field.

mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{
    ApiConfig, Config, LoggingConfig, ReconcileConfig, ResponseOrdering, SessionConfig,
};
