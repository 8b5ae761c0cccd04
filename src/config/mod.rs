mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{RuntimeChecks, StoreConfig, StoreSettings};
