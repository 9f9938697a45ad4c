pub mod env;
pub mod loader;
pub mod types;

pub use loader::{load_config, ConfigOverrides};
pub use types::ClientConfig;
