pub mod dto;
pub mod loader;

pub use dto::{AppConfig, CredentialSource, RelayConfigFile};
pub use loader::{load_config, load_config_from};
