pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{lookup::LookupEngine, LookupRequest, LookupResult};
pub use crate::server::Server;
pub use crate::utils::error::{LookupError, Result};
