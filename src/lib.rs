pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{toml_config::BotConfig, CliConfig};
pub use crate::core::{directory::RosterDirectory, service::BotService};
pub use crate::utils::error::{OncallError, Result};
