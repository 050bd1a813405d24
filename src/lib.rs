pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::app::runtime::{App, Output};
pub use crate::config::cli::{KeyValueBatchStore, LocalStorage, SystemClipboard};
pub use crate::config::toml_config::{Settings, TomlConfig};
pub use crate::core::generator::{generate, generate_corporate_emails, PREFIX_CATALOG};
pub use crate::core::normalizer::{is_valid_domain, normalize};
pub use crate::core::state::{Action, AppState};
pub use crate::domain::model::{Domain, GeneratedBatch};
pub use crate::utils::error::{PermutixError, Result};
