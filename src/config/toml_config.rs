use crate::core::export::{DOWNLOAD_FILENAME, GMAIL_COMPOSE_URL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PermutixError, Result};
use crate::utils::validation::{
    validate_file_name, validate_path, validate_range, validate_url, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_STATE_DIR: &str = "./.permutix";
pub const DEFAULT_DISMISS_SECS: u64 = 3;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Optional configuration file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub notifications: NotificationConfig,
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: Option<String>,
    pub download_filename: Option<String>,
    pub compose_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub dismiss_after_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// `auto`, `stdout`, or a command line such as `xclip -selection clipboard`.
    pub command: Option<String>,
}

impl TomlConfig {
    /// Loads and parses a TOML file, expanding `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

/// Effective settings after layering defaults, the TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_path: String,
    pub state_dir: String,
    pub download_filename: String,
    pub compose_url: String,
    pub dismiss_after_secs: u64,
    pub clipboard: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            state_dir: DEFAULT_STATE_DIR.to_string(),
            download_filename: DOWNLOAD_FILENAME.to_string(),
            compose_url: GMAIL_COMPOSE_URL.to_string(),
            dismiss_after_secs: DEFAULT_DISMISS_SECS,
            clipboard: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_path: Option<String>,
    pub state_dir: Option<String>,
    pub clipboard: Option<String>,
}

impl Settings {
    pub fn resolve(file: Option<TomlConfig>, overrides: Overrides) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Settings::default();

        Self {
            output_path: overrides
                .output_path
                .or(file.export.output_path)
                .unwrap_or(defaults.output_path),
            state_dir: overrides
                .state_dir
                .or(file.storage.state_dir)
                .unwrap_or(defaults.state_dir),
            download_filename: file
                .export
                .download_filename
                .unwrap_or(defaults.download_filename),
            compose_url: file.export.compose_url.unwrap_or(defaults.compose_url),
            dismiss_after_secs: file
                .notifications
                .dismiss_after_secs
                .unwrap_or(defaults.dismiss_after_secs),
            clipboard: overrides.clipboard.or(file.clipboard.command),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_path("state_dir", &self.state_dir)?;
        validate_file_name("export.download_filename", &self.download_filename)?;
        validate_url("export.compose_url", &self.compose_url)?;
        validate_range("notifications.dismiss_after_secs", self.dismiss_after_secs, 1, 60)?;

        if self.output_path == self.state_dir && self.download_filename == crate::config::cli::STATE_FILE {
            return Err(PermutixError::InvalidConfigValueError {
                field: "export.download_filename".to_string(),
                value: self.download_filename.clone(),
                reason: "Would overwrite the state file".to_string(),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn download_filename(&self) -> &str {
        &self.download_filename
    }

    fn compose_base_url(&self) -> &str {
        &self.compose_url
    }

    fn dismiss_after_secs(&self) -> u64 {
        self.dismiss_after_secs
    }
}
