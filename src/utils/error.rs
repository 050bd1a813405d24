use thiserror::Error;

#[derive(Error, Debug)]
pub enum PermutixError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Clipboard error: {message}")]
    ClipboardError { message: String },

    #[error("Stored batch is corrupt: {message}")]
    CorruptStateError { message: String },

    #[error(transparent)]
    User(#[from] UserError),
}

/// Errors caused by what the user asked for, as opposed to the environment.
/// These are always shown as an error notification and never abort the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Please provide at least one domain.")]
    EmptyInput,

    #[error("Invalid domains: {}", .0.join(", "))]
    InvalidDomains(Vec<String>),

    #[error("No emails to {0}.")]
    NothingToExport(ExportKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Copy,
    Download,
    Compose,
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            ExportKind::Copy => "copy",
            ExportKind::Download => "download",
            ExportKind::Compose => "compose",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PermutixError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PermutixError::User(_) => ErrorCategory::Input,
            PermutixError::InvalidConfigValueError { .. }
            | PermutixError::TomlError(_) => ErrorCategory::Configuration,
            PermutixError::IoError(_)
            | PermutixError::SerializationError(_)
            | PermutixError::CorruptStateError { .. } => ErrorCategory::Storage,
            PermutixError::ClipboardError { .. } => ErrorCategory::Platform,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Platform => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PermutixError::User(UserError::EmptyInput) => {
                "Run `permutix generate <domain>` or pass a domain list with --file"
            }
            PermutixError::User(UserError::InvalidDomains(_)) => {
                "Fix or remove the listed entries; use forms like example.com or https://www.example.com"
            }
            PermutixError::User(UserError::NothingToExport(_)) => {
                "Run `permutix generate` first"
            }
            PermutixError::InvalidConfigValueError { .. }
            | PermutixError::TomlError(_) => "Check the configuration file and command-line flags",
            PermutixError::ClipboardError { .. } => {
                "Install a clipboard tool (pbcopy, wl-copy, xclip) or use --clipboard stdout"
            }
            PermutixError::CorruptStateError { .. } | PermutixError::SerializationError(_) => {
                "Delete the state file or generate a new batch to overwrite it"
            }
            PermutixError::IoError(_) => "Check that the paths exist and are writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PermutixError::User(err) => err.to_string(),
            PermutixError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PermutixError>;
