use crate::domain::model::GeneratedBatch;
use crate::domain::ports::{BatchStore, Clipboard, Storage};
use crate::utils::error::{PermutixError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

/// Key under which the last batch lives in the state document.
pub const BATCH_SLOT: &str = "generatedEmails";
pub const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// A small JSON key-value document on top of [`Storage`]; the batch occupies
/// one named slot and other keys are left alone.
#[derive(Debug, Clone)]
pub struct KeyValueBatchStore<S: Storage> {
    storage: S,
    file: String,
    slot: String,
}

impl<S: Storage> KeyValueBatchStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            file: STATE_FILE.to_string(),
            slot: BATCH_SLOT.to_string(),
        }
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        let bytes = match self.storage.read_file(&self.file).await {
            Ok(bytes) => bytes,
            Err(PermutixError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(map) => Ok(map),
            other => Err(PermutixError::CorruptStateError {
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }
}

#[async_trait]
impl<S: Storage> BatchStore for KeyValueBatchStore<S> {
    async fn load(&self) -> Result<Option<GeneratedBatch>> {
        let mut document = self.read_document().await?;
        let Some(value) = document.remove(&self.slot) else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| PermutixError::CorruptStateError {
                message: format!("slot '{}': {}", self.slot, e),
            })
    }

    async fn save(&self, batch: &GeneratedBatch) -> Result<()> {
        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Overwriting unreadable state file: {}", e);
                Map::new()
            }
        };
        document.insert(self.slot.clone(), serde_json::to_value(batch)?);

        let data = serde_json::to_vec_pretty(&Value::Object(document))?;
        self.storage.write_file(&self.file, &data).await?;
        tracing::debug!("Saved batch of {} emails to slot '{}'", batch.email_count(), self.slot);
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Pipes text into an external clipboard program such as `pbcopy`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Parses a command line like `xclip -selection clipboard`.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Picks the usual clipboard tool for this platform.
    pub fn detect() -> Self {
        let command = if cfg!(target_os = "macos") {
            "pbcopy"
        } else if cfg!(target_os = "windows") {
            "clip"
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            "wl-copy"
        } else {
            "xclip -selection clipboard"
        };
        // All candidates above are non-empty.
        Self::from_command_line(command).unwrap_or(Self {
            program: command.to_string(),
            args: Vec::new(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PermutixError::ClipboardError {
                message: format!("cannot run '{}': {}", self.program, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(PermutixError::ClipboardError {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

/// Clipboard stand-in for headless use: prints the text to stdout.
#[derive(Debug, Clone, Default)]
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum SystemClipboard {
    Command(CommandClipboard),
    Stdout(StdoutClipboard),
}

impl SystemClipboard {
    /// `None` or `auto` detects a tool, `stdout` prints, anything else is a command line.
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting.map(str::trim) {
            None | Some("") | Some("auto") => SystemClipboard::Command(CommandClipboard::detect()),
            Some("stdout") => SystemClipboard::Stdout(StdoutClipboard),
            Some(command) => match CommandClipboard::from_command_line(command) {
                Some(clipboard) => SystemClipboard::Command(clipboard),
                None => SystemClipboard::Command(CommandClipboard::detect()),
            },
        }
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        match self {
            SystemClipboard::Command(clipboard) => clipboard.write_text(text).await,
            SystemClipboard::Stdout(clipboard) => clipboard.write_text(text).await,
        }
    }
}
