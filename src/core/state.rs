//! Application state and its transitions.
//!
//! `AppState::update` is the only place state changes. It never performs I/O;
//! anything that touches the outside world comes back as an [`Effect`] for the
//! runtime to execute, and results re-enter as another [`Action`].

use crate::core::export::{compose_link, export_text};
use crate::core::generator::generate;
use crate::core::input::validate_candidates;
use crate::domain::model::{GeneratedBatch, InputMode, Notification, NotificationKind};
use crate::utils::error::ExportKind;
use std::path::PathBuf;

pub type UploadTicket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetMode(InputMode),
    EditDomain(String),
    /// Last batch loaded from the store at startup.
    Restore(GeneratedBatch),
    UploadRequested(PathBuf),
    UploadCompleted {
        ticket: UploadTicket,
        result: Result<Vec<String>, String>,
    },
    Generate,
    PersistFailed(String),
    Copy,
    CopyCompleted(Result<(), String>),
    Download,
    DownloadCompleted(Result<String, String>),
    Compose,
    Dismiss(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ReadFile { ticket: UploadTicket, path: PathBuf },
    SaveBatch(GeneratedBatch),
    WriteClipboard(String),
    WriteDownload(String),
    ShowLink(String),
    Notify(Notification),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: InputMode,
    pub single_domain: String,
    pub bulk_domains: Vec<String>,
    pub batch: GeneratedBatch,
    pub notification: Option<Notification>,
    compose_base_url: String,
    next_notification_id: u64,
    last_ticket: UploadTicket,
    pending_upload: Option<UploadTicket>,
}

impl AppState {
    pub fn new(compose_base_url: impl Into<String>) -> Self {
        Self {
            mode: InputMode::default(),
            single_domain: String::new(),
            bulk_domains: Vec::new(),
            batch: GeneratedBatch::new(),
            notification: None,
            compose_base_url: compose_base_url.into(),
            next_notification_id: 0,
            last_ticket: 0,
            pending_upload: None,
        }
    }

    pub fn upload_pending(&self) -> bool {
        self.pending_upload.is_some()
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SetMode(mode) => {
                self.mode = mode;
                Vec::new()
            }
            Action::EditDomain(value) => {
                self.single_domain = value;
                Vec::new()
            }
            Action::Restore(batch) => {
                tracing::debug!("Restored {} emails for {} domains", batch.email_count(), batch.domain_count());
                self.batch = batch;
                Vec::new()
            }
            Action::UploadRequested(path) => {
                self.last_ticket += 1;
                let ticket = self.last_ticket;
                if let Some(previous) = self.pending_upload.replace(ticket) {
                    tracing::debug!("Upload {} superseded by {}", previous, ticket);
                }
                vec![Effect::ReadFile { ticket, path }]
            }
            Action::UploadCompleted { ticket, result } => {
                if self.pending_upload != Some(ticket) {
                    tracing::debug!("Ignoring stale upload {}", ticket);
                    return Vec::new();
                }
                self.pending_upload = None;
                match result {
                    Ok(domains) => {
                        let message = format!("{} domains loaded.", domains.len());
                        self.bulk_domains = domains;
                        vec![self.notify(NotificationKind::Success, message)]
                    }
                    Err(e) => vec![self.notify(
                        NotificationKind::Error,
                        format!("Could not read domains file: {}", e),
                    )],
                }
            }
            Action::Generate => self.generate(),
            Action::PersistFailed(e) => {
                vec![self.notify(NotificationKind::Error, format!("Could not save emails: {}", e))]
            }
            Action::Copy => match export_text(&self.batch, ExportKind::Copy) {
                Ok(text) => vec![Effect::WriteClipboard(text)],
                Err(e) => vec![self.notify(NotificationKind::Error, e.to_string())],
            },
            Action::CopyCompleted(Ok(())) => {
                vec![self.notify(NotificationKind::Success, "Emails copied to clipboard!")]
            }
            Action::CopyCompleted(Err(e)) => {
                vec![self.notify(NotificationKind::Error, format!("Could not copy emails: {}", e))]
            }
            Action::Download => match export_text(&self.batch, ExportKind::Download) {
                Ok(text) => vec![Effect::WriteDownload(text)],
                Err(e) => vec![self.notify(NotificationKind::Error, e.to_string())],
            },
            Action::DownloadCompleted(Ok(path)) => {
                tracing::info!("📁 Emails written to {}", path);
                vec![self.notify(NotificationKind::Success, "Emails downloaded successfully!")]
            }
            Action::DownloadCompleted(Err(e)) => vec![self.notify(
                NotificationKind::Error,
                format!("Could not download emails: {}", e),
            )],
            Action::Compose => match compose_link(&self.batch, &self.compose_base_url) {
                Ok(link) => vec![Effect::ShowLink(link)],
                Err(e) => vec![self.notify(NotificationKind::Error, e.to_string())],
            },
            Action::Dismiss(id) => {
                if self.notification.as_ref().map(|n| n.id) == Some(id) {
                    self.notification = None;
                }
                Vec::new()
            }
        }
    }

    fn generate(&mut self) -> Vec<Effect> {
        let candidates = match self.mode {
            InputMode::Single => {
                let value = self.single_domain.trim();
                if value.is_empty() {
                    Vec::new()
                } else {
                    vec![value.to_string()]
                }
            }
            InputMode::Bulk => self.bulk_domains.clone(),
        };

        let domains = match validate_candidates(&candidates) {
            Ok(domains) => domains,
            Err(e) => {
                tracing::warn!("Generation rejected: {}", e);
                return vec![self.notify(NotificationKind::Error, e.to_string())];
            }
        };

        let mut batch = GeneratedBatch::new();
        for domain in domains {
            let emails = generate(&domain);
            batch.insert(domain, emails);
        }
        tracing::info!(
            "Generated {} emails for {} domains",
            batch.email_count(),
            batch.domain_count()
        );

        self.batch = batch;
        vec![
            Effect::SaveBatch(self.batch.clone()),
            self.notify(NotificationKind::Success, "Emails generated successfully!"),
        ]
    }

    /// Replaces the current notification. The returned effect carries the new
    /// id so the runtime can schedule its dismissal.
    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Effect {
        self.next_notification_id += 1;
        let notification = Notification {
            id: self.next_notification_id,
            kind,
            message: message.into(),
        };
        self.notification = Some(notification.clone());
        Effect::Notify(notification)
    }
}
