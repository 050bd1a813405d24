use crate::core::input::read_domain_file;
use crate::core::state::{Action, AppState, Effect};
use crate::domain::model::Notification;
use crate::domain::ports::{BatchStore, Clipboard, ConfigProvider, Storage};
use crate::utils::error::Result;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Things the front end has to show the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Notify(Notification),
    Link(String),
}

/// Drives [`AppState`]: feeds actions in, executes the effects that come out.
///
/// Work that finishes later (file reads, dismiss timers) reports back through
/// an internal channel; callers pull those with [`App::next_completion`].
pub struct App<S: Storage, B: BatchStore, C: Clipboard> {
    state: AppState,
    downloads: S,
    store: B,
    clipboard: C,
    output_path: String,
    download_filename: String,
    dismiss_after: Duration,
    completions_tx: mpsc::UnboundedSender<Action>,
    completions_rx: mpsc::UnboundedReceiver<Action>,
    dismiss_timer: Option<JoinHandle<()>>,
    upload_task: Option<JoinHandle<()>>,
    outbox: Vec<Output>,
}

impl<S: Storage, B: BatchStore, C: Clipboard> App<S, B, C> {
    pub fn new(downloads: S, store: B, clipboard: C, config: &impl ConfigProvider) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config.compose_base_url()),
            downloads,
            store,
            clipboard,
            output_path: config.output_path().to_string(),
            download_filename: config.download_filename().to_string(),
            dismiss_after: Duration::from_secs(config.dismiss_after_secs()),
            completions_tx,
            completions_rx,
            dismiss_timer: None,
            upload_task: None,
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Loads the last persisted batch, if any. A broken store is logged and
    /// the session starts empty.
    pub async fn restore(&mut self) {
        match self.store.load().await {
            Ok(Some(batch)) => self.dispatch(Action::Restore(batch)).await,
            Ok(None) => tracing::debug!("No stored batch to restore"),
            Err(e) => {
                tracing::warn!("Could not restore last batch: {}", e);
                tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
            }
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            tracing::debug!("Dispatching {}", action_name(&action));
            for effect in self.state.update(action) {
                if let Some(follow_up) = self.run_effect(effect).await {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    /// Waits for the next deferred action (upload result or dismissal).
    pub async fn next_completion(&mut self) -> Option<Action> {
        self.completions_rx.recv().await
    }

    /// Processes deferred actions until no file read is outstanding.
    pub async fn settle_upload(&mut self) {
        while self.state.upload_pending() {
            match self.next_completion().await {
                Some(action) => self.dispatch(action).await,
                None => break,
            }
        }
    }

    pub fn drain_output(&mut self) -> Vec<Output> {
        std::mem::take(&mut self.outbox)
    }

    async fn run_effect(&mut self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::ReadFile { ticket, path } => {
                if let Some(previous) = self.upload_task.take() {
                    previous.abort();
                }
                let tx = self.completions_tx.clone();
                self.upload_task = Some(tokio::spawn(async move {
                    let result = read_domain_file(&path).await.map_err(|e| e.to_string());
                    let _ = tx.send(Action::UploadCompleted { ticket, result });
                }));
                None
            }
            Effect::SaveBatch(batch) => match self.store.save(&batch).await {
                Ok(()) => None,
                Err(e) => {
                    tracing::error!("❌ Failed to persist batch: {}", e);
                    Some(Action::PersistFailed(e.user_friendly_message()))
                }
            },
            Effect::WriteClipboard(text) => {
                let result = self.clipboard.write_text(&text).await;
                if let Err(e) = &result {
                    tracing::error!("❌ Clipboard write failed: {}", e);
                }
                Some(Action::CopyCompleted(result.map_err(|e| e.user_friendly_message())))
            }
            Effect::WriteDownload(text) => {
                let result = self.write_download(&text).await;
                Some(Action::DownloadCompleted(result.map_err(|e| e.user_friendly_message())))
            }
            Effect::ShowLink(link) => {
                self.outbox.push(Output::Link(link));
                None
            }
            Effect::Notify(notification) => {
                self.schedule_dismiss(notification.id);
                self.outbox.push(Output::Notify(notification));
                None
            }
        }
    }

    async fn write_download(&self, text: &str) -> Result<String> {
        self.downloads
            .write_file(&self.download_filename, text.as_bytes())
            .await?;
        let path = Path::new(&self.output_path).join(&self.download_filename);
        Ok(path.display().to_string())
    }

    /// Any earlier timer is cancelled so it cannot dismiss the new message.
    fn schedule_dismiss(&mut self, id: u64) {
        if let Some(previous) = self.dismiss_timer.take() {
            previous.abort();
        }
        let tx = self.completions_tx.clone();
        let delay = self.dismiss_after;
        self.dismiss_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::Dismiss(id));
        }));
    }
}

impl<S: Storage, B: BatchStore, C: Clipboard> Drop for App<S, B, C> {
    fn drop(&mut self) {
        if let Some(timer) = self.dismiss_timer.take() {
            timer.abort();
        }
        if let Some(upload) = self.upload_task.take() {
            upload.abort();
        }
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::SetMode(_) => "set_mode",
        Action::EditDomain(_) => "edit_domain",
        Action::Restore(_) => "restore",
        Action::UploadRequested(_) => "upload_requested",
        Action::UploadCompleted { .. } => "upload_completed",
        Action::Generate => "generate",
        Action::PersistFailed(_) => "persist_failed",
        Action::Copy => "copy",
        Action::CopyCompleted(_) => "copy_completed",
        Action::Download => "download",
        Action::DownloadCompleted(_) => "download_completed",
        Action::Compose => "compose",
        Action::Dismiss(_) => "dismiss",
    }
}
