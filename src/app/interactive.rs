//! Line-oriented session that stands in for the form UI: each input line is
//! one user action, and notifications expire on their own timer.

use crate::app::runtime::App;
use crate::app::view::{render_batch, render_output};
use crate::core::state::Action;
use crate::domain::model::InputMode;
use crate::domain::ports::{BatchStore, Clipboard, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Commands:
  mode single|bulk   switch input mode
  domain <value>     set the domain for single mode
  upload <path>      load a domain list for bulk mode
  generate           generate emails for the current input
  show               print the current batch
  copy               copy all emails to the clipboard
  download           write all emails to the download file
  compose            print a mail-compose link with every address in BCC
  help               show this text
  quit               leave";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Dispatch(Action),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "mode" => match rest.to_lowercase().as_str() {
            "single" => SessionCommand::Dispatch(Action::SetMode(InputMode::Single)),
            "bulk" => SessionCommand::Dispatch(Action::SetMode(InputMode::Bulk)),
            other => return Err(format!("Unknown mode '{}'. Use single or bulk.", other)),
        },
        "domain" => SessionCommand::Dispatch(Action::EditDomain(rest.to_string())),
        "upload" => {
            if rest.is_empty() {
                return Err("Usage: upload <path>".to_string());
            }
            SessionCommand::Dispatch(Action::UploadRequested(PathBuf::from(rest)))
        }
        "generate" => SessionCommand::Dispatch(Action::Generate),
        "copy" => SessionCommand::Dispatch(Action::Copy),
        "download" => SessionCommand::Dispatch(Action::Download),
        "compose" => SessionCommand::Dispatch(Action::Compose),
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type help for a list.", other)),
    };
    Ok(Some(command))
}

/// Runs until `quit` or end of input.
pub async fn run_session<S, B, C, R, W>(app: &mut App<S, B, C>, input: R, mut out: W) -> Result<()>
where
    S: Storage,
    B: BatchStore,
    C: Clipboard,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    out.write_all(format!("{}\n", HELP).as_bytes()).await?;
    if app.state().batch.domain_count() > 0 {
        out.write_all(format!("{}\n", render_batch(&app.state().batch)).as_bytes())
            .await?;
    }

    loop {
        out.flush().await?;
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("Input closed, ending session");
                    break;
                };
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(SessionCommand::Quit)) => break,
                    Ok(Some(SessionCommand::Help)) => {
                        out.write_all(format!("{}\n", HELP).as_bytes()).await?;
                    }
                    Ok(Some(SessionCommand::Show)) => {
                        out.write_all(format!("{}\n", render_batch(&app.state().batch)).as_bytes())
                            .await?;
                    }
                    Ok(Some(SessionCommand::Dispatch(action))) => app.dispatch(action).await,
                    Err(message) => {
                        out.write_all(format!("{}\n", message).as_bytes()).await?;
                    }
                }
            }
            Some(action) = app.next_completion() => {
                if let Action::Dismiss(id) = &action {
                    tracing::debug!("Notification {} expired", id);
                }
                app.dispatch(action).await;
            }
        }

        for output in app.drain_output() {
            out.write_all(format!("{}\n", render_output(&output)).as_bytes())
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("domain https://www.example.com"),
            Ok(Some(SessionCommand::Dispatch(Action::EditDomain(
                "https://www.example.com".to_string()
            ))))
        );
        assert_eq!(
            parse_command("MODE Bulk"),
            Ok(Some(SessionCommand::Dispatch(Action::SetMode(InputMode::Bulk))))
        );
        assert_eq!(
            parse_command("upload  ./domains.txt "),
            Ok(Some(SessionCommand::Dispatch(Action::UploadRequested(PathBuf::from(
                "./domains.txt"
            )))))
        );
        assert_eq!(parse_command("generate"), Ok(Some(SessionCommand::Dispatch(Action::Generate))));
        assert_eq!(parse_command("exit"), Ok(Some(SessionCommand::Quit)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("mode sideways").is_err());
        assert!(parse_command("upload").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn test_domain_without_value_clears_input() {
        assert_eq!(
            parse_command("domain"),
            Ok(Some(SessionCommand::Dispatch(Action::EditDomain(String::new()))))
        );
    }
}
