use clap::Parser;
use permutix::app::interactive::run_session;
use permutix::app::view::{render_batch, render_output};
use permutix::core::state::Action;
use permutix::domain::model::{InputMode, NotificationKind};
use permutix::domain::ports::{BatchStore, Clipboard, Storage};
use permutix::utils::monitor::ProcessMonitor;
use permutix::utils::{logger, validation::Validate};
use permutix::{
    App, CliConfig, Command, KeyValueBatchStore, LocalStorage, Output, Settings, SystemClipboard,
    TomlConfig,
};
use std::path::PathBuf;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Logging first so config errors are reported
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting permutix");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // Optional TOML file, then CLI overrides
    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::error!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => None,
    };
    let settings = Settings::resolve(file_config, cli.overrides());

    if let Err(e) = settings.validate() {
        tracing::error!(
            "❌ Configuration validation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor = ProcessMonitor::new(cli.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 Process monitoring enabled");
    }

    let downloads = LocalStorage::new(settings.output_path.clone());
    let store = KeyValueBatchStore::new(LocalStorage::new(settings.state_dir.clone()));
    let clipboard = SystemClipboard::from_setting(settings.clipboard.as_deref());
    let mut app = App::new(downloads, store, clipboard, &settings);
    app.restore().await;

    let succeeded = match cli.command {
        Command::Generate {
            domain,
            file,
            copy,
            download,
            compose,
        } => {
            run_generate(&mut app, &monitor, domain, file, copy, download, compose).await
        }
        Command::Show => {
            println!("{}", render_batch(&app.state().batch));
            true
        }
        Command::Copy => run_actions(&mut app, [Action::Copy]).await,
        Command::Download => run_actions(&mut app, [Action::Download]).await,
        Command::Compose => run_actions(&mut app, [Action::Compose]).await,
        Command::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            run_session(&mut app, stdin, tokio::io::stdout()).await?;
            true
        }
    };

    monitor.log_final_stats();

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_generate<S, B, C>(
    app: &mut App<S, B, C>,
    monitor: &ProcessMonitor,
    domain: Option<String>,
    file: Option<String>,
    copy: bool,
    download: bool,
    compose: bool,
) -> bool
where
    S: Storage,
    B: BatchStore,
    C: Clipboard,
{
    match file {
        Some(path) => {
            tracing::info!("📁 Loading domains from: {}", path);
            app.dispatch(Action::SetMode(InputMode::Bulk)).await;
            app.dispatch(Action::UploadRequested(PathBuf::from(path))).await;
            app.settle_upload().await;
        }
        None => {
            app.dispatch(Action::SetMode(InputMode::Single)).await;
            app.dispatch(Action::EditDomain(domain.unwrap_or_default())).await;
        }
    }
    monitor.log_stats("Input");

    app.dispatch(Action::Generate).await;
    monitor.log_stats("Generate");
    if !print_output(app) {
        return false;
    }
    println!("{}", render_batch(&app.state().batch));

    let mut follow_ups = Vec::new();
    if copy {
        follow_ups.push(Action::Copy);
    }
    if download {
        follow_ups.push(Action::Download);
    }
    if compose {
        follow_ups.push(Action::Compose);
    }
    run_actions(app, follow_ups).await
}

async fn run_actions<S, B, C>(
    app: &mut App<S, B, C>,
    actions: impl IntoIterator<Item = Action>,
) -> bool
where
    S: Storage,
    B: BatchStore,
    C: Clipboard,
{
    let mut succeeded = true;
    for action in actions {
        app.dispatch(action).await;
        succeeded &= print_output(app);
    }
    succeeded
}

/// Prints pending output; false if any of it was an error notification.
fn print_output<S, B, C>(app: &mut App<S, B, C>) -> bool
where
    S: Storage,
    B: BatchStore,
    C: Clipboard,
{
    let mut succeeded = true;
    for output in app.drain_output() {
        match &output {
            Output::Notify(n) if n.kind == NotificationKind::Error => {
                succeeded = false;
                eprintln!("{}", render_output(&output));
            }
            Output::Notify(_) => eprintln!("{}", render_output(&output)),
            Output::Link(_) => println!("{}", render_output(&output)),
        }
    }
    succeeded
}
