//! VivoPass command-line client
//!
//! Thin front end over `vivopass-client`: one subcommand per page or form.
//! The session lives in `<data dir>/session.json` between invocations.

mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::broadcast::Receiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vivopass_client::{ApiClient, ClientConfig, FileStorage, Notification, Notifier, SessionService};

use crate::commands::{Command, Reported};

#[derive(Parser)]
#[command(name = "vivopass")]
#[command(about = "VivoPass - events, tickets and forums from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend origin (overrides VIVOPASS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the session file (overrides VIVOPASS_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "vivopass=debug,vivopass_client=debug"
    } else {
        "vivopass=info,vivopass_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    tracing::debug!("Using backend {} and data dir {:?}", config.api_url, config.data_dir);

    let storage = Arc::new(FileStorage::open(config.session_path()).await?);
    let session = SessionService::new(ApiClient::new(&config)?, storage, Notifier::new())
        .with_role_resolution(config.resolve_role_names);
    let mut notifications = session.notifier().subscribe();

    let result = commands::run(cli.command, &session).await;

    for n in drain(&mut notifications) {
        eprintln!("{}", render::notification(&n));
    }

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is::<Reported>() => Ok(ExitCode::FAILURE),
        Err(e) => Err(e),
    }
}

fn drain(rx: &mut Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push(n);
    }
    out
}
