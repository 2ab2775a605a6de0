//! Command-line replay of recorded pointer gestures against a schedule view.

use std::{fs, path::PathBuf};

use anyconf_config::{ReplayScript, ViewerConfig, ViewerConfigSource, replay};
use anyconf_model::parse_sessions;
use anyconf_pager::PageWindow;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "anyconf-replay",
    about = "Replay a recorded gesture script against a schedule collection"
)]
struct Cli {
    /// JSON session feed
    #[arg(long)]
    sessions: PathBuf,
    /// JSON gesture script
    #[arg(long)]
    script: PathBuf,
    /// Viewer config file (TOML or JSON); defaults to the environment
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only page through sessions on this date (YYYY-MM-DD)
    #[arg(long)]
    day: Option<String>,
}

fn describe(window: Option<PageWindow>) -> String {
    let Some(window) = window else {
        return "no pages".to_string();
    };
    let show = |page: Option<anyconf_pager::PageId>| {
        page.map_or_else(|| "-".to_string(), |page| page.to_string())
    };
    format!(
        "previous {} | current {} | next {}",
        show(window.previous),
        window.current,
        show(window.next)
    )
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let (mut config, source) = match &cli.config {
        Some(path) => (
            ViewerConfig::load_from_file(path)?,
            ViewerConfigSource::File(path.clone()),
        ),
        None => ViewerConfig::load_from_env()?,
    };
    tracing::info!("viewer config loaded from {source:?}");
    if cli.day.is_some() {
        config.day = cli.day;
    }

    let feed = fs::read_to_string(&cli.sessions).with_context(|| {
        format!("failed to read sessions from {}", cli.sessions.display())
    })?;
    let sessions = parse_sessions(&feed).with_context(|| {
        format!("invalid session feed {}", cli.sessions.display())
    })?;
    let script = ReplayScript::load(&cli.script)?;

    let report = replay(&config, &sessions, &script)?;
    println!("{} pages", report.pages);
    for release in &report.releases {
        println!(
            "step {:>3}: {:<40} {:?}",
            release.step,
            describe(release.window),
            release.outcome
        );
    }
    println!("final: {}", describe(report.final_window));
    Ok(())
}
