use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;
use cardflow::config::CardConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CARDFLOW_LOG";

#[derive(Parser, Debug)]
#[command(name = "cardflow", version, about = "Modal card flow demo")]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Title shown on the sheet border
    #[arg(long)]
    title: Option<String>,

    /// Sheet corner radius (0 draws square corners)
    #[arg(long, value_name = "N")]
    radius: Option<f32>,

    /// Disable drag to dismiss
    #[arg(long)]
    no_drag: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let config = load_config(&args)?;
    tracing::info!(?config, "starting");
    cardflow::ui::runtime::run(config).context("terminal session failed")?;
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<CardConfig> {
    let mut config = match &args.config {
        Some(path) => CardConfig::load_from(path)?,
        None => CardConfig::load()?,
    };
    if let Some(title) = &args.title {
        config = config.with_title(title.clone());
    }
    if let Some(radius) = args.radius {
        config = config.with_corner_radius(radius);
    }
    if args.no_drag {
        config = config.with_drag_to_dismiss(false);
    }
    config.validate()?;
    Ok(config)
}

/// Log to a file: the terminal belongs to the UI.
fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file '{}'", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
