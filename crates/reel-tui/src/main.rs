//! Terminal form editor for Reel records.

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use reel_config::{PublisherKind, ReelConfig};
use reel_core::Editor;
use reel_tui::{OutcomeBus, TuiConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for the Reel editor.
#[derive(Parser)]
#[command(name = "reel", version)]
struct Cli {
    /// Optional path to a reel.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Post saves to this http(s) endpoint instead of the mock api
    #[arg(long)]
    endpoint: Option<String>,
    /// Artificial delay for the mock api, in milliseconds
    #[arg(long)]
    mock_latency_ms: Option<u64>,
}

/// Entry point for the Reel TUI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting reel (config_set={}, endpoint_set={}, mock_latency_set={})",
        cli.config.is_some(),
        cli.endpoint.is_some(),
        cli.mock_latency_ms.is_some()
    );
    let mut config = if let Some(path) = cli.config.as_ref() {
        info!("loading config from path: {}", path.display());
        ReelConfig::load_from_path(path).context("failed to load config")?
    } else {
        let cwd = std::env::current_dir().context("cwd")?;
        info!("loading layered config from cwd: {}", cwd.display());
        let layered = ReelConfig::load_layered(&cwd).context("failed to load layered config")?;
        debug!("layered config loaded (layers={})", layered.layers.len());
        layered.config
    };

    if let Some(endpoint) = cli.endpoint {
        config.publisher.kind = PublisherKind::Http;
        config.publisher.endpoint = Some(endpoint);
    }
    if let Some(latency_ms) = cli.mock_latency_ms {
        config.publisher.mock.latency_ms = latency_ms;
    }
    config.validate().context("invalid publisher settings")?;

    let publisher = match config.publisher.kind {
        PublisherKind::Mock => format!("mock ({}ms)", config.publisher.mock.latency_ms),
        PublisherKind::Http => config.publisher.endpoint.clone().unwrap_or_default(),
    };
    let outcomes = OutcomeBus::new(64);
    let editor = Editor::from_config(&config)
        .context("failed to build editor")?
        .with_sink(Arc::new(outcomes.clone()));

    reel_tui::run(editor, outcomes, TuiConfig { publisher }).await
}
