//! Tui command - interactive feed in the terminal

use anyhow::Result;
use sentimind_domain::{SystemClock, usecases::Composer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::args::TuiArgs;
use crate::commands::{build_renderer, build_service};
use crate::config::AppConfig;
use crate::tui::{self, App};

pub async fn execute(_args: TuiArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let service = build_service(&config)?;
    let renderer = build_renderer(&config);
    let tick = Duration::from_millis(config.tui.tick_millis.max(10));

    tracing::info!(
        backend = %config.api.backend,
        max_chars = config.feed.max_chars,
        "Starting terminal feed"
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(
        service,
        Arc::new(SystemClock),
        renderer,
        Composer::new(config.feed.max_chars),
        tx,
    );

    tui::run(app, rx, tick).await
}
