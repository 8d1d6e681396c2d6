//! Feed command - one-shot listing

use anyhow::{Context, Result, bail};
use sentimind_domain::{
    CategoryFilter, Clock, Post, SystemClock,
    usecases::{FeedStore, render::feed_summary},
};
use serde::Serialize;
use std::path::PathBuf;

use crate::args::FeedArgs;
use crate::commands::{build_renderer, build_service};
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
pub(crate) struct FeedOutput<'a> {
    pub filter: Option<&'a str>,
    pub count: usize,
    pub summary: String,
    pub posts: &'a [Post],
}

pub async fn execute(args: FeedArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let service = build_service(&config)?;
    let filter = CategoryFilter::from_name(args.category.as_deref());

    tracing::info!(filter = %filter, "Loading feed");
    let store = FeedStore::open(service, filter).await;
    let state = store.state();

    if let Some(error) = state.error() {
        bail!("{}", error);
    }

    if args.json {
        let output = FeedOutput {
            filter: state.filter().as_name(),
            count: state.posts().len(),
            summary: feed_summary(state.posts().len(), state.filter()),
            posts: state.posts(),
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize feed")?;
        println!("{}", json);
    } else {
        let renderer = build_renderer(&config);
        println!(
            "{}",
            renderer.render_filter_bar(renderer.palette().names(), state.filter())
        );
        println!();
        println!("{}", renderer.render_feed(state, SystemClock.now()));
    }

    Ok(())
}
