//! Post command - publish text and show the refreshed feed

use anyhow::{Context, Result, bail};
use sentimind_domain::{
    Clock, SystemClock,
    usecases::{ComposeError, Composer, FeedStore, render::feed_summary},
};
use std::io::{self, Read};
use std::path::PathBuf;

use crate::args::PostArgs;
use crate::commands::{build_renderer, build_service};
use crate::config::AppConfig;

pub async fn execute(args: PostArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let mut composer = Composer::new(config.feed.max_chars);
    composer.set_text(get_input_text(&args)?);

    if composer.is_over_limit() {
        tracing::warn!(
            chars = composer.char_count(),
            max_chars = composer.max_chars(),
            "Post exceeds the suggested length"
        );
    }

    let text = match composer.submit(false) {
        Ok(text) => text,
        Err(ComposeError::Empty) => bail!("No text provided for the post"),
        Err(ComposeError::Busy) => bail!("Another request is in progress"),
    };

    let service = build_service(&config)?;
    let mut store = FeedStore::new(service);
    let created = store.add_post(&text).await;
    let state = store.state();

    let Some(post) = created else {
        bail!("{}", state.error().unwrap_or("Error al crear el post"));
    };

    if args.json {
        let json = serde_json::to_string_pretty(&post).context("Failed to serialize post")?;
        println!("{}", json);
        return Ok(());
    }

    let renderer = build_renderer(&config);
    let now = SystemClock.now();
    println!("🚀 Publicado");
    println!();
    println!("{}", renderer.render_card(&post, now));
    println!();

    // The list reload after a create can fail on its own
    match state.error() {
        Some(error) => eprintln!("⚠️ {}", error),
        None => println!("📊 {}", feed_summary(state.posts().len(), state.filter())),
    }

    Ok(())
}

fn get_input_text(args: &PostArgs) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        if path.as_os_str() == "-" {
            return read_stdin();
        }

        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    // Default to stdin if no input specified
    read_stdin()
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read from stdin")?;
    Ok(text)
}
