//! Categories command - list labels the service can assign

use anyhow::{Context, Result};
use sentimind_domain::CategoryPalette;
use std::path::PathBuf;

use crate::args::CategoriesArgs;
use crate::commands::build_service;
use crate::config::AppConfig;

pub async fn execute(args: CategoriesArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let service = build_service(&config)?;

    let categories = service
        .list_categories()
        .await
        .context("Failed to load categories")?;

    if args.json {
        let palette = CategoryPalette::standard();
        let output = serde_json::json!({
            "count": categories.len(),
            "categories": categories.iter().map(|name| serde_json::json!({
                "name": name,
                "emoji": palette.lookup(name).emoji,
                "styled": palette.contains(name),
            })).collect::<Vec<_>>()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let palette = CategoryPalette::standard();
        println!("Categories ({} found)", categories.len());
        println!("====================");
        for name in &categories {
            println!("  {} {}", palette.lookup(name).emoji, name);
        }
    }

    Ok(())
}
