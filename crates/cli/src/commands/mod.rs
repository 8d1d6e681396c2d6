//! Subcommand implementations

pub mod categories;
pub mod config;
pub mod doctor;
pub mod feed;
pub mod post;
pub mod tui;

use anyhow::{Result, bail};
use sentimind_adapters::{InMemoryPostService, RestPostService};
use sentimind_domain::{
    CategoryPalette, PostService,
    usecases::{RenderConfig, Renderer},
};
use std::sync::Arc;

use crate::config::AppConfig;

/// Build the post service selected by `api.backend`
pub(crate) fn build_service(config: &AppConfig) -> Result<Arc<dyn PostService>> {
    match config.api.backend.trim() {
        "rest" => {
            let base_url = config.api.base_url.trim();
            if base_url.is_empty() {
                bail!("api.base_url is required for the rest backend");
            }
            tracing::debug!(base_url = %base_url, "Using REST backend");
            Ok(Arc::new(RestPostService::with_base_url(base_url.to_string())))
        }
        "memory" => {
            tracing::debug!("Using in-memory backend");
            Ok(Arc::new(InMemoryPostService::seeded()))
        }
        other => bail!("Unknown backend: {}", other),
    }
}

pub(crate) fn build_renderer(config: &AppConfig) -> Renderer {
    Renderer::new(
        RenderConfig {
            relative_time: config.feed.relative_time,
            ..Default::default()
        },
        CategoryPalette::standard(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_service_rejects_unknown_backend() {
        let mut config = AppConfig::default();
        config.api.backend = "grpc".to_string();

        assert!(build_service(&config).is_err());
    }

    #[test]
    fn test_build_service_requires_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "  ".to_string();

        assert!(build_service(&config).is_err());
    }

    #[tokio::test]
    async fn test_memory_backend_serves_seed_feed() {
        let mut config = AppConfig::default();
        config.api.backend = "memory".to_string();

        let service = build_service(&config).unwrap();
        assert!(!service.list(None).await.unwrap().is_empty());
    }
}
