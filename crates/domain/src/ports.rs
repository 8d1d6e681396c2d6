//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::Post;

/// Error type for feed service operations
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Rejected by service: {0}")]
    Rejected(String),
}

/// Port for the classification-backed feed service
///
/// Every call is a single round trip. Implementations do not retry or cache.
#[async_trait]
pub trait PostService: Send + Sync {
    /// List posts, newest first, optionally restricted to one category
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, FeedError>;

    /// Submit text for classification and return the stored post
    async fn create(&self, content: &str) -> Result<Post, FeedError>;

    /// List the category names the service can assign
    async fn list_categories(&self) -> Result<Vec<String>, FeedError>;
}

#[async_trait]
impl<T: PostService + ?Sized> PostService for std::sync::Arc<T> {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, FeedError> {
        (**self).list(category).await
    }

    async fn create(&self, content: &str) -> Result<Post, FeedError> {
        (**self).create(content).await
    }

    async fn list_categories(&self) -> Result<Vec<String>, FeedError> {
        (**self).list_categories().await
    }
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
