//! Application use cases / business logic

pub mod compose;
pub mod feed;
pub mod render;

pub use compose::{ComposeError, Composer, validate_submission};
pub use feed::{FeedState, FeedStore};
pub use render::{RenderConfig, Renderer};
