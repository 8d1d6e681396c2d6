//! Feed state use case - posts, loading flag, error banner and category filter

use crate::{
    model::{CategoryFilter, Post},
    ports::{FeedError, PostService},
};

/// Banner shown when a list request fails
pub const LOAD_FAILED_MESSAGE: &str = "Error al cargar los posts";
/// Banner shown when a create request fails
pub const CREATE_FAILED_MESSAGE: &str = "Error al crear el post";

/// Observable feed state
///
/// This is a plain reducer: it never performs I/O. [`FeedStore`] drives it
/// sequentially; the interactive UI drives it from background task results.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    posts: Vec<Post>,
    loading: bool,
    error: Option<&'static str>,
    filter: CategoryFilter,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Change the filter; returns true when it differs and a reload is due
    pub fn set_filter(&mut self, filter: CategoryFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        tracing::debug!(filter = %filter, "Filter changed");
        self.filter = filter;
        true
    }

    /// Mark a list request as started
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of a list request
    ///
    /// Whatever resolves last wins, even if it was requested for an older
    /// filter.
    pub fn finish_load(&mut self, result: Result<Vec<Post>, FeedError>) {
        match result {
            Ok(posts) => {
                tracing::info!(count = posts.len(), filter = %self.filter, "Loaded posts");
                self.posts = posts;
            }
            Err(error) => {
                tracing::error!(error = %error, "Error fetching posts");
                self.error = Some(LOAD_FAILED_MESSAGE);
            }
        }
        self.loading = false;
    }

    /// Mark a create request as started
    pub fn begin_create(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of a create request
    ///
    /// On success the filter is reset to "all" and true is returned: the
    /// caller must follow up with a list fetch. `loading` stays set until that
    /// fetch finishes.
    pub fn finish_create(&mut self, result: Result<Post, FeedError>) -> bool {
        match result {
            Ok(post) => {
                tracing::info!(
                    post_id = post.id,
                    category = %post.primary_category,
                    "Post created"
                );
                self.filter = CategoryFilter::All;
                true
            }
            Err(error) => {
                tracing::error!(error = %error, "Error creating post");
                self.error = Some(CREATE_FAILED_MESSAGE);
                self.loading = false;
                false
            }
        }
    }
}

/// Async driver that runs feed state transitions against a [`PostService`]
pub struct FeedStore<S> {
    service: S,
    state: FeedState,
}

impl<S: PostService> FeedStore<S> {
    /// Create a store without fetching; call [`FeedStore::init`] next
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: FeedState::new(),
        }
    }

    /// Create a store with an initial filter and run the first fetch
    pub async fn open(service: S, filter: CategoryFilter) -> Self {
        let mut store = Self::new(service);
        store.state.set_filter(filter);
        store.init().await;
        store
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Initial fetch for the current filter
    pub async fn init(&mut self) {
        self.refetch().await;
    }

    /// Fetch the list for the current filter
    pub async fn refetch(&mut self) {
        self.state.begin_load();
        let result = self.service.list(self.state.filter.as_name()).await;
        self.state.finish_load(result);
    }

    /// Change the filter, fetching only when it actually changed
    pub async fn set_filter(&mut self, filter: CategoryFilter) {
        if self.state.set_filter(filter) {
            self.refetch().await;
        }
    }

    /// Create a post, then reset the filter and reload the full list
    ///
    /// Returns the created post on success. The post list only reflects it
    /// after the follow-up fetch.
    pub async fn add_post(&mut self, content: &str) -> Option<Post> {
        self.state.begin_create();
        match self.service.create(content).await {
            Ok(post) => {
                self.state.finish_create(Ok(post.clone()));
                self.refetch().await;
                Some(post)
            }
            Err(error) => {
                self.state.finish_create(Err(error));
                None
            }
        }
    }
}
