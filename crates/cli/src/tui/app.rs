//! Interactive feed state: feed reducer, composer, filter bar selection

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sentimind_domain::{
    CategoryFilter, Clock, FeedError, Post, PostService,
    usecases::{ComposeError, Composer, FeedState, Renderer},
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Results delivered by background requests
#[derive(Debug)]
pub enum AppEvent {
    Loaded {
        request: u64,
        result: Result<Vec<Post>, FeedError>,
    },
    Created(Result<Post, FeedError>),
    Categories(Result<Vec<String>, FeedError>),
}

/// Which pane receives arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Composer,
    Filters,
    Posts,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Composer => Focus::Filters,
            Focus::Filters => Focus::Posts,
            Focus::Posts => Focus::Composer,
        }
    }
}

/// Central application state
pub struct App {
    service: Arc<dyn PostService>,
    clock: Arc<dyn Clock>,
    tx: UnboundedSender<AppEvent>,
    pub renderer: Renderer,
    pub feed: FeedState,
    pub composer: Composer,
    /// Filter bar names, "all" excluded
    pub categories: Vec<String>,
    /// Index into the filter bar; 0 is "all"
    pub selected_filter: usize,
    pub focus: Focus,
    pub scroll: u16,
    next_request: u64,
    should_quit: bool,
}

impl App {
    pub fn new(
        service: Arc<dyn PostService>,
        clock: Arc<dyn Clock>,
        renderer: Renderer,
        composer: Composer,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        // Until the service answers, offer the categories we have styles for
        let categories = renderer.palette().names().to_vec();
        Self {
            service,
            clock,
            tx,
            renderer,
            feed: FeedState::new(),
            composer,
            categories,
            selected_filter: 0,
            focus: Focus::Composer,
            scroll: 0,
            next_request: 0,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the submit shortcut would send anything right now
    pub fn can_submit(&self) -> bool {
        self.composer.is_valid() && !self.feed.loading()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Initial requests: categories and the unfiltered feed
    pub fn start(&mut self) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.list_categories().await;
            let _ = tx.send(AppEvent::Categories(result));
        });
        self.load();
    }

    /// Start a list request for the current filter
    ///
    /// Earlier requests are not cancelled; whichever resolves last is shown.
    pub fn load(&mut self) {
        self.next_request += 1;
        let request = self.next_request;
        self.feed.begin_load();

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let category = self.feed.filter().as_name().map(str::to_string);
        tokio::spawn(async move {
            let result = service.list(category.as_deref()).await;
            let _ = tx.send(AppEvent::Loaded { request, result });
        });
    }

    /// Apply the filter bar entry at `index`
    pub fn select_filter(&mut self, index: usize) {
        let index = index.min(self.categories.len());
        self.selected_filter = index;
        let filter = match index {
            0 => CategoryFilter::All,
            i => CategoryFilter::Category(self.categories[i - 1].clone()),
        };
        if self.feed.set_filter(filter) {
            self.scroll = 0;
            self.load();
        }
    }

    /// Submit the composer text; blank text or a pending request is ignored
    pub fn submit(&mut self) {
        let content = match self.composer.submit(self.feed.loading()) {
            Ok(content) => content,
            Err(ComposeError::Empty) => return,
            Err(ComposeError::Busy) => {
                tracing::debug!("Submit ignored while a request is pending");
                return;
            }
        };

        self.feed.begin_create();
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.create(&content).await;
            let _ = tx.send(AppEvent::Created(result));
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Loaded { request, result } => {
                if request != self.next_request {
                    tracing::debug!(
                        request,
                        latest = self.next_request,
                        "Applying out-of-order list response"
                    );
                }
                self.feed.finish_load(result);
            }
            AppEvent::Created(result) => {
                if self.feed.finish_create(result) {
                    self.selected_filter = 0;
                    self.scroll = 0;
                    self.load();
                }
            }
            AppEvent::Categories(Ok(categories)) if !categories.is_empty() => {
                self.apply_categories(categories);
            }
            AppEvent::Categories(Ok(_)) => {}
            AppEvent::Categories(Err(error)) => {
                tracing::warn!(error = %error, "Could not load categories, using defaults");
            }
        }
    }

    /// Replace the filter bar entries, keeping the active filter selected
    ///
    /// An active category missing from the new list is appended so the bar
    /// still shows what the feed is filtered by.
    fn apply_categories(&mut self, mut categories: Vec<String>) {
        self.selected_filter = match self.feed.filter().as_name() {
            None => 0,
            Some(name) => match categories.iter().position(|c| c == name) {
                Some(i) => i + 1,
                None => {
                    tracing::debug!(category = name, "Active filter not listed by service");
                    categories.push(name.to_string());
                    categories.len()
                }
            },
        };
        self.categories = categories;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Enter if ctrl => self.submit(),
            KeyCode::Char('s') | KeyCode::Char('j') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => self.load(),
            KeyCode::F(5) => self.load(),
            KeyCode::Tab => self.focus = self.focus.next(),
            _ => match self.focus {
                Focus::Composer => self.handle_composer_key(key, ctrl),
                Focus::Filters => self.handle_filter_key(key),
                Focus::Posts => self.handle_posts_key(key),
            },
        }
    }

    fn handle_composer_key(&mut self, key: KeyEvent, ctrl: bool) {
        // Input is locked while a request is pending
        if self.feed.loading() {
            return;
        }
        match key.code {
            KeyCode::Char(c) if !ctrl => self.composer.push(c),
            KeyCode::Enter => self.composer.push('\n'),
            KeyCode::Backspace => self.composer.backspace(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_filter(self.selected_filter.saturating_sub(1));
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.select_filter(self.selected_filter + 1);
            }
            KeyCode::Home => self.select_filter(0),
            _ => {}
        }
    }

    fn handle_posts_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }
}
