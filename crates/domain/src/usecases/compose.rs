//! Post composer - client-side validation and character counter

use thiserror::Error;

/// Soft character limit shown by the counter
pub const DEFAULT_MAX_CHARS: usize = 1000;

/// Reasons a submission is refused before reaching the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("Post text is empty")]
    Empty,
    #[error("A request is already in progress")]
    Busy,
}

/// Check whether text may be submitted right now
pub fn validate_submission(text: &str, loading: bool) -> Result<(), ComposeError> {
    if text.trim().is_empty() {
        return Err(ComposeError::Empty);
    }
    if loading {
        return Err(ComposeError::Busy);
    }
    Ok(())
}

/// Editable post input
///
/// The limit is soft: text past it is flagged, never truncated.
#[derive(Debug, Clone)]
pub struct Composer {
    text: String,
    max_chars: usize,
}

impl Composer {
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            max_chars,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn is_over_limit(&self) -> bool {
        self.char_count() > self.max_chars
    }

    /// Past nine tenths of the limit; the counter is highlighted from here
    pub fn is_near_limit(&self) -> bool {
        self.char_count() > self.max_chars * 9 / 10
    }

    /// Counter label, e.g. "12 / 1000"
    pub fn counter(&self) -> String {
        format!("{} / {}", self.char_count(), self.max_chars)
    }

    /// Whether the text alone is acceptable (non-blank)
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Take the text for submission, clearing the input on success
    ///
    /// The returned text is sent as typed, without trimming.
    pub fn submit(&mut self, loading: bool) -> Result<String, ComposeError> {
        validate_submission(&self.text, loading)?;
        Ok(std::mem::take(&mut self.text))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}
