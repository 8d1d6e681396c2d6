//! Domain models and value objects

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single (category, confidence) pair from multi-label classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedCategory {
    /// Category label
    #[serde(alias = "category__name")]
    pub name: String,
    /// Independent per-label score in [0, 1]
    pub confidence: f64,
}

impl DetectedCategory {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// A classified post as returned by the feed service
///
/// Posts are produced by the service in response to a create request and are
/// never mutated client-side. Both wire schemas (legacy single-category and
/// multi-category) decode into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PostWire")]
pub struct Post {
    /// Server-assigned identifier
    pub id: u64,
    /// Post text
    pub content: String,
    /// Highest-confidence (or first-listed) label
    pub primary_category: String,
    /// Confidence of the primary label
    pub primary_confidence: f64,
    /// Multi-label output in server order
    pub categories: Vec<DetectedCategory>,
    /// When the service stored the post
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Post {
    /// Build a post, deriving the label list from the primary pair when empty
    pub fn new(
        id: u64,
        content: impl Into<String>,
        primary: DetectedCategory,
        categories: Vec<DetectedCategory>,
        created_at: OffsetDateTime,
    ) -> Self {
        let categories = if categories.is_empty() {
            vec![primary.clone()]
        } else {
            categories
        };

        Self {
            id,
            content: content.into(),
            primary_category: primary.name,
            primary_confidence: primary.confidence,
            categories,
            created_at,
        }
    }

    /// Primary (category, confidence) pair
    pub fn primary(&self) -> DetectedCategory {
        DetectedCategory::new(self.primary_category.clone(), self.primary_confidence)
    }

    /// Labels to display; the primary pair stands in for an empty list
    pub fn labels(&self) -> Cow<'_, [DetectedCategory]> {
        if self.categories.is_empty() {
            Cow::Owned(vec![self.primary()])
        } else {
            Cow::Borrowed(&self.categories)
        }
    }
}

/// Raw post shape accepted from the wire
#[derive(Deserialize)]
struct PostWire {
    id: u64,
    content: String,
    #[serde(default)]
    primary_category: Option<String>,
    #[serde(default)]
    primary_confidence: Option<f64>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    categories: Option<Vec<DetectedCategory>>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl TryFrom<PostWire> for Post {
    type Error = String;

    fn try_from(wire: PostWire) -> Result<Self, Self::Error> {
        let name = wire
            .primary_category
            .or(wire.category)
            .ok_or_else(|| format!("post {} has no primary category", wire.id))?;
        let confidence = wire
            .primary_confidence
            .or(wire.confidence)
            .ok_or_else(|| format!("post {} has no primary confidence", wire.id))?;

        Ok(Post::new(
            wire.id,
            wire.content,
            DetectedCategory::new(name, confidence),
            wire.categories.unwrap_or_default(),
            wire.created_at,
        ))
    }
}

/// Category filter applied to the feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every post
    #[default]
    All,
    /// Show posts of a single category
    Category(String),
}

impl CategoryFilter {
    /// Build a filter from an optional name; blank names mean "all"
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => Self::Category(n.to_string()),
            _ => Self::All,
        }
    }

    /// Category name to send to the service, if any
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Category(name) => Some(name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES_LABEL),
            Self::Category(name) => f.write_str(name),
        }
    }
}

/// Label of the "no filter" entry in the filter bar
pub const ALL_CATEGORIES_LABEL: &str = "Todas";

/// Request body for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub content: String,
}

/// Response body of the categories endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_multi_category_schema() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "content": "Hoy me gradué",
            "primary_category": "Alegría",
            "primary_confidence": 0.91,
            "categories": [
                {"name": "Alegría", "confidence": 0.91},
                {"name": "Orgullo", "confidence": 0.85}
            ],
            "created_at": "2024-05-01T10:30:00.123456Z"
        }))
        .unwrap();

        assert_eq!(post.primary_category, "Alegría");
        assert_eq!(post.labels().len(), 2);
        assert_eq!(post.labels()[1].name, "Orgullo");
    }

    #[test]
    fn test_decode_legacy_schema_derives_single_label() {
        let post: Post = serde_json::from_value(json!({
            "id": 1,
            "content": "Mi perro persigue su cola",
            "category": "Gracioso",
            "confidence": 0.92,
            "created_at": "2024-05-01T10:30:00+00:00"
        }))
        .unwrap();

        assert_eq!(post.primary_category, "Gracioso");
        assert_eq!(post.categories, vec![DetectedCategory::new("Gracioso", 0.92)]);
    }

    #[test]
    fn test_primary_fields_win_over_legacy_fields() {
        let post: Post = serde_json::from_value(json!({
            "id": 2,
            "content": "x",
            "category": "Viejo",
            "confidence": 0.1,
            "primary_category": "Nuevo",
            "primary_confidence": 0.8,
            "categories": [],
            "created_at": "2024-05-01T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(post.primary_category, "Nuevo");
        assert_eq!(post.labels().as_ref(), &[DetectedCategory::new("Nuevo", 0.8)]);
    }

    #[test]
    fn test_accepts_values_list_category_shape() {
        let post: Post = serde_json::from_value(json!({
            "id": 3,
            "content": "x",
            "primary_category": "Miedo",
            "primary_confidence": 0.7,
            "categories": [{"category__name": "Miedo", "confidence": 0.7}],
            "created_at": "2024-05-01T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(post.categories[0].name, "Miedo");
    }

    #[test]
    fn test_rejects_post_without_category() {
        let result: Result<Post, _> = serde_json::from_value(json!({
            "id": 4,
            "content": "x",
            "created_at": "2024-05-01T10:30:00Z"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_post_without_confidence() {
        let result: Result<Post, _> = serde_json::from_value(json!({
            "id": 6,
            "content": "x",
            "category": "Queja",
            "created_at": "2024-05-01T10:30:00Z"
        }));

        let error = result.unwrap_err().to_string();
        assert!(error.contains("no primary confidence"));
    }

    #[test]
    fn test_labels_fall_back_when_list_cleared() {
        let mut post = Post::new(
            5,
            "x",
            DetectedCategory::new("Queja", 0.6),
            vec![],
            OffsetDateTime::UNIX_EPOCH,
        );
        post.categories.clear();

        assert_eq!(post.labels().as_ref(), &[DetectedCategory::new("Queja", 0.6)]);
    }

    #[test]
    fn test_filter_from_blank_name_is_all() {
        assert_eq!(CategoryFilter::from_name(Some("  ")), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_name(None), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_name(Some("Terror")).as_name(),
            Some("Terror")
        );
    }
}
