//! In-memory post service for offline mode and testing
//!
//! Stands in for the classification backend: same validation, same label
//! selection rule, newest-first listing. Scores come from a keyword matcher,
//! not a model.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sentimind_domain::{Clock, DetectedCategory, FeedError, Post, PostService, SystemClock};
use time::Duration;

/// Labels the backend can assign
pub const TAXONOMY: [&str; 25] = [
    "Alegría",
    "Tristeza",
    "Enojo",
    "Miedo",
    "Sorpresa",
    "Asco",
    "Amor",
    "Odio",
    "Vergüenza",
    "Orgullo",
    "Envidia",
    "Celos",
    "Humor",
    "Inspiración",
    "Confesión",
    "Queja",
    "Consejo",
    "Pregunta",
    "Reflexión",
    "Nostalgia",
    "Ansiedad",
    "Frustración",
    "Sarcasmo",
    "Polémica",
    "Terror",
];

/// Secondary labels must reach this share of the top score
pub const RELATIVE_THRESHOLD: f64 = 0.90;
/// Maximum labels attached to one post
pub const MAX_LABELS: usize = 3;
/// Minimum trimmed length accepted by the service
pub const MIN_CONTENT_CHARS: usize = 3;

/// Label used when no keyword matches
const FALLBACK_LABEL: &str = "Reflexión";

const KEYWORDS: [(&str, &[&str]); 25] = [
    ("Alegría", &["feliz", "alegr", "genial", "sorpresa!", "gradu", "celebr"]),
    ("Tristeza", &["triste", "extraño", "llorar", "perdí", "murió", "😢"]),
    ("Enojo", &["enoj", "rabia", "furios", "harto"]),
    ("Miedo", &["miedo", "nervios", "asust", "sombra"]),
    ("Sorpresa", &["sorpresa", "no esperaba", "increíble"]),
    ("Asco", &["asco", "cucaracha", "podrid", "🤮"]),
    ("Amor", &["amo", "amor", "corazón", "❤"]),
    ("Odio", &["odio", "detesto"]),
    ("Vergüenza", &["vergüenza", "me vieron", "arrepiento"]),
    ("Orgullo", &["orgullo", "logré"]),
    ("Envidia", &["envidia", "no es justo"]),
    ("Celos", &["celos", "celoso", "celosa"]),
    ("Humor", &["jaja", "😂", "😅", "chiste"]),
    ("Inspiración", &["nunca te rindas", "oportunidad", "sueños", "esfuerzo"]),
    ("Confesión", &["confieso", "confesión", "nunca le dije"]),
    ("Queja", &["pésimo", "terrible", "nunca contestan", "servicio"]),
    ("Consejo", &["consejo", "te recomiendo", "ahorra"]),
    ("Pregunta", &["¿", "alguien sabe"]),
    ("Reflexión", &["sentido de la vida", "existimos", "pienso"]),
    ("Nostalgia", &["infancia", "recuerdo", "extraño tanto"]),
    ("Ansiedad", &["ansiedad", "nervioso", "no sé si podré"]),
    ("Frustración", &["frustra", "otra vez", "no puedo más"]),
    ("Sarcasmo", &["claro, seguro", "🙄"]),
    ("Polémica", &["debería ser legal", "cambien mi opinión", "reforma"]),
    ("Terror", &["terror", "fantasma", "pasos en el ático"]),
];

/// Keyword-based stand-in for the zero-shot classifier
///
/// Returns scores for every matching label, best first.
fn score_labels(content: &str) -> Vec<(&'static str, f64)> {
    let text = content.to_lowercase();
    let mut scores: Vec<(&'static str, f64)> = KEYWORDS
        .iter()
        .filter_map(|(label, words)| {
            let hits = words.iter().filter(|w| text.contains(*w)).count();
            if hits == 0 {
                None
            } else {
                Some((*label, (0.6 + 0.15 * hits as f64).min(0.97)))
            }
        })
        .collect();

    // Stable sort keeps taxonomy order between equal scores
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if scores.is_empty() {
        scores.push((FALLBACK_LABEL, 0.35));
    }
    scores
}

/// Pick the labels attached to a post from scores sorted best first
///
/// Keeps labels within [`RELATIVE_THRESHOLD`] of the top score, up to
/// [`MAX_LABELS`], always at least the top one. Confidences are rounded to
/// two decimals.
pub fn select_labels(scores: &[(&str, f64)]) -> Vec<DetectedCategory> {
    let Some(&(top_name, top_score)) = scores.first() else {
        return vec![];
    };
    let threshold = top_score * RELATIVE_THRESHOLD;

    let selected: Vec<DetectedCategory> = scores
        .iter()
        .filter(|(_, score)| *score >= threshold)
        .take(MAX_LABELS)
        .map(|(name, score)| DetectedCategory::new(*name, round2(*score)))
        .collect();

    if selected.is_empty() {
        vec![DetectedCategory::new(top_name, round2(top_score))]
    } else {
        selected
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// In-memory post service
pub struct InMemoryPostService {
    posts: RwLock<Vec<Post>>,
    clock: Arc<dyn Clock>,
    failing: bool,
}

impl InMemoryPostService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: RwLock::new(vec![]),
            clock,
            failing: false,
        }
    }

    /// Create a service preloaded with a sample feed
    pub fn seeded() -> Self {
        Self::seeded_with_clock(Arc::new(SystemClock))
    }

    pub fn seeded_with_clock(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let posts = SEED_POSTS
            .iter()
            .enumerate()
            .map(|(index, (content, category, confidence))| {
                Post::new(
                    index as u64 + 1,
                    *content,
                    DetectedCategory::new(*category, *confidence),
                    vec![],
                    now - Duration::minutes(37 * (SEED_POSTS.len() - index) as i64),
                )
            })
            .rev()
            .collect();

        Self {
            posts: RwLock::new(posts),
            clock,
            failing: false,
        }
    }

    /// Create a service whose every call fails with a network error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    fn check_available(&self) -> Result<(), FeedError> {
        if self.failing {
            return Err(FeedError::Network("service unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryPostService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostService for InMemoryPostService {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, FeedError> {
        self.check_available()?;
        let posts = self
            .posts
            .read()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(posts
            .iter()
            .filter(|post| category.is_none_or(|c| post.primary_category == c))
            .cloned()
            .collect())
    }

    async fn create(&self, content: &str) -> Result<Post, FeedError> {
        self.check_available()?;
        if content.trim().chars().count() < MIN_CONTENT_CHARS {
            return Err(FeedError::Rejected(format!(
                "content must have at least {} characters",
                MIN_CONTENT_CHARS
            )));
        }

        let scores = score_labels(content);
        let categories = select_labels(&scores);
        let (primary_name, primary_score) = scores[0];

        let mut posts = self
            .posts
            .write()
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let post = Post::new(
            id,
            content,
            DetectedCategory::new(primary_name, round2(primary_score)),
            categories,
            self.clock.now(),
        );
        posts.insert(0, post.clone());

        tracing::info!(
            post_id = id,
            category = %post.primary_category,
            labels = post.categories.len(),
            "Classified post in memory"
        );
        Ok(post)
    }

    async fn list_categories(&self) -> Result<Vec<String>, FeedError> {
        self.check_available()?;
        Ok(TAXONOMY.iter().map(|c| c.to_string()).collect())
    }
}

const SEED_POSTS: [(&str, &str, f64); 8] = [
    (
        "Mi perro intenta atrapar su cola desde hace 20 minutos, creo que es su cardio del día 😂",
        "Gracioso",
        0.92,
    ),
    (
        "Después de 5 años de esfuerzo, finalmente terminé mi carrera universitaria. ¡Nunca es tarde!",
        "Inspirador",
        0.94,
    ),
    (
        "Hoy hace un año que perdí a mi abuela. La extraño mucho.",
        "Triste",
        0.93,
    ),
    (
        "Llevo 10 años con mi esposa y cada día me enamoro más de ella.",
        "Romántico",
        0.91,
    ),
    (
        "¿Realmente tenemos libre albedrío o todo está predeterminado?",
        "Filosófico",
        0.89,
    ),
    (
        "Confesión: Nunca he leído Harry Potter y finjo que sí cuando todos hablan de ello.",
        "Confesión",
        0.90,
    ),
    (
        "¿Sabían que los pulpos tienen tres corazones y sangre azul?",
        "Curiosidad",
        0.91,
    ),
    (
        "Anoche escuché pasos en el ático pero vivo solo. No subí a revisar.",
        "Terror",
        0.92,
    ),
];
