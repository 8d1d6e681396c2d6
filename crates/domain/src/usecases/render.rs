//! Rendering use case - turns feed state into displayable text

use time::OffsetDateTime;

use crate::{
    model::{ALL_CATEGORIES_LABEL, CategoryFilter, Post},
    palette::{CategoryPalette, CategoryStyle},
    usecases::feed::FeedState,
};

/// Glyph of the "all categories" filter entry
pub const ALL_CATEGORIES_EMOJI: &str = "🌐";

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Configuration for the renderer
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Show "hace 5 min" instead of an absolute date
    pub relative_time: bool,
    /// Width of the confidence bar in cells
    pub bar_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            relative_time: true,
            bar_width: 10,
        }
    }
}

/// A category badge ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct Badge<'a> {
    pub name: String,
    pub percent: u32,
    /// First badge of a card; shown larger
    pub primary: bool,
    pub style: &'a CategoryStyle,
}

impl Badge<'_> {
    /// Badge text, e.g. "😂 GRACIOSO 92%"
    pub fn label(&self) -> String {
        format!(
            "{} {} {}%",
            self.style.emoji,
            self.name.to_uppercase(),
            self.percent
        )
    }
}

/// One entry of the filter bar
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry<'a> {
    pub label: String,
    pub emoji: &'a str,
    pub filter: CategoryFilter,
    pub active: bool,
    /// Accent used when the entry is active; `None` for the "all" entry
    pub style: Option<&'a CategoryStyle>,
}

/// Renderer for posts, the filter bar and the feed summary
pub struct Renderer {
    config: RenderConfig,
    palette: CategoryPalette,
}

impl Renderer {
    pub fn new(config: RenderConfig, palette: CategoryPalette) -> Self {
        Self { config, palette }
    }

    pub fn palette(&self) -> &CategoryPalette {
        &self.palette
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Style of a post's primary category
    pub fn primary_style(&self, post: &Post) -> &CategoryStyle {
        self.palette.lookup(&post.primary_category)
    }

    /// Badges for every detected label, primary first
    pub fn badges(&self, post: &Post) -> Vec<Badge<'_>> {
        post.labels()
            .iter()
            .enumerate()
            .map(|(index, category)| Badge {
                name: category.name.clone(),
                percent: percent(category.confidence),
                primary: index == 0,
                style: self.palette.lookup(&category.name),
            })
            .collect()
    }

    /// Filter bar entries: "all" first, then one per category
    pub fn filter_entries<'a>(
        &'a self,
        categories: &[String],
        current: &CategoryFilter,
    ) -> Vec<FilterEntry<'a>> {
        let mut entries = Vec::with_capacity(categories.len() + 1);
        entries.push(FilterEntry {
            label: ALL_CATEGORIES_LABEL.to_string(),
            emoji: ALL_CATEGORIES_EMOJI,
            filter: CategoryFilter::All,
            active: current.is_all(),
            style: None,
        });

        for name in categories {
            let style = self.palette.lookup(name);
            entries.push(FilterEntry {
                label: name.clone(),
                emoji: style.emoji,
                filter: CategoryFilter::Category(name.clone()),
                active: current.as_name() == Some(name.as_str()),
                style: Some(style),
            });
        }

        entries
    }

    /// Timestamp as shown on a card
    pub fn timestamp(&self, created_at: OffsetDateTime, now: OffsetDateTime) -> String {
        if self.config.relative_time {
            relative_time(created_at, now)
        } else {
            absolute_time(created_at)
        }
    }

    /// Render a post card as plain text
    pub fn render_card(&self, post: &Post, now: OffsetDateTime) -> String {
        let badges = self
            .badges(post)
            .iter()
            .map(Badge::label)
            .collect::<Vec<_>>()
            .join("  ");

        format!(
            "{}    {}% Certeza IA\n\"{}\"\n🕐 {}  {}",
            badges,
            percent(post.primary_confidence),
            post.content,
            self.timestamp(post.created_at, now),
            confidence_bar(post.primary_confidence, self.config.bar_width),
        )
    }

    /// Render the filter bar on one line; the active entry is bracketed
    pub fn render_filter_bar(&self, categories: &[String], current: &CategoryFilter) -> String {
        self.filter_entries(categories, current)
            .iter()
            .map(|entry| {
                let text = format!("{} {}", entry.emoji, entry.label);
                if entry.active {
                    format!("[{}]", text)
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the whole feed: banner, summary, then cards or a placeholder
    pub fn render_feed(&self, state: &FeedState, now: OffsetDateTime) -> String {
        let mut sections = Vec::new();

        if let Some(error) = state.error() {
            sections.push(format!("⚠️ {}", error));
        }

        sections.push(format!(
            "📊 {}",
            feed_summary(state.posts().len(), state.filter())
        ));

        match feed_placeholder(state) {
            Some(placeholder) => sections.push(placeholder.to_string()),
            None => {
                for post in state.posts() {
                    sections.push(self.render_card(post, now));
                }
            }
        }

        sections.join("\n\n")
    }
}

/// Confidence as a rounded integer percentage in 0..=100
pub fn percent(confidence: f64) -> u32 {
    if !confidence.is_finite() {
        return 0;
    }
    (confidence * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Summary line for the current list, e.g. "Mostrando 3 posts de Alegría"
pub fn feed_summary(count: usize, filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::Category(name) => format!("Mostrando {} posts de {}", count, name),
        CategoryFilter::All => format!("Mostrando {} posts totales", count),
    }
}

/// Text shown instead of cards when there is nothing to list
pub fn feed_placeholder(state: &FeedState) -> Option<&'static str> {
    if !state.posts().is_empty() {
        None
    } else if state.loading() {
        Some("Cargando posts...")
    } else {
        Some("No hay posts aún")
    }
}

/// Horizontal bar filled in proportion to the confidence
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let filled = (percent(confidence) as usize * width + 50) / 100;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// "hace 5 min" style age, falling back to an absolute date after a week
pub fn relative_time(created_at: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - created_at;
    let minutes = elapsed.whole_minutes();

    if minutes < 1 {
        "hace un momento".to_string()
    } else if minutes < 60 {
        format!("hace {} min", minutes)
    } else if elapsed.whole_hours() < 24 {
        format!("hace {} h", elapsed.whole_hours())
    } else if elapsed.whole_days() < 7 {
        format!("hace {} d", elapsed.whole_days())
    } else {
        absolute_time(created_at)
    }
}

/// Absolute date as "05 may 14:03"
pub fn absolute_time(created_at: OffsetDateTime) -> String {
    let month = MONTHS_ES[usize::from(u8::from(created_at.month())) - 1];
    format!(
        "{:02} {} {:02}:{:02}",
        created_at.day(),
        month,
        created_at.hour(),
        created_at.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetectedCategory;
    use crate::ports::FeedError;
    use time::{Duration, macros::datetime};

    fn sample_post() -> Post {
        Post::new(
            42,
            "Mi perro intenta atrapar su cola",
            DetectedCategory::new("Gracioso", 0.873),
            vec![
                DetectedCategory::new("Gracioso", 0.873),
                DetectedCategory::new("Alegría", 0.81),
            ],
            datetime!(2024-05-01 10:30 UTC),
        )
    }

    fn renderer() -> Renderer {
        Renderer::new(RenderConfig::default(), CategoryPalette::standard())
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.873), 87);
        assert_eq!(percent(0.875), 88);
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(1.2), 100);
        assert_eq!(percent(f64::NAN), 0);
    }

    #[test]
    fn test_single_badge_for_empty_label_list() {
        let mut post = sample_post();
        post.categories.clear();

        let renderer = renderer();
        let badges = renderer.badges(&post);

        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].name, "Gracioso");
        assert_eq!(badges[0].percent, 87);
        assert!(badges[0].primary);
    }

    #[test]
    fn test_badges_use_fallback_style_for_unknown_label() {
        let renderer = renderer();
        let badges = renderer.badges(&sample_post());

        assert_eq!(badges.len(), 2);
        assert_eq!(badges[0].label(), "😂 GRACIOSO 87%");
        assert_eq!(badges[1].label(), "📝 ALEGRÍA 81%");
        assert!(!badges[1].primary);
    }

    #[test]
    fn test_render_card() {
        let now = datetime!(2024-05-01 10:35 UTC);
        let card = renderer().render_card(&sample_post(), now);

        assert!(card.contains("87% Certeza IA"));
        assert!(card.contains("\"Mi perro intenta atrapar su cola\""));
        assert!(card.contains("hace 5 min"));
        assert!(card.contains("█████████░"));
    }

    #[test]
    fn test_render_card_with_absolute_time() {
        let renderer = Renderer::new(
            RenderConfig {
                relative_time: false,
                ..Default::default()
            },
            CategoryPalette::standard(),
        );
        let now = datetime!(2024-05-01 10:35 UTC);
        let card = renderer.render_card(&sample_post(), now);

        assert!(card.contains("🕐 01 may 10:30"));
        assert!(!card.contains("hace"));
    }

    #[test]
    fn test_feed_summary() {
        assert_eq!(
            feed_summary(3, &CategoryFilter::Category("Alegría".to_string())),
            "Mostrando 3 posts de Alegría"
        );
        assert_eq!(
            feed_summary(12, &CategoryFilter::All),
            "Mostrando 12 posts totales"
        );
    }

    #[test]
    fn test_filter_bar_highlights_active_entry() {
        let categories = vec!["Tóxico".to_string(), "Terror".to_string()];
        let renderer = renderer();

        assert_eq!(
            renderer.render_filter_bar(&categories, &CategoryFilter::All),
            "[🌐 Todas] 🔴 Tóxico 👻 Terror"
        );
        assert_eq!(
            renderer.render_filter_bar(
                &categories,
                &CategoryFilter::Category("Terror".to_string())
            ),
            "🌐 Todas 🔴 Tóxico [👻 Terror]"
        );
    }

    #[test]
    fn test_relative_time_buckets() {
        let created = datetime!(2024-05-01 10:30 UTC);

        assert_eq!(relative_time(created, created), "hace un momento");
        assert_eq!(
            relative_time(created, created - Duration::minutes(3)),
            "hace un momento"
        );
        assert_eq!(
            relative_time(created, created + Duration::minutes(59)),
            "hace 59 min"
        );
        assert_eq!(
            relative_time(created, created + Duration::hours(5)),
            "hace 5 h"
        );
        assert_eq!(
            relative_time(created, created + Duration::days(2)),
            "hace 2 d"
        );
        assert_eq!(
            relative_time(created, created + Duration::days(30)),
            "01 may 10:30"
        );
    }

    #[test]
    fn test_render_feed_states() {
        let renderer = renderer();
        let now = datetime!(2024-05-01 11:00 UTC);

        let mut state = FeedState::new();
        state.begin_load();
        assert!(renderer.render_feed(&state, now).contains("Cargando posts..."));

        state.finish_load(Err(FeedError::Network("down".to_string())));
        let text = renderer.render_feed(&state, now);
        assert!(text.contains("⚠️ Error al cargar los posts"));
        assert!(text.contains("No hay posts aún"));

        state.begin_load();
        state.finish_load(Ok(vec![sample_post()]));
        let text = renderer.render_feed(&state, now);
        assert!(text.starts_with("📊 Mostrando 1 posts totales"));
        assert!(text.contains("GRACIOSO"));
    }
}
