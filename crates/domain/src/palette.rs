//! Category display table (emoji and colors per category)

use std::collections::BTreeMap;

use serde::Serialize;

/// Display attributes for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    /// Glyph shown next to the category name
    pub emoji: &'static str,
    /// Badge background color (`#rrggbb`)
    pub bg_color: &'static str,
    /// Badge text color (`#rrggbb`)
    pub text_color: &'static str,
    /// Accent/border color (`#rrggbb`)
    pub border_color: &'static str,
    /// Light background color (`#rrggbb`)
    pub light_bg: &'static str,
}

impl CategoryStyle {
    const fn new(
        emoji: &'static str,
        bg_color: &'static str,
        text_color: &'static str,
        border_color: &'static str,
        light_bg: &'static str,
    ) -> Self {
        Self {
            emoji,
            bg_color,
            text_color,
            border_color,
            light_bg,
        }
    }
}

/// Style used for any category not present in the table
pub const DEFAULT_STYLE: CategoryStyle =
    CategoryStyle::new("📝", "#e0e7ff", "#3730a3", "#818cf8", "#eef2ff");

const STANDARD_STYLES: [(&str, CategoryStyle); 12] = [
    (
        "Tóxico",
        CategoryStyle::new("🔴", "#fee2e2", "#991b1b", "#f87171", "#fef2f2"),
    ),
    (
        "Gracioso",
        CategoryStyle::new("😂", "#fef3c7", "#92400e", "#fbbf24", "#fffbeb"),
    ),
    (
        "Inspirador",
        CategoryStyle::new("✨", "#d1fae5", "#065f46", "#34d399", "#ecfdf5"),
    ),
    (
        "Triste",
        CategoryStyle::new("💔", "#dbeafe", "#1e40af", "#60a5fa", "#eff6ff"),
    ),
    (
        "Romántico",
        CategoryStyle::new("💕", "#fce7f3", "#9d174d", "#f472b6", "#fdf2f8"),
    ),
    (
        "Polémico",
        CategoryStyle::new("🔥", "#ffedd5", "#9a3412", "#fb923c", "#fff7ed"),
    ),
    (
        "Asqueroso",
        CategoryStyle::new("🤢", "#ecfccb", "#3f6212", "#a3e635", "#f7fee7"),
    ),
    (
        "Filosófico",
        CategoryStyle::new("🤔", "#ede9fe", "#5b21b6", "#a78bfa", "#f5f3ff"),
    ),
    (
        "Confesión",
        CategoryStyle::new("🤫", "#e0e7ff", "#3730a3", "#818cf8", "#eef2ff"),
    ),
    (
        "Queja",
        CategoryStyle::new("😤", "#f1f5f9", "#334155", "#94a3b8", "#f8fafc"),
    ),
    (
        "Curiosidad",
        CategoryStyle::new("🧐", "#cffafe", "#0e7490", "#22d3ee", "#ecfeff"),
    ),
    (
        "Terror",
        CategoryStyle::new("👻", "#e2e8f0", "#1e293b", "#64748b", "#f1f5f9"),
    ),
];

/// Immutable mapping from category name to display style
///
/// Passed by reference to whatever renders posts; lookups never fail.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    styles: BTreeMap<String, CategoryStyle>,
    order: Vec<String>,
    fallback: CategoryStyle,
}

impl CategoryPalette {
    /// Build a palette from ordered (name, style) entries and a fallback
    pub fn new<I, S>(entries: I, fallback: CategoryStyle) -> Self
    where
        I: IntoIterator<Item = (S, CategoryStyle)>,
        S: Into<String>,
    {
        let mut styles = BTreeMap::new();
        let mut order = Vec::new();
        for (name, style) in entries {
            let name = name.into();
            if styles.insert(name.clone(), style).is_none() {
                order.push(name);
            }
        }

        Self {
            styles,
            order,
            fallback,
        }
    }

    /// The built-in twelve-category table
    pub fn standard() -> Self {
        Self::new(STANDARD_STYLES, DEFAULT_STYLE)
    }

    /// Style for a category, or the fallback for unknown names
    pub fn lookup(&self, category: &str) -> &CategoryStyle {
        self.styles.get(category).unwrap_or(&self.fallback)
    }

    /// Whether the table has a dedicated entry for this category
    pub fn contains(&self, category: &str) -> bool {
        self.styles.contains_key(category)
    }

    /// Category names in table order
    pub fn names(&self) -> &[String] {
        &self.order
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parse a `#rrggbb` color into its components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_lookup() {
        let palette = CategoryPalette::standard();
        let style = palette.lookup("Gracioso");

        assert_eq!(style.emoji, "😂");
        assert_eq!(style.border_color, "#fbbf24");
    }

    #[test]
    fn test_unknown_categories_fall_back_to_default() {
        let palette = CategoryPalette::standard();

        for name in ["Alegría", "", "gracioso", "Sarcasmo"] {
            assert_eq!(palette.lookup(name), &DEFAULT_STYLE, "category {name:?}");
        }
        assert_eq!(palette.lookup("Alegría").emoji, "📝");
    }

    #[test]
    fn test_standard_table_order() {
        let palette = CategoryPalette::standard();

        assert_eq!(palette.names().len(), 12);
        assert_eq!(palette.names()[0], "Tóxico");
        assert_eq!(palette.names()[11], "Terror");
    }

    #[test]
    fn test_injected_palette() {
        let palette = CategoryPalette::new(
            [(
                "Alegría",
                CategoryStyle::new("😊", "#000000", "#111111", "#222222", "#333333"),
            )],
            DEFAULT_STYLE,
        );

        assert_eq!(palette.lookup("Alegría").emoji, "😊");
        assert_eq!(palette.lookup("Tóxico"), &DEFAULT_STYLE);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fbbf24"), Some((0xfb, 0xbf, 0x24)));
        assert_eq!(parse_hex_color("fbbf24"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
