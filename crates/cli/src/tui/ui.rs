//! Layout and widgets for the terminal feed

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Wrap},
};
use sentimind_domain::{
    CategoryStyle, Clock, Post,
    palette::parse_hex_color,
    usecases::render::{confidence_bar, feed_placeholder, feed_summary, percent},
};

use super::app::{App, Focus};

const TITLE: &str = "🧠 Sentimind Network";
const SUBTITLE: &str = "Red social con clasificación automática por Inteligencia Artificial";
const COMPOSER_TITLE: &str = "¿Qué estás pensando?";
const COMPOSER_PLACEHOLDER: &str =
    "Comparte algo gracioso, triste, filosófico, o lo que se te ocurra...";
const ANALYZING: &str = "Analizando con IA...";
const SUBMIT_HINT: &str = "Ctrl+Enter/Ctrl+S publicar";
const HELP: &str = " · Tab cambiar panel · ←/→ filtrar · ↑/↓ desplazar · F5 recargar · Esc salir";

/// Filter entries shown before the selected one
const FILTER_LOOKBEHIND: usize = 3;

pub fn draw(frame: &mut Frame, app: &App) {
    let banner_height = if app.feed.error().is_some() { 1 } else { 0 };
    let [header, composer, banner, filters, summary, posts, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(6),
        Constraint::Length(banner_height),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_composer(frame, composer, app);
    if let Some(error) = app.feed.error() {
        let line = Line::from(format!("⚠️ {}", error))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        frame.render_widget(Paragraph::new(line), banner);
    }
    draw_filters(frame, filters, app);
    frame.render_widget(
        Paragraph::new(format!(
            "📊 {}",
            feed_summary(app.feed.posts().len(), app.feed.filter())
        ))
        .style(Style::default().fg(Color::Gray)),
        summary,
    );
    draw_posts(frame, posts, app);
    draw_footer(frame, footer, app);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let submit_style = if app.can_submit() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled(SUBMIT_HINT, submit_style),
        Span::styled(HELP, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_composer(frame: &mut Frame, area: Rect, app: &App) {
    let composer = &app.composer;
    let counter_style = if composer.is_near_limit() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::bordered()
        .title(COMPOSER_TITLE)
        .title_bottom(
            Line::from(Span::styled(composer.counter(), counter_style)).alignment(Alignment::Right),
        )
        .border_style(focus_style(app.focus == Focus::Composer));
    if app.feed.loading() {
        block = block.title(
            Line::from(Span::styled(ANALYZING, Style::default().fg(Color::Magenta)))
                .alignment(Alignment::Right),
        );
    }

    let body = if composer.text().is_empty() {
        Text::from(Span::styled(
            COMPOSER_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(composer.text())
    };

    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_filters(frame: &mut Frame, area: Rect, app: &App) {
    let entries = app
        .renderer
        .filter_entries(&app.categories, app.feed.filter());
    let start = app.selected_filter.saturating_sub(FILTER_LOOKBEHIND);

    let mut spans = Vec::new();
    if start > 0 {
        spans.push(Span::styled("… ", Style::default().fg(Color::DarkGray)));
    }
    for entry in entries.iter().skip(start) {
        let text = format!(" {} {} ", entry.emoji, entry.label);
        let style = match (entry.active, entry.style) {
            (true, Some(style)) => badge_style(style).add_modifier(Modifier::BOLD),
            (true, None) => Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            (false, _) => Style::default().fg(Color::Gray),
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    let block = Block::bordered()
        .title("Filtrar por categoría")
        .border_style(focus_style(app.focus == Focus::Filters));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_posts(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered().border_style(focus_style(app.focus == Focus::Posts));

    let text = match feed_placeholder(&app.feed) {
        Some(placeholder) => Text::from(Line::from(placeholder).alignment(Alignment::Center)),
        None => {
            let now = app.clock().now();
            let mut lines = Vec::new();
            for post in app.feed.posts() {
                lines.extend(card_lines(app, post, now));
                lines.push(Line::default());
            }
            Text::from(lines)
        }
    };

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.scroll, 0)),
        area,
    );
}

fn card_lines<'a>(app: &'a App, post: &'a Post, now: time::OffsetDateTime) -> Vec<Line<'a>> {
    let renderer = &app.renderer;
    let accent = rgb(renderer.primary_style(post).border_color);

    let mut badges = Vec::new();
    for badge in renderer.badges(post) {
        let mut style = badge_style(badge.style);
        if badge.primary {
            style = style.add_modifier(Modifier::BOLD);
        }
        badges.push(Span::styled(format!(" {} ", badge.label()), style));
        badges.push(Span::raw(" "));
    }
    badges.push(Span::styled(
        format!("  {}% Certeza IA", percent(post.primary_confidence)),
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = vec![Line::from(badges)];
    for text in post.content.lines() {
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(accent)),
            Span::raw(text),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!("🕐 {}  ", renderer.timestamp(post.created_at, now)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            confidence_bar(post.primary_confidence, renderer.config().bar_width),
            Style::default().fg(accent),
        ),
    ]));
    lines
}

fn badge_style(style: &CategoryStyle) -> Style {
    Style::default()
        .fg(rgb(style.text_color))
        .bg(rgb(style.bg_color))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn rgb(hex: &str) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Reset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use sentimind_domain::{
        CategoryPalette, DetectedCategory, FeedError, FixedClock,
        usecases::{Composer, RenderConfig, Renderer},
    };
    use std::sync::Arc;
    use time::{Duration, macros::datetime};
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(
            Arc::new(sentimind_adapters::InMemoryPostService::default()),
            Arc::new(FixedClock(datetime!(2025-03-10 12:00 UTC))),
            Renderer::new(RenderConfig::default(), CategoryPalette::standard()),
            Composer::default(),
            tx,
        )
    }

    fn draw_buffer(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn render(app: &App) -> String {
        draw_buffer(app)
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    /// Foreground color of the first cell of `needle` on screen
    fn fg_of(app: &App, needle: &str) -> Color {
        let buffer = draw_buffer(app);
        let cells = &buffer.content;
        let chars: Vec<String> = needle.chars().map(String::from).collect();
        let start = (0..cells.len())
            .find(|&i| {
                chars
                    .iter()
                    .enumerate()
                    .all(|(j, c)| cells.get(i + j).is_some_and(|cell| cell.symbol() == c))
            })
            .expect("text on screen");
        cells[start].fg
    }

    #[test]
    fn test_draws_summary_and_cards() {
        let mut app = app();
        app.feed.begin_load();
        app.feed.finish_load(Ok(vec![
            Post::new(
                2,
                "Hoy me gradué",
                DetectedCategory::new("Alegría", 0.92),
                vec![],
                datetime!(2025-03-10 11:55 UTC),
            ),
            Post::new(
                1,
                "Extraño a mi perro",
                DetectedCategory::new("Tristeza", 0.81),
                vec![],
                datetime!(2025-03-10 12:00 UTC) - Duration::hours(3),
            ),
        ]));

        let screen = render(&app);

        assert!(screen.contains("Mostrando 2 posts totales"));
        assert!(screen.contains("Hoy me gradué"));
        assert!(screen.contains("92% Certeza IA"));
        assert!(screen.contains("hace 5 min"));
        assert!(!screen.contains("Analizando con IA"));
    }

    #[test]
    fn test_draws_error_banner_and_placeholder() {
        let mut app = app();
        app.feed.begin_load();
        app.feed
            .finish_load(Err(FeedError::Network("connection refused".to_string())));

        let screen = render(&app);

        assert!(screen.contains("Error al cargar los posts"));
        assert!(screen.contains("No hay posts aún"));
    }

    #[test]
    fn test_loading_shows_progress() {
        let mut app = app();
        app.feed.begin_load();

        let screen = render(&app);

        assert!(screen.contains("Analizando con IA..."));
        assert!(screen.contains("Cargando posts..."));
    }

    #[test]
    fn test_counter_reflects_composer() {
        let mut app = app();
        app.composer.set_text("hola");

        let screen = render(&app);

        assert!(screen.contains("4 / 1000"));
        assert!(!screen.contains("Comparte algo gracioso"));
    }

    #[test]
    fn test_counter_turns_red_past_nine_hundred() {
        let mut app = app();
        app.composer.set_text("a".repeat(900));
        assert_eq!(fg_of(&app, "900 / 1000"), Color::DarkGray);

        app.composer.push('a');
        assert_eq!(fg_of(&app, "901 / 1000"), Color::Red);
    }

    #[test]
    fn test_submit_hint_follows_composer() {
        let mut app = app();
        assert_eq!(fg_of(&app, SUBMIT_HINT), Color::DarkGray);

        app.composer.set_text("hola");
        assert_eq!(fg_of(&app, SUBMIT_HINT), Color::Green);

        app.feed.begin_create();
        assert_eq!(fg_of(&app, SUBMIT_HINT), Color::DarkGray);
    }
}
