//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn active_title_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hero_text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn card_title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── sticky chrome ──────────────────────────────────────────
    pub fn header_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    pub fn brand_style() -> Style {
        Style::default()
            .bg(Color::Black)
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn bar_style() -> Style {
        Style::default().bg(Color::Rgb(24, 24, 32))
    }

    pub fn pill_style() -> Style {
        Style::default().bg(Color::Rgb(24, 24, 32)).fg(Color::Gray)
    }

    pub fn active_pill_style() -> Style {
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn arrow_style() -> Style {
        Style::default()
            .bg(Color::Rgb(24, 24, 32))
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn compact_header_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
