//! Sticky chrome painted over the page: the primary header and the compact
//! per-section header shown on narrow terminals.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Primary page header: brand on the left, active market on the right.
pub struct PageHeader<'a> {
    pub brand: &'a str,
    pub active_title: &'a str,
}

impl Widget for PageHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Theme::header_style());
        let row = area.y + area.height / 2;

        let brand = Line::from(Span::styled(format!("  {}", self.brand), Theme::brand_style()));
        buf.set_line(area.x, row, &brand, area.width);

        let label = format!("Markets › {}  ", self.active_title);
        let width = columns(&label);
        let needed = width
            .saturating_add(2)
            .saturating_add(columns(self.brand));
        if needed <= area.width {
            buf.set_string(area.x + area.width - width, row, label, Theme::header_style());
        }
    }
}

fn columns(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// One-row label naming the section currently scrolling under the chrome.
pub struct CompactHeader<'a> {
    pub title: &'a str,
}

impl Widget for CompactHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Theme::compact_header_style());
        buf.set_stringn(
            area.x,
            area.y,
            format!(" ▌ {}", self.title),
            usize::from(area.width),
            Theme::compact_header_style(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn header_shows_brand_and_active_market() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        PageHeader {
            brand: "ACME",
            active_title: "Civic",
        }
        .render(area, &mut buf);
        let text = row_text(&buf, 1, 40);
        assert!(text.starts_with("  ACME"));
        assert!(text.trim_end().ends_with("Markets › Civic"));
    }

    #[test]
    fn oversized_title_is_dropped_instead_of_overflowing() {
        let title = "x".repeat(usize::from(u16::MAX) + 10);
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        PageHeader {
            brand: "ACME",
            active_title: &title,
        }
        .render(area, &mut buf);
        let text = row_text(&buf, 1, 40);
        assert_eq!(text.trim_end(), "  ACME");
    }

    #[test]
    fn compact_header_is_truncated_to_width() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        CompactHeader {
            title: "Hospitality",
        }
        .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0, 8), " ▌ Hospi");
    }
}
