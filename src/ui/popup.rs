//! Help overlay listing every action and its key bindings.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};

pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = Action::ALL.len() as u16 + 4;
        let popup = centered_fixed(48, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Controls ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<20}", action.label()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    self.config.display_bindings(action),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        Paragraph::new(lines).block(block).render(popup, buf);
    }
}

/// Centre a fixed-size box inside `area`, shrinking it if `area` is smaller.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
