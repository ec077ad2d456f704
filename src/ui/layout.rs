//! Layout helpers: split the terminal area into regions.
//!
//! The header, category bar and compact section header are drawn *over*
//! the top of the page area; the page scrolls underneath them.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Columns reserved on each side of the bar for the scroll arrows.
pub const ARROW_WIDTH: u16 = 2;

/// Primary screen layout: scrolling page plus a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub header_area: Rect,
    /// Where the category bar sits while it is shown.
    pub bar_area: Rect,
    /// Part of the bar the pills scroll inside (between the arrows).
    pub bar_container: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, header_height: u16, bar_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let page_area = chunks[0];

        let header_height = header_height.min(page_area.height);
        let header_area = Rect {
            height: header_height,
            ..page_area
        };
        let bar_area = Rect {
            y: page_area.y + header_height,
            height: bar_height.min(page_area.height - header_height),
            ..page_area
        };
        let bar_container = Rect {
            x: bar_area.x + ARROW_WIDTH.min(bar_area.width),
            width: bar_area.width.saturating_sub(2 * ARROW_WIDTH),
            ..bar_area
        };

        Self {
            page_area,
            header_area,
            bar_area,
            bar_container,
            status_area: chunks[1],
        }
    }

    /// Row directly below the sticky chrome, given the current boundary.
    pub fn compact_header_row(&self, boundary: u16) -> Option<Rect> {
        if boundary >= self.page_area.height {
            return None;
        }
        Some(Rect {
            y: self.page_area.y + boundary,
            height: 1,
            ..self.page_area
        })
    }
}

/// Is `(col, row)` inside `area`?
pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
