//! The sticky category bar: pill layout and the widget that paints the
//! pills scrolled by the controller's offset, with arrow affordances.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::{
    catalog::{Catalog, CategoryKey},
    category_bar::{CategoryBarController, PillGeometry},
};

use super::layout::ARROW_WIDTH;
use super::theme::Theme;

/// Blank columns between neighbouring pills.
const PILL_GAP: f64 = 1.0;

/// Pill text: the title padded by one space on each side.
fn pill_label(title: &str) -> String {
    format!(" {title} ")
}

/// Lay the pills out left to right in catalog order.
pub fn pill_layout(catalog: &Catalog) -> Vec<(CategoryKey, PillGeometry)> {
    let mut offset = 0.0;
    catalog
        .categories
        .iter()
        .map(|category| {
            let width = pill_label(&category.title).chars().count() as f64;
            let geometry = PillGeometry { offset, width };
            offset += width + PILL_GAP;
            (category.key.clone(), geometry)
        })
        .collect()
}

pub struct CategoryBar<'a> {
    catalog: &'a Catalog,
    controller: &'a CategoryBarController,
    active: &'a CategoryKey,
}

impl<'a> CategoryBar<'a> {
    pub fn new(
        catalog: &'a Catalog,
        controller: &'a CategoryBarController,
        active: &'a CategoryKey,
    ) -> Self {
        Self {
            catalog,
            controller,
            active,
        }
    }
}

impl Widget for CategoryBar<'_> {
    /// `area` is the whole bar; pills scroll inside it between the arrow
    /// columns.
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width <= 2 * ARROW_WIDTH {
            return;
        }
        buf.set_style(area, Theme::bar_style());

        let row = area.y + area.height / 2;
        let container_x = area.x + ARROW_WIDTH;
        let container_w = area.width - 2 * ARROW_WIDTH;
        let scroll_left = self.controller.scroll_left().round() as i64;

        for category in &self.catalog.categories {
            let Some(pill) = self.controller.pill(&category.key) else {
                continue;
            };
            let style = if &category.key == self.active {
                Theme::active_pill_style()
            } else {
                Theme::pill_style()
            };
            let start = pill.offset.round() as i64 - scroll_left;
            for (i, ch) in pill_label(&category.title).chars().enumerate() {
                let col = start + i as i64;
                if col < 0 || col >= i64::from(container_w) {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((container_x + col as u16, row)) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }

        if self.controller.can_scroll_left() {
            buf.set_string(area.x, row, "‹", Theme::arrow_style());
        }
        if self.controller.can_scroll_right() {
            buf.set_string(area.x + area.width - 1, row, "›", Theme::arrow_style());
        }
    }
}
