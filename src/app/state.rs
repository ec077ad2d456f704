//! Central application state.
//!
//! All mutable state lives here so that rendering can be a pure function
//! over `&AppState` and event handling a function over `&mut AppState`.
//! The navigator is owned here: one instance per mounted page.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    catalog::Catalog,
    geometry::NodeRef,
    navigator::SectionNavigator,
    smooth_scroll::SmoothScroll,
};
use crate::error::NavError;
use crate::ui::{category_bar::pill_layout, layout::AppLayout, page::{PageGeometry, PageLayout}};

/// Top-level application state.
pub struct AppState {
    pub catalog: Catalog,
    pub config: AppConfig,
    pub navigator: SectionNavigator,
    /// Document layout for the current terminal width.
    pub page: PageLayout,
    /// Vertical page scroll (document rows).
    pub page_scroll: SmoothScroll,
    /// Full terminal area from the last resize.
    pub terminal_area: Rect,
    /// Scroll row the navigator last heard about.
    last_notified_y: f64,
    pub show_help: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, config: AppConfig, terminal_area: Rect) -> Result<Self, NavError> {
        let keys = catalog.keys().cloned().collect();
        let navigator = SectionNavigator::new(config.navigator.clone(), keys)?;
        let page_scroll = SmoothScroll::new(config.page.smooth_speed);
        let mut state = Self {
            catalog,
            config,
            navigator,
            page: PageLayout::default(),
            page_scroll,
            terminal_area,
            last_notified_y: 0.0,
            show_help: false,
            should_quit: false,
        };
        state.relayout(terminal_area);
        let y = state.scroll_y();
        let geometry = PageGeometry::new(&state.page, y, state.viewport_height());
        state.navigator.tick(&geometry, y);
        Ok(state)
    }

    // ── geometry ─────────────────────────────────────────────────

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area, self.header_rows(), self.bar_rows())
    }

    pub fn header_rows(&self) -> u16 {
        to_rows(self.config.navigator.header_height)
    }

    pub fn bar_rows(&self) -> u16 {
        to_rows(self.config.navigator.bar_height)
    }

    pub fn viewport_height(&self) -> f64 {
        f64::from(self.layout().page_area.height)
    }

    /// Rendered scroll row.  Geometry is measured at this row so the
    /// navigator sees exactly what is painted.
    pub fn scroll_y(&self) -> f64 {
        self.page_scroll.position().round()
    }

    fn max_scroll(&self) -> f64 {
        self.page.max_scroll(self.viewport_height() as usize) as f64
    }

    /// Narrow terminals get the compact per-section headers.
    pub fn is_narrow(&self) -> bool {
        self.terminal_area.width < self.config.page.mobile_breakpoint
    }

    /// Rebuild the document and bar for a new terminal size, keeping the
    /// active section anchored at the same relative position.
    pub fn relayout(&mut self, area: Rect) {
        let anchor = self.page.section(self.navigator.active_key()).map(|s| {
            let into = self.page_scroll.target() - s.top as f64;
            into.clamp(0.0, s.height as f64)
        });

        self.terminal_area = area;
        let padding = usize::from(self.header_rows() + self.bar_rows());
        self.page = PageLayout::build(&self.catalog, area.width, padding);
        self.page.register(self.navigator.registry_mut());

        let container = self.layout().bar_container;
        self.navigator
            .bar_mut()
            .set_layout(pill_layout(&self.catalog), f64::from(container.width));
        let active = self.navigator.active_key().clone();
        self.navigator.bar_mut().center_on(&active);

        let target = match (anchor, self.page.section(&active)) {
            (Some(into), Some(section)) => section.top as f64 + into.min(section.height as f64),
            _ => self.page_scroll.target(),
        };
        self.page_scroll.jump_to(target.clamp(0.0, self.max_scroll()));
    }

    // ── scrolling ────────────────────────────────────────────────

    pub fn scroll_page_to(&mut self, y: f64) {
        let y = y.clamp(0.0, self.max_scroll());
        self.page_scroll.scroll_to(y);
    }

    pub fn scroll_page_by(&mut self, delta: f64) {
        self.scroll_page_to(self.page_scroll.target() + delta);
    }

    /// Scroll so `node`'s top sits just under the primary header.
    pub fn jump_to_node(&mut self, node: NodeRef) {
        if let Some((top, _)) = self.page.node_span(node) {
            self.scroll_page_to(top as f64 - f64::from(self.header_rows()));
        }
    }

    /// Rows a page-up/page-down moves: the viewport below the chrome.
    pub fn page_step(&self) -> f64 {
        (self.viewport_height() - self.navigator.boundary()).max(1.0)
    }

    // ── frame pump ───────────────────────────────────────────────

    /// Advance animations and feed the navigator.  Returns `true` if
    /// anything visible changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut redraw = false;

        if self.page_scroll.is_animating() {
            self.page_scroll.tick();
            redraw = true;
        }

        let y = self.scroll_y();
        if y != self.last_notified_y {
            self.navigator.notify(now);
            self.last_notified_y = y;
        }

        let viewport_height = self.viewport_height();
        let geometry = PageGeometry::new(&self.page, y, viewport_height);
        if self.navigator.is_jumping() && !self.page_scroll.is_animating() {
            self.navigator.settle_jump(&geometry, y);
            redraw = true;
        } else if let Some(outcome) = self.navigator.poll(now, &geometry, y) {
            redraw |= outcome.needs_redraw();
        }

        redraw |= self.navigator.bar_mut().tick();
        redraw
    }

    /// Terminal resized: relayout and report it like a scroll.
    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        self.relayout(Rect::new(0, 0, width, height));
        self.navigator.notify(now);
    }
}

fn to_rows(units: f64) -> u16 {
    units.round().clamp(0.0, f64::from(u16::MAX)) as u16
}
