//! Horizontal category bar: pill geometry, auto-centering and the
//! left/right scroll affordances.
//!
//! The host lays the pills out (offsets relative to the start of the
//! scroll content) and reports the visible container width; the controller
//! owns the scroll offset.

use super::catalog::CategoryKey;
use super::smooth_scroll::SmoothScroll;

/// Position of one pill inside the scroll content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillGeometry {
    pub offset: f64,
    pub width: f64,
}

impl PillGeometry {
    pub fn center(&self) -> f64 {
        self.offset + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarDirection {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct CategoryBarController {
    pills: Vec<(CategoryKey, PillGeometry)>,
    client_width: f64,
    scroll_width: f64,
    scroll: SmoothScroll,
    step: f64,
    epsilon: f64,
    can_scroll_left: bool,
    can_scroll_right: bool,
}

impl CategoryBarController {
    pub fn new(step: f64, epsilon: f64, speed: f64) -> Self {
        Self {
            pills: Vec::new(),
            client_width: 0.0,
            scroll_width: 0.0,
            scroll: SmoothScroll::new(speed),
            step,
            epsilon,
            can_scroll_left: false,
            can_scroll_right: false,
        }
    }

    /// Replace the pill layout (after a resize or first mount).
    pub fn set_layout(&mut self, pills: Vec<(CategoryKey, PillGeometry)>, client_width: f64) {
        self.scroll_width = pills
            .iter()
            .map(|(_, p)| p.offset + p.width)
            .fold(0.0, f64::max);
        self.pills = pills;
        self.client_width = client_width.max(0.0);
        let clamped = self.clamp(self.scroll.target());
        self.scroll.jump_to(clamped);
        self.refresh_affordances();
    }

    fn max_scroll(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    fn clamp(&self, left: f64) -> f64 {
        left.clamp(0.0, self.max_scroll())
    }

    pub fn pill(&self, key: &CategoryKey) -> Option<PillGeometry> {
        self.pills
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, geometry)| *geometry)
    }

    /// Smooth-scroll so the pill's center lines up with the container's
    /// center (as far as the content edges allow).
    pub fn center_on(&mut self, key: &CategoryKey) {
        let Some(pill) = self.pill(key) else {
            return;
        };
        let target = self.clamp(pill.center() - self.client_width / 2.0);
        tracing::debug!("bar: centering `{key}` at {target:.1}");
        self.scroll.scroll_to(target);
    }

    /// Nudge the bar by one step.
    pub fn scroll_by(&mut self, direction: BarDirection) {
        let delta = match direction {
            BarDirection::Left => -self.step,
            BarDirection::Right => self.step,
        };
        let target = self.clamp(self.scroll.target() + delta);
        self.scroll.scroll_to(target);
    }

    /// Advance the scroll animation.  Returns `true` if the offset moved.
    pub fn tick(&mut self) -> bool {
        if !self.scroll.is_animating() {
            return false;
        }
        self.scroll.tick();
        self.refresh_affordances();
        true
    }

    fn refresh_affordances(&mut self) {
        let left = self.scroll_left();
        self.can_scroll_left = left > 0.0;
        self.can_scroll_right = left < self.scroll_width - self.client_width - self.epsilon;
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll.position()
    }

    pub fn can_scroll_left(&self) -> bool {
        self.can_scroll_left
    }

    pub fn can_scroll_right(&self) -> bool {
        self.can_scroll_right
    }

    /// Pill under a container-relative x coordinate.
    pub fn pill_at(&self, x: f64) -> Option<&CategoryKey> {
        let content_x = x + self.scroll_left();
        self.pills
            .iter()
            .find(|(_, p)| content_x >= p.offset && content_x < p.offset + p.width)
            .map(|(key, _)| key)
    }
}
