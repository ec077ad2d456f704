//! Section navigator: one owned instance per mounted page.
//!
//! Ties the pieces together and fixes their order within a tick:
//!
//! 1. the viewport signal samples the scroll position (direction and the
//!    sticky offset),
//! 2. the resolver reads the resulting boundary and updates the active key,
//! 3. the sticky coordinator recomputes the compact headers,
//! 4. the category bar re-centers if the active key changed.
//!
//! The host calls `notify` for every raw scroll/resize, and `poll` from its
//! frame loop; `tick` forces an immediate pass (mount, relayout).

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::catalog::CategoryKey;
use super::category_bar::CategoryBarController;
use super::geometry::{GeometryProvider, NodeRef};
use super::registry::SectionRegistry;
use super::resolver::VisibilityResolver;
use super::selection::ActiveSelection;
use super::sticky::StickyHeaderCoordinator;
use super::viewport::{ViewportSignal, ViewportState};
use crate::error::NavError;

// ───────────────────────────────────────── config ────────────

/// Tunable thresholds, in layout units.  Defaults suit a terminal where one
/// unit is one row or column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Throttle window for scroll/resize ticks.
    pub throttle_ms: u64,
    /// Height of the primary page header.
    pub header_height: f64,
    /// Height of the category bar; the extra sticky offset while it shows.
    pub bar_height: f64,
    /// Band below the boundary where a section counts as "entering".
    pub boundary_band: f64,
    /// Slack past the header before a section's compact header retires.
    pub sticky_epsilon: f64,
    /// Slack at the right end of the bar for the right affordance.
    pub scroll_epsilon: f64,
    /// Distance one arrow click scrolls the bar.
    pub bar_scroll_step: f64,
    /// Ease-out damping for bar scrolling, `0.05..=0.95`.
    pub bar_smooth_speed: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 50,
            header_height: 3.0,
            bar_height: 3.0,
            boundary_band: 2.0,
            sticky_epsilon: 0.5,
            scroll_epsilon: 1.0,
            bar_scroll_step: 12.0,
            bar_smooth_speed: 0.35,
        }
    }
}

impl NavConfig {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

// ───────────────────────────────────────── navigator ─────────

/// What changed during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub active_changed: bool,
    pub headers_changed: bool,
    pub bar_toggled: bool,
}

impl TickOutcome {
    pub fn needs_redraw(&self) -> bool {
        self.active_changed || self.headers_changed || self.bar_toggled
    }
}

#[derive(Debug, Clone)]
pub struct SectionNavigator {
    config: NavConfig,
    signal: ViewportSignal,
    registry: SectionRegistry,
    resolver: VisibilityResolver,
    bar: CategoryBarController,
    sticky: StickyHeaderCoordinator,
    selection: ActiveSelection,
    /// Section a click-initiated scroll is heading to.  Resolution is
    /// suspended until the host reports the scroll has landed.
    jump: Option<CategoryKey>,
}

impl SectionNavigator {
    pub fn new(config: NavConfig, keys: Vec<CategoryKey>) -> Result<Self, NavError> {
        let registry = SectionRegistry::new(keys.iter().cloned());
        let selection = ActiveSelection::new(keys).ok_or(NavError::NoCategories)?;
        Ok(Self {
            signal: ViewportSignal::new(config.throttle(), config.bar_height, 0.0),
            registry,
            resolver: VisibilityResolver::new(config.boundary_band),
            bar: CategoryBarController::new(
                config.bar_scroll_step,
                config.scroll_epsilon,
                config.bar_smooth_speed,
            ),
            sticky: StickyHeaderCoordinator::new(config.header_height, config.sticky_epsilon),
            selection,
            jump: None,
            config,
        })
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SectionRegistry {
        &mut self.registry
    }

    pub fn bar(&self) -> &CategoryBarController {
        &self.bar
    }

    pub fn bar_mut(&mut self) -> &mut CategoryBarController {
        &mut self.bar
    }

    /// Offset below which content counts as in view.
    pub fn boundary(&self) -> f64 {
        self.config.header_height + self.signal.state().sticky_boundary_px
    }

    // ── ticking ──────────────────────────────────────────────────

    /// A raw scroll or resize happened.
    pub fn notify(&mut self, now: Instant) {
        self.signal.notify(now);
    }

    /// When the host should poll next, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.signal.next_deadline()
    }

    /// Run a tick if the throttle window has elapsed.
    pub fn poll<G: GeometryProvider>(
        &mut self,
        now: Instant,
        geometry: &G,
        scroll_y: f64,
    ) -> Option<TickOutcome> {
        let viewport = self.signal.poll(now, scroll_y)?;
        Some(self.run(viewport, geometry))
    }

    /// Run a tick now, bypassing the throttle.
    pub fn tick<G: GeometryProvider>(&mut self, geometry: &G, scroll_y: f64) -> TickOutcome {
        let viewport = self.signal.sample(scroll_y);
        self.run(viewport, geometry)
    }

    fn run<G: GeometryProvider>(&mut self, viewport: ViewportState, geometry: &G) -> TickOutcome {
        let mut outcome = TickOutcome {
            bar_toggled: self.sticky.apply_viewport(&viewport),
            ..TickOutcome::default()
        };

        let boundary = self.boundary();
        if self.jump.is_none() {
            let resolved = self.resolver.resolve(
                &self.registry,
                geometry,
                boundary,
                Some(self.selection.key()),
            );
            if let Some(key) = resolved {
                if self.selection.set(&key) {
                    tracing::debug!(
                        "active: `{key}` (scroll_y={:.1}, boundary={boundary:.1})",
                        viewport.scroll_y
                    );
                    self.bar.center_on(&key);
                    outcome.active_changed = true;
                }
            }
        }

        outcome.headers_changed = self.sticky.update(&self.registry, geometry);
        outcome
    }

    // ── selection ────────────────────────────────────────────────

    /// Click on a pill: activate `key` and return the section node the host
    /// should scroll to (top-aligned, smoothly).  Unknown keys do nothing.
    pub fn select(&mut self, key: &CategoryKey) -> Option<NodeRef> {
        let entry = self.registry.get(key)?;
        self.selection.set(key);
        self.bar.center_on(key);
        self.jump = Some(key.clone());
        tracing::debug!("select: jumping to `{key}`");
        Some(entry.section)
    }

    /// Activate the category `delta` places away from the current one.
    pub fn select_relative(&mut self, delta: isize) -> Option<NodeRef> {
        let key = self.selection.neighbour(delta).clone();
        self.select(&key)
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// The jump scroll has landed: resume resolution and tick once.
    pub fn settle_jump<G: GeometryProvider>(&mut self, geometry: &G, scroll_y: f64) -> TickOutcome {
        if let Some(key) = self.jump.take() {
            tracing::debug!("select: landed on `{key}`");
        }
        self.tick(geometry, scroll_y)
    }

    // ── read side ────────────────────────────────────────────────

    pub fn active_key(&self) -> &CategoryKey {
        self.selection.key()
    }

    pub fn active_index(&self) -> usize {
        self.selection.index()
    }

    pub fn keys(&self) -> &[CategoryKey] {
        self.selection.keys()
    }

    pub fn mobile_header_visible(&self, key: &CategoryKey) -> bool {
        self.sticky.is_visible(key)
    }

    pub fn bar_visible(&self) -> bool {
        self.sticky.bar_visible()
    }

    pub fn can_scroll_left(&self) -> bool {
        self.bar.can_scroll_left()
    }

    pub fn can_scroll_right(&self) -> bool {
        self.bar.can_scroll_right()
    }
}
