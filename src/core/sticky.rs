//! Compact per-section headers and the primary bar's slide in/out.
//!
//! A section shows its compact header once its hero has scrolled under the
//! primary header, and keeps it until the whole section has scrolled past.
//! This runs on its own geometry pass, independent of which section is
//! active.

use std::collections::BTreeSet;

use super::catalog::CategoryKey;
use super::geometry::GeometryProvider;
use super::registry::SectionRegistry;
use super::viewport::ViewportState;

#[derive(Debug, Clone)]
pub struct StickyHeaderCoordinator {
    header_height: f64,
    epsilon: f64,
    flags: BTreeSet<CategoryKey>,
    bar_visible: bool,
}

impl StickyHeaderCoordinator {
    pub fn new(header_height: f64, epsilon: f64) -> Self {
        Self {
            header_height,
            epsilon,
            flags: BTreeSet::new(),
            bar_visible: true,
        }
    }

    /// Recompute the compact-header set.  Returns `true` if it changed.
    pub fn update<G: GeometryProvider>(
        &mut self,
        registry: &SectionRegistry,
        geometry: &G,
    ) -> bool {
        let next: BTreeSet<CategoryKey> = registry
            .iter()
            .filter(|(_, entry)| {
                let (Some(hero), Some(section)) =
                    (geometry.rect(entry.hero), geometry.rect(entry.section))
                else {
                    return false;
                };
                hero.bottom() < self.header_height
                    && section.bottom() > self.header_height + self.epsilon
            })
            .map(|(key, _)| key.clone())
            .collect();

        if next == self.flags {
            return false;
        }
        tracing::debug!("compact headers: {next:?}");
        self.flags = next;
        true
    }

    /// Follow the direction toggle: the bar is shown while the viewport
    /// reserves its expanded offset.  Returns `true` if visibility changed.
    pub fn apply_viewport(&mut self, viewport: &ViewportState) -> bool {
        let visible = viewport.sticky_boundary_px > 0.0;
        let changed = visible != self.bar_visible;
        self.bar_visible = visible;
        changed
    }

    pub fn is_visible(&self, key: &CategoryKey) -> bool {
        self.flags.contains(key)
    }

    pub fn bar_visible(&self) -> bool {
        self.bar_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::fake::FakeGeometry;
    use crate::core::geometry::NodeRef;
    use crate::core::viewport::ScrollDirection;

    const HEADER: f64 = 64.0;

    fn registry() -> SectionRegistry {
        let mut registry = SectionRegistry::new(["a", "b"].map(CategoryKey::from));
        registry.register("a".into(), NodeRef(0), NodeRef(1));
        registry.register("b".into(), NodeRef(2), NodeRef(3));
        registry
    }

    /// Section `a` 1000 tall with a 300 hero, `b` right after it.
    fn page() -> FakeGeometry {
        FakeGeometry::new(800.0)
            .with(0, 0.0, 1000.0)
            .with(1, 0.0, 300.0)
            .with(2, 1000.0, 1000.0)
            .with(3, 1000.0, 300.0)
    }

    #[test]
    fn header_enters_after_hero_and_leaves_after_section() {
        let registry = registry();
        let mut geometry = page();
        let mut sticky = StickyHeaderCoordinator::new(HEADER, 1.0);

        assert!(!sticky.update(&registry, &geometry));
        assert!(!sticky.is_visible(&"a".into()));

        // Hero bottom at 250: still below the header.
        geometry.scroll(50.0);
        sticky.update(&registry, &geometry);
        assert!(!sticky.is_visible(&"a".into()));

        // Hero bottom at 60: tucked under the header.
        geometry.scroll(190.0);
        assert!(sticky.update(&registry, &geometry));
        assert!(sticky.is_visible(&"a".into()));
        assert!(!sticky.is_visible(&"b".into()));

        // Section bottom at 64.5: inside the epsilon, header goes away.
        geometry.scroll(695.5);
        assert!(sticky.update(&registry, &geometry));
        assert!(!sticky.is_visible(&"a".into()));
    }

    #[test]
    fn missing_geometry_hides_header() {
        let registry = registry();
        let mut geometry = page();
        geometry.scroll(500.0);
        let mut sticky = StickyHeaderCoordinator::new(HEADER, 1.0);
        sticky.update(&registry, &geometry);
        assert!(sticky.is_visible(&"a".into()));

        geometry.rects.remove(&NodeRef(1));
        sticky.update(&registry, &geometry);
        assert!(!sticky.is_visible(&"a".into()));
        assert!(!sticky.is_visible(&"b".into()));
    }

    #[test]
    fn bar_follows_direction_toggle() {
        let mut sticky = StickyHeaderCoordinator::new(HEADER, 1.0);
        assert!(sticky.bar_visible());
        let down = ViewportState {
            scroll_y: 10.0,
            last_scroll_y: 0.0,
            direction: ScrollDirection::Down,
            sticky_boundary_px: 0.0,
        };
        assert!(sticky.apply_viewport(&down));
        assert!(!sticky.bar_visible());
        assert!(!sticky.apply_viewport(&down));
    }
}
