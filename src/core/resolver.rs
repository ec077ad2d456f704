//! Picks the single active category from section geometry.
//!
//! Everything below the sticky boundary counts as "in view".  The active
//! section is kept for as long as any part of it is still in view
//! (hysteresis); only once it has left does a new section get chosen.

use std::cmp::Ordering;

use super::catalog::CategoryKey;
use super::geometry::{GeometryProvider, Rect};
use super::registry::SectionRegistry;

/// Per-section visibility for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilitySample {
    pub key: CategoryKey,
    /// Share of the section (or of the usable viewport, whichever is
    /// smaller) that is visible below the boundary, `0..=100`.
    pub visible_percent: f64,
    /// `rect.top - boundary`; negative once the top has passed under the
    /// sticky chrome.
    pub top_distance_from_boundary: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct VisibilityResolver {
    /// Width of the entry band below the boundary.
    band: f64,
}

impl VisibilityResolver {
    pub fn new(band: f64) -> Self {
        Self {
            band: band.max(0.0),
        }
    }

    /// Any part of the section lies between the boundary and the viewport
    /// bottom.
    pub fn is_candidate(rect: Rect, boundary: f64, viewport_height: f64) -> bool {
        rect.bottom() > boundary && rect.top < viewport_height
    }

    /// Visibility of one section, or `None` when it is not a candidate.
    pub fn measure(
        &self,
        key: &CategoryKey,
        rect: Rect,
        boundary: f64,
        viewport_height: f64,
    ) -> Option<VisibilitySample> {
        if !Self::is_candidate(rect, boundary, viewport_height) {
            return None;
        }
        let visible_top = boundary.max(rect.top);
        let visible_bottom = viewport_height.min(rect.bottom());
        let visible_height = (visible_bottom - visible_top).max(0.0);
        let denominator = rect.height.min(viewport_height - boundary);
        let visible_percent = if denominator > 0.0 {
            (100.0 * visible_height / denominator).min(100.0)
        } else {
            0.0
        };
        Some(VisibilitySample {
            key: key.clone(),
            visible_percent,
            top_distance_from_boundary: rect.top - boundary,
        })
    }

    /// Candidate samples in category order.  Sections without geometry are
    /// skipped.
    pub fn samples<G: GeometryProvider>(
        &self,
        registry: &SectionRegistry,
        geometry: &G,
        boundary: f64,
    ) -> Vec<VisibilitySample> {
        let viewport_height = geometry.viewport_height();
        registry
            .iter()
            .filter_map(|(key, entry)| {
                let rect = geometry.rect(entry.section)?;
                self.measure(key, rect, boundary, viewport_height)
            })
            .collect()
    }

    /// Resolve the active key for this tick.
    ///
    /// Returns `None` when the selection should stay as it is: the viewport
    /// has no room below the boundary, or no section is in view.  Returns
    /// `current` unchanged while it is still a candidate.
    pub fn resolve<G: GeometryProvider>(
        &self,
        registry: &SectionRegistry,
        geometry: &G,
        boundary: f64,
        current: Option<&CategoryKey>,
    ) -> Option<CategoryKey> {
        let viewport_height = geometry.viewport_height();
        if viewport_height <= boundary || viewport_height.is_nan() {
            return None;
        }

        if let Some(current) = current {
            let still_in_view = registry
                .get(current)
                .and_then(|entry| geometry.rect(entry.section))
                .is_some_and(|rect| Self::is_candidate(rect, boundary, viewport_height));
            if still_in_view {
                return Some(current.clone());
            }
        }

        let mut best: Option<VisibilitySample> = None;
        for sample in self.samples(registry, geometry, boundary) {
            let better = match &best {
                None => true,
                Some(b) => self.rank(&sample, b) == Ordering::Greater,
            };
            if better {
                best = Some(sample);
            }
        }
        best.map(|s| s.key)
    }

    /// Top lies within the entry band just below the boundary (or above it).
    pub fn is_entering(&self, sample: &VisibilitySample) -> bool {
        sample.top_distance_from_boundary <= self.band
    }

    /// Entering sections beat peeking ones; then larger visible share wins.
    /// Equal ranks keep the earlier section.
    fn rank(&self, a: &VisibilitySample, b: &VisibilitySample) -> Ordering {
        self.is_entering(a).cmp(&self.is_entering(b)).then(
            a.visible_percent
                .partial_cmp(&b.visible_percent)
                .unwrap_or(Ordering::Equal),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::fake::FakeGeometry;
    use crate::core::geometry::NodeRef;

    const BAND: f64 = 50.0;

    /// Registry for keys `names`, section `i` at node `2i`, hero at `2i+1`.
    fn registry(names: &[&str]) -> SectionRegistry {
        let mut registry = SectionRegistry::new(names.iter().map(|n| CategoryKey::from(*n)));
        for (i, name) in names.iter().enumerate() {
            registry.register((*name).into(), NodeRef(2 * i), NodeRef(2 * i + 1));
        }
        registry
    }

    #[test]
    fn percent_uses_smaller_of_section_and_usable_viewport() {
        let resolver = VisibilityResolver::new(BAND);
        let key = CategoryKey::from("a");
        // Tall section filling the whole usable viewport.
        let tall = resolver
            .measure(&key, Rect::vertical(-500.0, 3000.0), 100.0, 1000.0)
            .unwrap();
        assert_eq!(tall.visible_percent, 100.0);
        assert_eq!(tall.top_distance_from_boundary, -600.0);
        assert!(resolver.is_entering(&tall));

        // Short section half under the boundary.
        let short = resolver
            .measure(&key, Rect::vertical(0.0, 200.0), 100.0, 1000.0)
            .unwrap();
        assert_eq!(short.visible_percent, 50.0);

        // Entirely above the boundary.
        assert!(resolver
            .measure(&key, Rect::vertical(-300.0, 400.0), 100.0, 1000.0)
            .is_none());
    }

    #[test]
    fn middle_section_wins_when_it_fills_the_view() {
        let registry = registry(&["1", "2", "3"]);
        // Section 2 spans rows 100..900.
        let geometry = FakeGeometry::new(1000.0)
            .with(0, -700.0, 800.0)
            .with(2, 100.0, 800.0)
            .with(4, 900.0, 800.0);
        let resolver = VisibilityResolver::new(BAND);
        let active = resolver.resolve(&registry, &geometry, 100.0, Some(&"1".into()));
        assert_eq!(active, Some("2".into()));
    }

    #[test]
    fn equal_share_ties_break_by_category_order() {
        let registry = registry(&["A", "B", "C"]);
        // A scrolled away; B and C side by side, both half visible and
        // both well below the entry band.
        let geometry = FakeGeometry::new(1000.0)
            .with(0, -2000.0, 800.0)
            .with(2, 600.0, 800.0)
            .with(4, 600.0, 800.0);
        let resolver = VisibilityResolver::new(BAND);
        let samples = resolver.samples(&registry, &geometry, 100.0);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].visible_percent, samples[1].visible_percent);
        assert!(samples.iter().all(|s| !resolver.is_entering(s)));

        let active = resolver.resolve(&registry, &geometry, 100.0, Some(&"A".into()));
        assert_eq!(active, Some("B".into()));
    }

    #[test]
    fn entering_section_beats_larger_peeking_one() {
        let registry = registry(&["a", "b"]);
        // `a` just entered at the boundary but is short; `b` peeks from
        // below with a larger share of itself visible.
        let geometry = FakeGeometry::new(1000.0)
            .with(0, 120.0, 2000.0)
            .with(2, 700.0, 200.0);
        let resolver = VisibilityResolver::new(BAND);
        let samples = resolver.samples(&registry, &geometry, 100.0);
        assert!(samples[1].visible_percent > samples[0].visible_percent);
        assert_eq!(samples[0].top_distance_from_boundary, 20.0);
        assert!(resolver.is_entering(&samples[0]));
        assert!(!resolver.is_entering(&samples[1]));
        assert_eq!(
            resolver.resolve(&registry, &geometry, 100.0, None),
            Some("a".into())
        );
    }

    #[test]
    fn active_section_is_kept_while_any_part_is_in_view() {
        let registry = registry(&["a", "b"]);
        // `a` has a sliver left below the boundary; `b` dominates.
        let geometry = FakeGeometry::new(1000.0)
            .with(0, -690.0, 800.0)
            .with(2, 110.0, 800.0);
        let resolver = VisibilityResolver::new(BAND);
        assert_eq!(
            resolver.resolve(&registry, &geometry, 100.0, Some(&"a".into())),
            Some("a".into())
        );
        // Without an active section `b` would win.
        assert_eq!(
            resolver.resolve(&registry, &geometry, 100.0, None),
            Some("b".into())
        );
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let registry = registry(&["a", "b", "c"]);
        let geometry = FakeGeometry::new(800.0)
            .with(0, -900.0, 600.0)
            .with(2, -50.0, 600.0)
            .with(4, 550.0, 600.0);
        let resolver = VisibilityResolver::new(BAND);
        let first = resolver.resolve(&registry, &geometry, 60.0, None);
        let second = resolver.resolve(&registry, &geometry, 60.0, first.as_ref());
        assert_eq!(first, Some("b".into()));
        assert_eq!(first, second);
    }

    #[test]
    fn no_candidates_or_zero_viewport_leave_selection_alone() {
        let registry = registry(&["a", "b"]);
        let resolver = VisibilityResolver::new(BAND);

        let above = FakeGeometry::new(1000.0)
            .with(0, -3000.0, 800.0)
            .with(2, -2000.0, 800.0);
        assert_eq!(resolver.resolve(&registry, &above, 100.0, Some(&"a".into())), None);

        let collapsed = FakeGeometry::new(0.0)
            .with(0, -50.0, 800.0)
            .with(2, 750.0, 800.0);
        assert_eq!(resolver.resolve(&registry, &collapsed, 100.0, Some(&"b".into())), None);
        assert_eq!(resolver.resolve(&registry, &collapsed, 0.0, None), None);
    }

    #[test]
    fn unmounted_sections_are_not_candidates() {
        let registry = registry(&["a", "b"]);
        // Node 0 (section `a`) has no geometry.
        let geometry = FakeGeometry::new(1000.0).with(2, 300.0, 800.0);
        let resolver = VisibilityResolver::new(BAND);
        assert_eq!(
            resolver.resolve(&registry, &geometry, 100.0, Some(&"a".into())),
            Some("b".into())
        );
    }
}
