//! The scrolling markets page: document layout, its geometry as seen by the
//! navigator, and the widget that paints the visible slice.
//!
//! Layout is done once per terminal width.  Every category becomes one
//! section made of a hero block (title, description, image reference)
//! followed by its project cards.  The layout is the single source of truth
//! for both rendering and the rects handed to the navigator, so what is
//! highlighted always matches what is on screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::{
    catalog::{Catalog, CategoryKey},
    geometry::{self, GeometryProvider, NodeRef},
    registry::SectionRegistry,
};

use super::theme::Theme;

// ───────────────────────────────────────── document ──────────

/// What a document line shows; drives its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    HeroTitle,
    HeroText,
    HeroImage,
    CardTitle,
    CardMeta,
    CardText,
    CardLink,
    Divider,
}

#[derive(Debug, Clone)]
pub struct PageLine {
    pub kind: LineKind,
    pub text: String,
    /// Index of the owning section, `None` for page padding.
    pub section: Option<usize>,
}

/// Row span of one section in document coordinates.
#[derive(Debug, Clone)]
pub struct SectionBlock {
    pub key: CategoryKey,
    pub title: String,
    pub top: usize,
    pub height: usize,
    pub hero_height: usize,
    pub section_node: NodeRef,
    pub hero_node: NodeRef,
}

/// The whole page laid out for one width.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub lines: Vec<PageLine>,
    pub sections: Vec<SectionBlock>,
    pub width: u16,
}

impl PageLayout {
    /// Lay out `catalog` for a page `width` columns wide.  `top_padding`
    /// blank rows keep the first hero clear of the sticky chrome.
    pub fn build(catalog: &Catalog, width: u16, top_padding: usize) -> Self {
        let text_width = usize::from(width).saturating_sub(4).max(10);
        let mut lines = Vec::new();
        let mut sections = Vec::new();

        let push = |lines: &mut Vec<PageLine>, kind, text: String, section| {
            lines.push(PageLine {
                kind,
                text,
                section,
            });
        };

        for _ in 0..top_padding {
            push(&mut lines, LineKind::Blank, String::new(), None);
        }

        for (i, category) in catalog.categories.iter().enumerate() {
            let sec = Some(i);
            let top = lines.len();

            // Hero block.
            push(&mut lines, LineKind::Blank, String::new(), sec);
            push(&mut lines, LineKind::HeroTitle, category.title.to_uppercase(), sec);
            for row in wrap_text(&category.description, text_width) {
                push(&mut lines, LineKind::HeroText, row, sec);
            }
            if let Some(image) = &category.hero_image {
                push(&mut lines, LineKind::HeroImage, format!("[image: {image}]"), sec);
            }
            push(&mut lines, LineKind::Blank, String::new(), sec);
            let hero_height = lines.len() - top;

            // Project cards.
            let projects = catalog.projects_for(&category.key);
            if projects.is_empty() {
                push(&mut lines, LineKind::CardText, "No projects yet.".into(), sec);
                push(&mut lines, LineKind::Blank, String::new(), sec);
            }
            for card in projects {
                push(&mut lines, LineKind::CardTitle, format!("▸ {}", card.title), sec);
                if !card.location.is_empty() {
                    push(&mut lines, LineKind::CardMeta, format!("  {}", card.location), sec);
                }
                for row in wrap_text(&card.description, text_width.saturating_sub(2).max(8)) {
                    push(&mut lines, LineKind::CardText, format!("  {row}"), sec);
                }
                if let Some(link) = &card.link {
                    push(&mut lines, LineKind::CardLink, format!("  → {link}"), sec);
                }
                push(&mut lines, LineKind::Blank, String::new(), sec);
            }
            push(
                &mut lines,
                LineKind::Divider,
                "─".repeat(usize::from(width)),
                sec,
            );

            sections.push(SectionBlock {
                key: category.key.clone(),
                title: category.title.clone(),
                top,
                height: lines.len() - top,
                hero_height,
                section_node: NodeRef(2 * i),
                hero_node: NodeRef(2 * i + 1),
            });
        }

        Self {
            lines,
            sections,
            width,
        }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Largest scroll offset that still fills a viewport of `viewport_height`.
    pub fn max_scroll(&self, viewport_height: usize) -> usize {
        self.height().saturating_sub(viewport_height)
    }

    pub fn section(&self, key: &CategoryKey) -> Option<&SectionBlock> {
        self.sections.iter().find(|s| &s.key == key)
    }

    /// Document rows `(top, height)` of a node.
    pub fn node_span(&self, node: NodeRef) -> Option<(usize, usize)> {
        let section = self.sections.get(node.0 / 2)?;
        if node.0 % 2 == 0 {
            Some((section.top, section.height))
        } else {
            Some((section.top, section.hero_height))
        }
    }

    /// Register every section's nodes, replacing earlier registrations and
    /// dropping sections this layout no longer contains.
    pub fn register(&self, registry: &mut SectionRegistry) {
        let stale: Vec<CategoryKey> = registry
            .iter()
            .map(|(key, _)| key.clone())
            .filter(|key| self.section(key).is_none())
            .collect();
        for key in &stale {
            registry.unregister(key);
        }
        for section in &self.sections {
            registry.register(section.key.clone(), section.section_node, section.hero_node);
        }
    }
}

/// Greedy word wrap by character count.  Words longer than `width` are
/// split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        rows.push(current);
    }
    rows
}

// ───────────────────────────────────────── geometry ──────────

/// The layout seen through a viewport scrolled to `scroll_y`.
pub struct PageGeometry<'a> {
    layout: &'a PageLayout,
    scroll_y: f64,
    viewport_height: f64,
}

impl<'a> PageGeometry<'a> {
    pub fn new(layout: &'a PageLayout, scroll_y: f64, viewport_height: f64) -> Self {
        Self {
            layout,
            scroll_y,
            viewport_height,
        }
    }
}

impl GeometryProvider for PageGeometry<'_> {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn rect(&self, node: NodeRef) -> Option<geometry::Rect> {
        let (top, height) = self.layout.node_span(node)?;
        Some(geometry::Rect::new(
            0.0,
            top as f64 - self.scroll_y,
            f64::from(self.layout.width),
            height as f64,
        ))
    }
}

// ───────────────────────────────────────── widget ────────────

/// Paints the document rows visible at `scroll_y`.
pub struct PageView<'a> {
    layout: &'a PageLayout,
    scroll_y: usize,
    active: usize,
}

impl<'a> PageView<'a> {
    pub fn new(layout: &'a PageLayout, scroll_y: usize, active: usize) -> Self {
        Self {
            layout,
            scroll_y,
            active,
        }
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self
            .layout
            .lines
            .iter()
            .skip(self.scroll_y)
            .take(usize::from(area.height));

        for (i, line) in rows.enumerate() {
            let active = line.section == Some(self.active);
            let style = match line.kind {
                LineKind::HeroTitle if active => Theme::active_title_style(),
                LineKind::HeroTitle => Theme::title_style(),
                LineKind::HeroText => Theme::hero_text_style(),
                LineKind::HeroImage => Theme::dim_style(),
                LineKind::CardTitle => Theme::card_title_style(),
                LineKind::CardMeta => Theme::dim_style(),
                LineKind::CardText | LineKind::Blank => Theme::text_style(),
                LineKind::CardLink => Theme::link_style(),
                LineKind::Divider => Theme::border_style(),
            };
            let y = area.y + i as u16;
            let text = Line::from(Span::styled(format!("  {}", line.text), style));
            buf.set_line(area.x, y, &text, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{Category, ProjectCard};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        for (key, title) in [("a", "Alpha"), ("b", "Bravo")] {
            catalog.categories.push(Category {
                key: key.into(),
                title: title.into(),
                description: "one two three four five six seven".into(),
                hero_image: Some(format!("{key}.jpg")),
            });
        }
        catalog.projects.insert(
            "a".into(),
            vec![ProjectCard {
                title: "Tower".into(),
                location: "Oslo".into(),
                description: "tall".into(),
                image: None,
                link: Some("/t".into()),
            }],
        );
        catalog
    }

    #[test]
    fn wrap_respects_width_and_splits_long_words() {
        assert_eq!(wrap_text("one two three", 7), ["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert!(wrap_text("   ", 5).is_empty());
    }

    #[test]
    fn sections_tile_the_document_after_padding() {
        let layout = PageLayout::build(&catalog(), 20, 6);
        assert_eq!(layout.sections[0].top, 6);
        let first = &layout.sections[0];
        let second = &layout.sections[1];
        assert_eq!(first.top + first.height, second.top);
        assert_eq!(second.top + second.height, layout.height());
        assert!(first.hero_height < first.height);

        // Hero rows: blank, title, 3 wrapped description rows, image, blank.
        assert_eq!(first.hero_height, 7);
        assert!(layout.lines[first.top..first.top + first.height]
            .iter()
            .all(|l| l.section == Some(0)));
    }

    #[test]
    fn geometry_shifts_with_scroll() {
        let layout = PageLayout::build(&catalog(), 20, 6);
        let second = layout.sections[1].clone();
        let geometry = PageGeometry::new(&layout, 10.0, 30.0);
        let rect = geometry.rect(second.section_node).unwrap();
        assert_eq!(rect.top, second.top as f64 - 10.0);
        assert_eq!(rect.height, second.height as f64);
        let hero = geometry.rect(second.hero_node).unwrap();
        assert_eq!(hero.height, second.hero_height as f64);
        assert!(geometry.rect(NodeRef(99)).is_none());
    }

    #[test]
    fn registering_fills_registry_in_order() {
        let layout = PageLayout::build(&catalog(), 40, 0);
        let mut registry = SectionRegistry::new(["a", "b"].map(CategoryKey::from));
        layout.register(&mut registry);
        let keys: Vec<_> = registry.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn registering_drops_sections_missing_from_layout() {
        let layout = PageLayout::build(&catalog(), 40, 0);
        let mut registry = SectionRegistry::new(["a", "gone", "b"].map(CategoryKey::from));
        registry.register("gone".into(), NodeRef(40), NodeRef(41));
        layout.register(&mut registry);
        assert!(registry.get(&"gone".into()).is_none());
        let keys: Vec<_> = registry.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn page_view_renders_visible_slice() {
        let layout = PageLayout::build(&catalog(), 20, 0);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        PageView::new(&layout, 1, 0).render(area, &mut buf);
        let row: String = (0..20)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(row.starts_with("  ALPHA"));
    }
}
