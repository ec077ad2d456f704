//! Already-loaded page data: the ordered category list and the project
//! cards shown inside each category's section.
//!
//! The catalog is read once at startup and never mutated afterwards.  Order
//! matters: it is both the document order of the sections and the order of
//! the pills in the category bar.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ───────────────────────────────────────── keys ──────────────

/// Stable identity of a category (market).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ───────────────────────────────────────── records ───────────

/// One market / category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: CategoryKey,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Reference to the hero image.  Only displayed as text.
    #[serde(default)]
    pub hero_image: Option<String>,
}

/// A project card listed under a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Ordered categories plus their project cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub projects: HashMap<CategoryKey, Vec<ProjectCard>>,
}

impl Catalog {
    /// Load a catalog from a `.json` or `.toml` file and validate it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let catalog = if is_toml {
            Self::from_toml(&text)?
        } else {
            Self::from_json(&text)?
        };
        tracing::info!(
            "catalog loaded: {} categories from {}",
            catalog.categories.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(text)?;
        catalog.validated()
    }

    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(text)?;
        catalog.validated()
    }

    /// Reject empty catalogs and duplicate keys; drop project lists that
    /// point at no category.
    fn validated(mut self) -> Result<Self, CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.key.clone()) {
                return Err(CatalogError::DuplicateKey(category.key.clone()));
            }
        }
        self.projects.retain(|key, _| {
            let known = seen.contains(key);
            if !known {
                tracing::warn!("ignoring projects for unknown category `{key}`");
            }
            known
        });
        Ok(self)
    }

    pub fn keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.categories.iter().map(|c| &c.key)
    }

    pub fn projects_for(&self, key: &CategoryKey) -> &[ProjectCard] {
        self.projects.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Small built-in catalog used when no `--catalog` is given.
    pub fn demo() -> Self {
        let markets: &[(&str, &str, &str, &[(&str, &str, &str)])] = &[
            (
                "healthcare",
                "Healthcare",
                "Clinics, hospitals and research labs designed around patients and staff, \
                 from outpatient centres to full acute-care campuses.",
                &[
                    (
                        "Riverside Medical Pavilion",
                        "Portland, OR",
                        "Four-storey outpatient pavilion with imaging suites and a rooftop garden.",
                    ),
                    (
                        "North Valley Clinic",
                        "Boise, ID",
                        "Community clinic renovation delivered while the building stayed open.",
                    ),
                    (
                        "Harbor Research Lab",
                        "Seattle, WA",
                        "Wet-lab fit-out with vibration isolated benches.",
                    ),
                ],
            ),
            (
                "education",
                "Education",
                "K-12 schools, universities and training centres that hold up to daily use.",
                &[
                    (
                        "Lakeside Elementary",
                        "Madison, WI",
                        "New 60-classroom school with a shared community gym.",
                    ),
                    (
                        "Engineering Commons",
                        "Ames, IA",
                        "Maker space and lecture halls inside a restored warehouse.",
                    ),
                ],
            ),
            (
                "hospitality",
                "Hospitality",
                "Hotels, restaurants and venues where the guest experience starts at the door.",
                &[
                    ("The Alder Hotel", "Bend, OR", "120-key boutique hotel with a timber lobby."),
                    (
                        "Pier 9 Food Hall",
                        "San Diego, CA",
                        "Twelve-vendor food hall in a former cannery.",
                    ),
                    (
                        "Summit Lodge",
                        "Park City, UT",
                        "Ski-in lodge expansion with a heated outdoor deck.",
                    ),
                ],
            ),
            (
                "industrial",
                "Industrial",
                "Warehouses, plants and distribution centres built for throughput.",
                &[
                    (
                        "Gateway Logistics Hub",
                        "Reno, NV",
                        "400,000 sq ft cross-dock distribution centre.",
                    ),
                    (
                        "Cascade Bottling Plant",
                        "Yakima, WA",
                        "Process plant with clean-room filling lines.",
                    ),
                ],
            ),
            (
                "civic",
                "Civic",
                "Libraries, transit and public buildings that serve whole communities.",
                &[
                    (
                        "Eastside Library",
                        "Spokane, WA",
                        "Branch library with flexible meeting rooms.",
                    ),
                    (
                        "Union Transit Center",
                        "Tacoma, WA",
                        "Bus and light-rail interchange with covered platforms.",
                    ),
                ],
            ),
            (
                "residential",
                "Residential",
                "Multi-family housing from mid-rise apartments to senior living.",
                &[
                    (
                        "Maple Court",
                        "Eugene, OR",
                        "Eighty affordable apartments over ground-floor retail.",
                    ),
                    (
                        "Willow Senior Living",
                        "Salem, OR",
                        "Assisted living community with memory care wing.",
                    ),
                ],
            ),
        ];

        let mut catalog = Catalog::default();
        for (key, title, description, projects) in markets {
            let key = CategoryKey::from(*key);
            catalog.categories.push(Category {
                key: key.clone(),
                title: (*title).to_string(),
                description: (*description).to_string(),
                hero_image: Some(format!("markets/{key}/hero.jpg")),
            });
            let cards = projects
                .iter()
                .map(|(title, location, description)| ProjectCard {
                    title: (*title).to_string(),
                    location: (*location).to_string(),
                    description: (*description).to_string(),
                    image: None,
                    link: Some(format!("/projects/{key}")),
                })
                .collect();
            catalog.projects.insert(key, cards);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_catalog_keeps_order_and_drops_orphan_projects() {
        let text = r#"{
            "categories": [
                {"key": "b", "title": "Bravo"},
                {"key": "a", "title": "Alpha", "description": "first"}
            ],
            "projects": {
                "a": [{"title": "One", "location": "Here"}],
                "zzz": [{"title": "Orphan"}]
            }
        }"#;
        let catalog = Catalog::from_json(text).unwrap();
        let keys: Vec<_> = catalog.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(catalog.projects_for(&"a".into()).len(), 1);
        assert!(catalog.projects_for(&"b".into()).is_empty());
        assert!(!catalog.projects.contains_key(&CategoryKey::from("zzz")));
    }

    #[test]
    fn toml_catalog_parses() {
        let text = r#"
            [[categories]]
            key = "energy"
            title = "Energy"
            hero_image = "energy.jpg"

            [[projects.energy]]
            title = "Solar Farm"
            location = "Nevada"
        "#;
        let catalog = Catalog::from_toml(text).unwrap();
        assert_eq!(catalog.categories[0].hero_image.as_deref(), Some("energy.jpg"));
        assert_eq!(catalog.projects_for(&"energy".into())[0].title, "Solar Farm");
    }

    #[test]
    fn empty_and_duplicate_catalogs_are_rejected() {
        assert!(matches!(
            Catalog::from_json(r#"{"categories": []}"#),
            Err(CatalogError::Empty)
        ));
        let dup = r#"{"categories": [{"key": "a", "title": "A"}, {"key": "a", "title": "A2"}]}"#;
        assert!(matches!(
            Catalog::from_json(dup),
            Err(CatalogError::DuplicateKey(k)) if k.as_str() == "a"
        ));
    }

    #[test]
    fn demo_catalog_is_valid() {
        let demo = Catalog::demo();
        assert!(demo.clone().validated().is_ok());
        assert!(demo.categories.len() >= 3);
    }
}
