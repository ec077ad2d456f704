//! Section bookkeeping: which nodes belong to which category.
//!
//! Sections may register in any order (and re-register after a relayout),
//! but iteration always follows category order.  That order is what the
//! resolver uses to break ties.

use std::collections::BTreeMap;

use super::catalog::CategoryKey;
use super::geometry::NodeRef;

/// Node handles for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionEntry {
    pub section: NodeRef,
    pub hero: NodeRef,
}

#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    /// Category order; index = rank.
    order: Vec<CategoryKey>,
    /// Ranks handed out to keys outside `order`, in registration order.
    extra: Vec<CategoryKey>,
    entries: BTreeMap<usize, (CategoryKey, SectionEntry)>,
}

impl SectionRegistry {
    pub fn new<I>(order: I) -> Self
    where
        I: IntoIterator<Item = CategoryKey>,
    {
        Self {
            order: order.into_iter().collect(),
            extra: Vec::new(),
            entries: BTreeMap::new(),
        }
    }

    fn rank(&self, key: &CategoryKey) -> Option<usize> {
        self.order.iter().position(|k| k == key).or_else(|| {
            self.extra
                .iter()
                .position(|k| k == key)
                .map(|i| self.order.len() + i)
        })
    }

    /// Register (or replace) the nodes for `key`.
    pub fn register(&mut self, key: CategoryKey, section: NodeRef, hero: NodeRef) {
        let rank = match self.rank(&key) {
            Some(rank) => rank,
            None => {
                self.extra.push(key.clone());
                self.order.len() + self.extra.len() - 1
            }
        };
        self.entries.insert(rank, (key, SectionEntry { section, hero }));
    }

    /// Forget `key`.  Unknown keys are ignored.
    pub fn unregister(&mut self, key: &CategoryKey) {
        if let Some(rank) = self.rank(key) {
            self.entries.remove(&rank);
        }
    }

    pub fn get(&self, key: &CategoryKey) -> Option<SectionEntry> {
        let rank = self.rank(key)?;
        self.entries.get(&rank).map(|(_, entry)| *entry)
    }

    /// Registered sections in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, SectionEntry)> {
        self.entries.values().map(|(key, entry)| (key, *entry))
    }
}
