//! The active category: the one value of the navigator other parts of the
//! page observe.

use super::catalog::CategoryKey;

/// Always holds one of the keys it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSelection {
    keys: Vec<CategoryKey>,
    active: usize,
}

impl ActiveSelection {
    /// Starts on the first key.  `None` if `keys` is empty.
    pub fn new(keys: Vec<CategoryKey>) -> Option<Self> {
        if keys.is_empty() {
            return None;
        }
        Some(Self { keys, active: 0 })
    }

    pub fn key(&self) -> &CategoryKey {
        &self.keys[self.active]
    }

    pub fn index(&self) -> usize {
        self.active
    }

    pub fn keys(&self) -> &[CategoryKey] {
        &self.keys
    }

    /// Switch to `key`.  Returns `true` if the selection changed; unknown
    /// keys are ignored.
    pub fn set(&mut self, key: &CategoryKey) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(index) if index != self.active => {
                self.active = index;
                true
            }
            _ => false,
        }
    }

    /// Key `delta` places away from the active one, clamped to the ends.
    pub fn neighbour(&self, delta: isize) -> &CategoryKey {
        let last = self.keys.len() - 1;
        let index = self.active.saturating_add_signed(delta).min(last);
        &self.keys[index]
    }
}
