//! Selection and hover registry.
//!
//! A plain set/CRUD surface: membership of selected keys plus at most one
//! hovered key. The two are independent; a hovered key may or may not be
//! selected. Toggle and click policy live in the interaction controller.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

use crate::element::ElementKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<ElementKey>,
    hovered: Option<ElementKey>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` to the selection. Idempotent.
    pub fn select(&mut self, key: ElementKey) {
        self.selected.insert(key);
    }

    /// Replace the selection wholesale.
    pub fn select_multiple<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = ElementKey>,
    {
        self.selected = keys.into_iter().collect();
    }

    /// Remove `key` if present. Absent keys are a no-op.
    pub fn deselect(&mut self, key: &ElementKey) {
        self.selected.remove(key);
    }

    /// Empty the selection. Hover is left alone.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the hovered key unconditionally.
    pub fn set_hovered(&mut self, key: Option<ElementKey>) {
        self.hovered = key;
    }

    #[must_use]
    pub fn is_selected(&self, key: &ElementKey) -> bool {
        self.selected.contains(key)
    }

    #[must_use]
    pub fn selected_keys(&self) -> &HashSet<ElementKey> {
        &self.selected
    }

    #[must_use]
    pub fn hovered_key(&self) -> Option<ElementKey> {
        self.hovered
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
