use std::collections::HashMap;

use compact_str::CompactString;

/// Insertion-ordered set of category names.
///
/// The position of a category is the order in which it was first seen; it
/// drives both the legend order and the palette slot of the color scale.
#[derive(Debug, Clone, Default)]
pub struct CategorySet {
    order: Vec<CompactString>,
    index: HashMap<CompactString, usize>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `category` if absent. Returns its position either way.
    pub fn insert(&mut self, category: &str) -> usize {
        if let Some(&pos) = self.index.get(category) {
            return pos;
        }
        let pos = self.order.len();
        let name = CompactString::new(category);
        self.order.push(name.clone());
        self.index.insert(name, pos);
        pos
    }

    pub fn position(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|c| c.as_str())
    }
}

impl<'a> FromIterator<&'a str> for CategorySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}
