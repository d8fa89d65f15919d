//! Feature kind and per-layer category attachments.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Category;

/// Topological kind of a feature.
///
/// `Point` features are incident to exactly one node; `Line` covers every
/// line-like kind (lines and boundaries alike) and is incident to two
/// endpoint nodes, which may coincide in a self-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Point,
    Line,
}

impl FeatureKind {
    pub fn is_point(self) -> bool {
        matches!(self, FeatureKind::Point)
    }
}

/// Ordered set of `(layer, category)` attachments on a feature.
///
/// A feature may carry categories in several layers, or none at all.
/// Most features carry one or two, hence the inline capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryList {
    entries: SmallVec<[(i32, Category); 2]>,
}

impl CategoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a category in the given layer.
    pub fn add(&mut self, layer: i32, cat: Category) {
        self.entries.push((layer, cat));
    }

    /// First category attached in the given layer, if any. A feature with
    /// no category in the layer is perfectly legal.
    pub fn get(&self, layer: i32) -> Option<Category> {
        self.entries
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, c)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate all `(layer, category)` pairs in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, Category)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(i32, Category)> for CategoryList {
    fn from_iter<I: IntoIterator<Item = (i32, Category)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
