//! Selection mask and node back-map.
//!
//! Both are dense, 1-based, caller-owned arrays sized from counts queried
//! off the topology at call time. Counts must not change between sizing and
//! use — this crate is a single-pass batch subsystem with no protection
//! against concurrent map mutation.

use serde::{Deserialize, Serialize};

use super::{FeatureId, NodeId};

/// Boolean-per-feature inclusion mask, indexed by feature id in
/// `[1, feature_count]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    flags: Vec<bool>,
}

impl Selection {
    /// All-false selection covering `feature_count` features.
    pub fn new(feature_count: u32) -> Self {
        Self { flags: vec![false; feature_count as usize] }
    }

    pub fn feature_count(&self) -> u32 {
        self.flags.len() as u32
    }

    /// Mark or unmark a feature. Panics if `id` is outside
    /// `[1, feature_count]`.
    pub fn set(&mut self, id: FeatureId, selected: bool) {
        self.flags[id.0 as usize - 1] = selected;
    }

    /// Whether a feature is marked. Panics if `id` is outside
    /// `[1, feature_count]`.
    pub fn is_selected(&self, id: FeatureId) -> bool {
        self.flags[id.0 as usize - 1]
    }

    /// Ids of all marked features, ascending.
    pub fn iter_selected(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, sel)| **sel)
            .map(|(i, _)| FeatureId(i as u32 + 1))
    }

    pub fn count_selected(&self) -> usize {
        self.flags.iter().filter(|sel| **sel).count()
    }
}

/// Dense node→originating-feature back-reference, indexed by node id in
/// `[1, node_count]`.
///
/// `None` means no selected feature touches the node. When several selected
/// features share a node the last one projected wins — a defined tie-break,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBackMap {
    entries: Vec<Option<FeatureId>>,
}

impl NodeBackMap {
    /// All-`None` map covering `node_count` nodes.
    pub fn new(node_count: u32) -> Self {
        Self { entries: vec![None; node_count as usize] }
    }

    pub fn node_count(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Record `feature` as the originating feature for `node`,
    /// unconditionally overwriting any prior assignment.
    pub fn set(&mut self, node: NodeId, feature: FeatureId) {
        self.entries[node.0 as usize - 1] = Some(feature);
    }

    pub fn get(&self, node: NodeId) -> Option<FeatureId> {
        self.entries[node.0 as usize - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_starts_all_false() {
        let sel = Selection::new(4);
        assert_eq!(sel.count_selected(), 0);
        assert!(!sel.is_selected(FeatureId(1)));
        assert!(!sel.is_selected(FeatureId(4)));
    }

    #[test]
    fn iter_selected_is_ascending() {
        let mut sel = Selection::new(5);
        sel.set(FeatureId(4), true);
        sel.set(FeatureId(2), true);
        let ids: Vec<_> = sel.iter_selected().collect();
        assert_eq!(ids, vec![FeatureId(2), FeatureId(4)]);
    }

    #[test]
    fn backmap_last_write_wins() {
        let mut map = NodeBackMap::new(3);
        map.set(NodeId(2), FeatureId(7));
        map.set(NodeId(2), FeatureId(9));
        assert_eq!(map.get(NodeId(2)), Some(FeatureId(9)));
        assert_eq!(map.get(NodeId(1)), None);
    }
}
