//! # Node Projector
//!
//! Converts a feature selection, or a raw list of point-feature ids, into
//! graph node ids for the downstream graph builder.
//!
//! Node lists carry multiplicity: a node touched by two selected line
//! features appears twice, and a self-loop contributes its single node
//! twice. Deduplication is the caller's business.

use crate::model::{FeatureId, NodeBackMap, NodeId, Selection};
use crate::topology::Topology;
use crate::Result;

/// Nodes incident to all selected features, in feature-id order.
///
/// A selected point contributes its single node once; a selected line-like
/// feature contributes both endpoints (the same id twice for a self-loop).
pub fn nodes_from_selection<T: Topology>(
    topo: &T,
    selection: &Selection,
) -> Result<Vec<NodeId>> {
    let mut nodes = Vec::new();
    project(topo, selection, &mut nodes, None)?;
    Ok(nodes)
}

/// Like [`nodes_from_selection`], additionally producing a node→feature
/// back-map.
///
/// The back-map is freshly initialized to all-`None` and then populated
/// with the id of a selected feature incident to each listed node. When
/// several selected features share a node, the last one wins — a defined
/// tie-break, not an error.
pub fn nodes_from_selection_with_backmap<T: Topology>(
    topo: &T,
    selection: &Selection,
) -> Result<(Vec<NodeId>, NodeBackMap)> {
    let mut nodes = Vec::new();
    let mut backmap = NodeBackMap::new(topo.node_count());
    project(topo, selection, &mut nodes, Some(&mut backmap))?;
    Ok((nodes, backmap))
}

fn project<T: Topology>(
    topo: &T,
    selection: &Selection,
    nodes: &mut Vec<NodeId>,
    mut backmap: Option<&mut NodeBackMap>,
) -> Result<()> {
    for id in selection.iter_selected() {
        let (node1, node2) = topo.incident_nodes(id)?;
        nodes.push(node1);
        if let Some(map) = backmap.as_deref_mut() {
            map.set(node1, id);
        }
        // Line-like features contribute the second endpoint even when it
        // coincides with the first.
        if let Some(node2) = node2 {
            nodes.push(node2);
            if let Some(map) = backmap.as_deref_mut() {
                map.set(node2, id);
            }
        }
    }
    Ok(())
}

/// Node ids corresponding to a list of point-feature ids.
///
/// Precondition: every id must refer to a point feature. This is *not*
/// guarded — for a line-like feature the produced entry is unspecified (an
/// arbitrary incident node), matching the raw point-to-node rewrite the
/// graph builders expect.
pub fn points_to_nodes<T: Topology>(topo: &T, points: &[FeatureId]) -> Result<Vec<NodeId>> {
    points
        .iter()
        .map(|&id| topo.incident_nodes(id).map(|(node, _)| node))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Selection;
    use crate::topology::MemoryTopology;
    use proptest::prelude::*;

    /// nodes 1..=4; features: point on n1, line n2-n3, self-loop on n4.
    fn fixture() -> MemoryTopology {
        let mut topo = MemoryTopology::new();
        let n1 = topo.add_node(0.0, 0.0, 0.0);
        let n2 = topo.add_node(1.0, 0.0, 0.0);
        let n3 = topo.add_node(2.0, 0.0, 0.0);
        let n4 = topo.add_node(3.0, 0.0, 0.0);
        topo.add_point(n1, &[]); // feature 1
        topo.add_line(n2, n3, &[]); // feature 2
        topo.add_line(n4, n4, &[]); // feature 3
        topo
    }

    #[test]
    fn test_point_contributes_one_node() {
        let topo = fixture();
        let mut sel = Selection::new(topo.feature_count());
        sel.set(FeatureId(1), true);
        let nodes = nodes_from_selection(&topo, &sel).unwrap();
        assert_eq!(nodes, vec![NodeId(1)]);
    }

    #[test]
    fn test_line_contributes_both_endpoints() {
        let topo = fixture();
        let mut sel = Selection::new(topo.feature_count());
        sel.set(FeatureId(2), true);
        let nodes = nodes_from_selection(&topo, &sel).unwrap();
        assert_eq!(nodes, vec![NodeId(2), NodeId(3)]);
    }

    #[test]
    fn test_self_loop_contributes_node_twice() {
        let topo = fixture();
        let mut sel = Selection::new(topo.feature_count());
        sel.set(FeatureId(3), true);
        let nodes = nodes_from_selection(&topo, &sel).unwrap();
        assert_eq!(nodes, vec![NodeId(4), NodeId(4)]);
    }

    #[test]
    fn test_backmap_covers_listed_nodes_only() {
        let topo = fixture();
        let mut sel = Selection::new(topo.feature_count());
        sel.set(FeatureId(2), true);
        let (nodes, backmap) = nodes_from_selection_with_backmap(&topo, &sel).unwrap();
        assert_eq!(nodes, vec![NodeId(2), NodeId(3)]);
        assert_eq!(backmap.get(NodeId(2)), Some(FeatureId(2)));
        assert_eq!(backmap.get(NodeId(3)), Some(FeatureId(2)));
        assert_eq!(backmap.get(NodeId(1)), None);
        assert_eq!(backmap.get(NodeId(4)), None);
    }

    #[test]
    fn test_backmap_last_feature_wins_on_shared_node() {
        let mut topo = MemoryTopology::new();
        let a = topo.add_node(0.0, 0.0, 0.0);
        let b = topo.add_node(1.0, 0.0, 0.0);
        let c = topo.add_node(2.0, 0.0, 0.0);
        let f1 = topo.add_line(a, b, &[]);
        let f2 = topo.add_line(b, c, &[]);

        let mut sel = Selection::new(topo.feature_count());
        sel.set(f1, true);
        sel.set(f2, true);
        let (nodes, backmap) = nodes_from_selection_with_backmap(&topo, &sel).unwrap();
        assert_eq!(nodes, vec![a, b, b, c]);
        assert_eq!(backmap.get(a), Some(f1));
        assert_eq!(backmap.get(b), Some(f2));
        assert_eq!(backmap.get(c), Some(f2));
    }

    #[test]
    fn test_points_to_nodes_maps_in_order() {
        let mut topo = MemoryTopology::new();
        let n1 = topo.add_node(0.0, 0.0, 0.0);
        let n2 = topo.add_node(1.0, 0.0, 0.0);
        let p1 = topo.add_point(n1, &[]);
        let p2 = topo.add_point(n2, &[]);

        let nodes = points_to_nodes(&topo, &[p2, p1, p2]).unwrap();
        assert_eq!(nodes, vec![n2, n1, n2]);
    }

    proptest! {
        /// Every selected point adds exactly one entry, every selected
        /// line exactly two, and order follows feature id.
        #[test]
        fn prop_multiplicity_matches_selection(flags in prop::collection::vec(any::<bool>(), 3)) {
            let topo = fixture();
            let mut sel = Selection::new(topo.feature_count());
            for (i, &on) in flags.iter().enumerate() {
                sel.set(FeatureId(i as u32 + 1), on);
            }
            let nodes = nodes_from_selection(&topo, &sel).unwrap();

            let expected: usize = flags
                .iter()
                .enumerate()
                .map(|(i, &on)| if !on { 0 } else if i == 0 { 1 } else { 2 })
                .sum();
            prop_assert_eq!(nodes.len(), expected);
        }
    }
}
