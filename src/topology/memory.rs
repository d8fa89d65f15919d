//! In-memory topology accessor.
//!
//! This is the reference implementation of [`Topology`]. It holds nodes,
//! features, and layer links in plain vectors and maps.
//!
//! ## Limitations
//!
//! - **Build-then-read**: the `add_*` methods are for constructing a map
//!   before handing it to the preparation operations. There is no
//!   geometry validation and no spatial index — endpoints are whatever
//!   node ids the builder supplies.
//!
//! Use this accessor for:
//! - Testing the selection, projection, and cost operations
//! - Embedding vecnet-prep in applications without the external engine

use hashbrown::HashMap;

use crate::attr::FieldInfo;
use crate::model::{Category, CategoryList, FeatureId, FeatureKind, NodeId};
use crate::{Error, Result};

use super::{FeatureInfo, Topology};

// ============================================================================
// MemoryTopology
// ============================================================================

/// In-memory topological vector map.
#[derive(Debug, Default)]
pub struct MemoryTopology {
    nodes: Vec<(f64, f64, f64)>,
    features: Vec<StoredFeature>,
    /// layer → attribute-table link
    fields: HashMap<i32, FieldInfo>,
}

#[derive(Debug)]
struct StoredFeature {
    kind: FeatureKind,
    categories: CategoryList,
    node1: NodeId,
    node2: Option<NodeId>,
}

impl MemoryTopology {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Build API
    // ========================================================================

    /// Add a node at the given coordinates, returning its 1-based id.
    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
        self.nodes.push((x, y, z));
        NodeId(self.nodes.len() as u32)
    }

    /// Add a point feature on an existing node with `(layer, category)`
    /// attachments. Panics if the node does not exist.
    pub fn add_point(&mut self, node: NodeId, cats: &[(i32, i32)]) -> FeatureId {
        assert!(self.node_exists(node), "point references unknown node {node}");
        self.push_feature(StoredFeature {
            kind: FeatureKind::Point,
            categories: Self::cats_from(cats),
            node1: node,
            node2: None,
        })
    }

    /// Add a line-like feature between two existing nodes (which may
    /// coincide for a self-loop). Panics if either node does not exist.
    pub fn add_line(&mut self, from: NodeId, to: NodeId, cats: &[(i32, i32)]) -> FeatureId {
        assert!(self.node_exists(from), "line references unknown node {from}");
        assert!(self.node_exists(to), "line references unknown node {to}");
        self.push_feature(StoredFeature {
            kind: FeatureKind::Line,
            categories: Self::cats_from(cats),
            node1: from,
            node2: Some(to),
        })
    }

    /// Link an attribute table to a layer.
    pub fn link_field(&mut self, layer: i32, field: FieldInfo) {
        self.fields.insert(layer, field);
    }

    fn push_feature(&mut self, feature: StoredFeature) -> FeatureId {
        self.features.push(feature);
        FeatureId(self.features.len() as u32)
    }

    fn node_exists(&self, node: NodeId) -> bool {
        node.0 >= 1 && (node.0 as usize) <= self.nodes.len()
    }

    fn cats_from(cats: &[(i32, i32)]) -> CategoryList {
        cats.iter().map(|&(layer, cat)| (layer, Category(cat))).collect()
    }

    fn stored(&self, id: FeatureId) -> Result<&StoredFeature> {
        if id.0 < 1 {
            return Err(Error::FeatureNotFound(id));
        }
        self.features
            .get(id.0 as usize - 1)
            .ok_or(Error::FeatureNotFound(id))
    }
}

// ============================================================================
// Topology impl
// ============================================================================

impl Topology for MemoryTopology {
    fn feature_count(&self) -> u32 {
        self.features.len() as u32
    }

    fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    fn feature(&self, id: FeatureId) -> Result<FeatureInfo> {
        let stored = self.stored(id)?;
        Ok(FeatureInfo {
            kind: stored.kind,
            categories: stored.categories.clone(),
        })
    }

    fn incident_nodes(&self, id: FeatureId) -> Result<(NodeId, Option<NodeId>)> {
        let stored = self.stored(id)?;
        Ok((stored.node1, stored.node2))
    }

    fn node_coordinates(&self, node: NodeId) -> Result<(f64, f64, f64)> {
        if node.0 < 1 {
            return Err(Error::NodeNotFound(node));
        }
        self.nodes
            .get(node.0 as usize - 1)
            .copied()
            .ok_or(Error::NodeNotFound(node))
    }

    fn layer_field(&self, layer: i32) -> Result<FieldInfo> {
        self.fields.get(&layer).cloned().ok_or(Error::NoField(layer))
    }
}

// ============================================================================
// Tests
// ============================================================================
