//! # Topology Accessor Trait
//!
//! This is the contract between vecnet-prep and the vector-topology engine
//! that owns feature and node storage. The engine itself (geometry, spatial
//! index, persistence) is out of scope; every operation this crate needs
//! from it is defined here.
//!
//! ## Implementations
//!
//! | Accessor | Module | Description |
//! |----------|--------|-------------|
//! | `MemoryTopology` | `memory` | In-memory map for testing/embedding |

pub mod memory;

use crate::attr::FieldInfo;
use crate::model::{CategoryList, FeatureId, FeatureKind, NodeId};
use crate::Result;

pub use memory::MemoryTopology;

// ============================================================================
// Feature read result
// ============================================================================

/// What a single feature read yields: the feature's kind and its category
/// attachments.
///
/// This lightweight type lives in the topology layer so `feature()` can
/// return structured data without importing from the selection module.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInfo {
    pub kind: FeatureKind,
    pub categories: CategoryList,
}

// ============================================================================
// Topology Trait
// ============================================================================

/// Read access to a topological vector map.
///
/// The map is immutable for the duration of any operation in this crate:
/// callers size selection and cost arrays from `feature_count()` /
/// `node_count()` and the counts must not change before the arrays are
/// used. Single-threaded batch use is assumed throughout.
pub trait Topology {
    // ========================================================================
    // Counts
    // ========================================================================

    /// Number of features in the map. Feature ids run `1..=feature_count`.
    fn feature_count(&self) -> u32;

    /// Number of topology nodes. Node ids run `1..=node_count`.
    fn node_count(&self) -> u32;

    // ========================================================================
    // Feature access
    // ========================================================================

    /// Read a feature: its kind and category attachments.
    fn feature(&self, id: FeatureId) -> Result<FeatureInfo>;

    /// Nodes incident to a feature.
    ///
    /// A point feature yields `(node, None)`; a line-like feature yields
    /// both endpoints, which coincide for a self-loop.
    fn incident_nodes(&self, id: FeatureId) -> Result<(NodeId, Option<NodeId>)>;

    // ========================================================================
    // Node access
    // ========================================================================

    /// Coordinates of a node as `(x, y, z)`.
    fn node_coordinates(&self, node: NodeId) -> Result<(f64, f64, f64)>;

    // ========================================================================
    // Layer configuration
    // ========================================================================

    /// Attribute-table link for a layer.
    ///
    /// Returns the fatal [`crate::Error::NoField`] when the layer has no
    /// linked table — an operation that needs attributes cannot proceed
    /// without one.
    fn layer_field(&self, layer: i32) -> Result<FieldInfo>;
}
