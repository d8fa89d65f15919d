//! # vecnet-prep — Network-Analysis Input Preparation
//!
//! Prepares the inputs a graph-analysis pipeline needs from a topological
//! vector map: maps features to graph nodes, derives a filtered feature
//! selection, and joins per-feature categories against an attribute column
//! to produce a dense node-cost array.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Topology`, `AttributeSource`, and `FeatureSink` are
//!    the contracts between this crate and the vector engine / database
//!    driver / output writer it collaborates with
//! 2. **Clean DTOs**: `Selection`, `NodeBackMap`, `NodeCosts` cross all
//!    boundaries — pure data, no I/O
//! 3. **Three-way selection outcome**: built / evaluation-failed /
//!    not-requested are a tagged enum, never a boolean plus a null
//! 4. **Fatal vs recoverable**: configuration faults (bad layer, unreachable
//!    database) and data faults (failed query, bad expression) are distinct
//!    error kinds — see [`Error::is_fatal`]
//!
//! ## Quick Start
//!
//! ```rust
//! use vecnet_prep::{
//!     MemoryTopology, MemoryAttributeSource, FieldInfo,
//!     build_node_costs, NodeCosts, Topology,
//! };
//!
//! # fn example() -> vecnet_prep::Result<()> {
//! let mut topo = MemoryTopology::new();
//! let n = topo.add_node(1.0, 2.0, 0.0);
//! topo.add_point(n, &[(1, 7)]);
//! topo.link_field(1, FieldInfo::new("sqlite", "map.db", "roads", "cat"));
//!
//! let mut attrs = MemoryAttributeSource::new();
//! attrs.insert("roads", "cost", 7, 0.5);
//!
//! let mut costs = NodeCosts::new(topo.node_count());
//! build_node_costs(&topo, &attrs, 1, "cost", &mut costs)?;
//! assert_eq!(costs.get(n), 500_000);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Collaborators
//!
//! | Trait | Module | Role |
//! |-------|--------|------|
//! | `Topology` | `topology` | Feature/node read access to the vector map |
//! | `AttributeSource` | `attr` | Bulk category→value fetch from the attribute table |
//! | `FeatureSink` | `output` | Point-feature writing into an output store |
//!
//! Reference in-memory implementations of all three ship with the crate for
//! testing and embedding without the external engine.

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod topology;
pub mod attr;
pub mod select;
pub mod project;
pub mod cost;
pub mod output;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    FeatureId, NodeId, Category, FeatureKind, CategoryList,
    Selection, NodeBackMap, NodeCosts, COST_SCALE,
};

// ============================================================================
// Re-exports: Collaborator traits and reference implementations
// ============================================================================

pub use topology::{Topology, MemoryTopology};
pub use attr::{
    AttributeSource, FieldInfo, CatValueMap, DriverGuard, MemoryAttributeSource,
};
pub use output::{FeatureSink, Geometry, MemorySink};

// ============================================================================
// Re-exports: Entry points
// ============================================================================

pub use select::{
    resolve_selection, points_by_category, CatRanges, FeatureMask, SelectionOutcome,
};
pub use project::{
    nodes_from_selection, nodes_from_selection_with_backmap, points_to_nodes,
};
pub use cost::build_node_costs;
pub use output::add_point_on_node;

// ============================================================================
// Error Types
// ============================================================================

/// Crate-wide error type.
///
/// Variants fall into three tiers, and callers depend on the tiers staying
/// distinct:
///
/// - **Fatal configuration faults** ([`Error::is_fatal`] returns true):
///   the invocation cannot proceed meaningfully. An invalid layer for a
///   filter, a layer with no linked attribute table, or an unreachable
///   database are environment problems, not data problems.
/// - **Recoverable data faults**: a predicate or category expression that
///   fails to evaluate, or a bulk fetch that fails. Callers may proceed
///   with an empty or default result.
/// - **Access faults**: a feature or node id that does not exist, or a
///   sink write failure — ordinary propagated errors.
///
/// Expected absence (a feature with no category in a layer, a category with
/// no attribute row) is *not* an error at all; those cases resolve by
/// policy (skip, default to zero) inside the operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fatal: a filter was given but the layer cannot carry one.
    #[error("layer must be >= 1 when '{filter}' is given, got {layer}")]
    InvalidLayer { filter: &'static str, layer: i32 },

    /// Fatal: the layer has no attribute table linked to it.
    #[error("no attribute table linked to layer {0}")]
    NoField(i32),

    /// Fatal: the attribute database could not be opened.
    #[error("unable to open database <{database}> by driver <{driver}>")]
    DatabaseOpen { driver: String, database: String },

    /// Recoverable: a predicate evaluation or bulk fetch failed.
    #[error("unable to load data from database: {0}")]
    AttributeQuery(String),

    /// Recoverable: a category expression could not be parsed.
    #[error("invalid category expression '{expr}': {message}")]
    CategoryExpression { expr: String, message: String },

    #[error("feature {0} not found")]
    FeatureNotFound(FeatureId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("output write failed: {0}")]
    Write(String),
}

impl Error {
    /// True for configuration/environment faults that abort the whole
    /// invocation; false for data faults a caller may recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InvalidLayer { .. } | Error::NoField(_) | Error::DatabaseOpen { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
