//! # Node Cost Builder
//!
//! Joins point-feature categories against an attribute column to populate
//! a dense `node id → integer cost` array covering every node in the map.
//!
//! Cost policy, preserved as documented invariants:
//! - Every slot is zeroed before any lookup. A node with no point feature,
//!   a point with no category in the layer, and a category with no
//!   attribute row all resolve to cost 0 — by design, not as errors.
//! - Attribute values are scaled by [`COST_SCALE`](crate::COST_SCALE) and
//!   truncated toward zero, sharing units with the graph builder's edge
//!   costs.
//! - Last write wins if several categorized points share a node.

use tracing::debug;

use crate::attr::{AttributeSource, DriverGuard};
use crate::model::{scale_cost, FeatureId, NodeCosts};
use crate::topology::Topology;
use crate::Result;

/// Populate `costs` with the scaled value of `column` for every node
/// carrying a categorized point feature in `layer`.
///
/// `costs` must be caller-sized to the topology's current node count.
///
/// Failure asymmetry, deliberate: a layer with no linked table or a
/// database that cannot be opened is a fatal configuration fault
/// ([`Error::is_fatal`](crate::Error::is_fatal)); a failed bulk fetch is a
/// recoverable data fault that leaves the array all-zero. The driver
/// handle is closed on every exit path.
pub fn build_node_costs<T, A>(
    topo: &T,
    attrs: &A,
    layer: i32,
    column: &str,
    costs: &mut NodeCosts,
) -> Result<()>
where
    T: Topology,
    A: AttributeSource,
{
    debug_assert_eq!(
        costs.node_count(),
        topo.node_count(),
        "cost array must be sized to the map's node count"
    );

    let field = topo.layer_field(layer)?;
    let driver = DriverGuard::open(attrs, &field)?;

    costs.reset();

    // One bulk fetch for the whole column; a failure here is
    // whole-operation, leaving the zeroed array untouched.
    let values = attrs.select_values(
        driver.handle(),
        &field.table,
        &field.key_column,
        column,
        None,
    )?;
    debug!(layer, column, rows = values.len(), "fetched cost column");

    for id in 1..=topo.feature_count() {
        let id = FeatureId(id);
        let info = topo.feature(id)?;
        if !info.kind.is_point() {
            continue;
        }
        // A point without a category in the layer is legal; skip.
        let Some(cat) = info.categories.get(layer) else {
            continue;
        };
        let (node, _) = topo.incident_nodes(id)?;
        // A category without an attribute row is legal too; the node
        // keeps its zero.
        if let Some(value) = values.lookup(cat) {
            costs.set(node, scale_cost(value));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
