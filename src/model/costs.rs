//! Dense node-cost array and the fixed cost scale.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Scale factor applied to floating-point attribute values before
/// truncation to integer cost units.
///
/// This matches the convention of the graph-construction consumer so edge
/// and node costs share units.
pub const COST_SCALE: f64 = 1_000_000.0;

/// Convert an attribute value to integer cost units: multiply by
/// [`COST_SCALE`] and truncate toward zero.
pub fn scale_cost(value: f64) -> i64 {
    (value * COST_SCALE) as i64
}

/// Dense `node id → integer cost` array, indexed by node id in
/// `[1, node_count]`.
///
/// Every slot is always initialized; nodes never touched by a categorized
/// point feature with a matching attribute row hold cost 0 by design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCosts {
    slots: Vec<i64>,
}

impl NodeCosts {
    /// All-zero cost array covering `node_count` nodes.
    pub fn new(node_count: u32) -> Self {
        Self { slots: vec![0; node_count as usize] }
    }

    pub fn node_count(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Reset every slot to 0.
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    pub fn get(&self, node: NodeId) -> i64 {
        self.slots[node.0 as usize - 1]
    }

    /// Store a cost, overwriting any previous value for the node.
    pub fn set(&mut self, node: NodeId, cost: i64) {
        self.slots[node.0 as usize - 1] = cost;
    }

    /// Slots in node-id order, for bulk handoff to the graph builder.
    pub fn as_slice(&self) -> &[i64] {
        &self.slots
    }
}
