//! # Point-Injection Helper
//!
//! Materializes a graph node as a real point feature in an output store,
//! used when exporting graph-node representations for visualization. No
//! selection or cost logic lives here — it is a coordinate-copy-and-write.

use crate::model::{CategoryList, FeatureKind, NodeId};
use crate::topology::Topology;
use crate::{Error, Result};

// ============================================================================
// Geometry buffer
// ============================================================================

/// Reusable coordinate buffer passed to a [`FeatureSink`] write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    points: Vec<(f64, f64, f64)>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all coordinates, keeping the allocation.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    pub fn append(&mut self, x: f64, y: f64, z: f64) {
        self.points.push((x, y, z));
    }

    pub fn points(&self) -> &[(f64, f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ============================================================================
// FeatureSink Trait
// ============================================================================

/// Write access to an output feature store.
///
/// Only the single operation this crate needs is defined; full output
/// writing belongs to the vector engine.
pub trait FeatureSink {
    /// Append a feature of the given kind with the given geometry and
    /// categories.
    fn write(&mut self, kind: FeatureKind, geometry: &Geometry, cats: &CategoryList)
        -> Result<()>;
}

// ============================================================================
// Helper
// ============================================================================

/// Write one point feature into `out` at the coordinates of `node`,
/// carrying `cats` verbatim.
///
/// The scratch geometry is scoped to this call and fully released on every
/// path. Sink faults propagate unchanged.
pub fn add_point_on_node<T, S>(
    topo: &T,
    out: &mut S,
    node: NodeId,
    cats: &CategoryList,
) -> Result<()>
where
    T: Topology,
    S: FeatureSink,
{
    let (x, y, z) = topo.node_coordinates(node)?;
    let mut geometry = Geometry::new();
    geometry.append(x, y, z);
    out.write(FeatureKind::Point, &geometry, cats)
}

// ============================================================================
// MemorySink
// ============================================================================

/// In-memory output store collecting written features, for testing and
/// embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    written: Vec<(FeatureKind, Geometry, CategoryList)>,
    failing: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail, to exercise fault propagation.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn written(&self) -> &[(FeatureKind, Geometry, CategoryList)] {
        &self.written
    }
}

impl FeatureSink for MemorySink {
    fn write(
        &mut self,
        kind: FeatureKind,
        geometry: &Geometry,
        cats: &CategoryList,
    ) -> Result<()> {
        if self.failing {
            return Err(Error::Write("simulated sink failure".into()));
        }
        self.written.push((kind, geometry.clone(), cats.clone()));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
