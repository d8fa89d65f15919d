//! # Vector-Map Data Model
//!
//! Clean DTOs shared by every operation in the crate: identifiers, feature
//! kinds, category attachments, and the caller-owned dense arrays (selection
//! mask, node back-map, node costs).
//!
//! Design rule: this module is pure data — no I/O, no collaborator traits,
//! no logging. Everything here is cheap to clone and serde-serializable.

pub mod ids;
pub mod feature;
pub mod selection;
pub mod costs;

pub use ids::{FeatureId, NodeId, Category};
pub use feature::{FeatureKind, CategoryList};
pub use selection::{Selection, NodeBackMap};
pub use costs::{NodeCosts, COST_SCALE, scale_cost};
