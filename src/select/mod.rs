//! # Selection Resolver
//!
//! Turns a user filter — a SQL-style predicate, a category expression, or
//! neither — into a boolean-per-feature [`Selection`].
//!
//! The outcome is deliberately three-way: a built selection, a recoverable
//! evaluation failure, or "no filter requested". Collapsing the last two
//! into one signal would lose information callers depend on, so
//! [`SelectionOutcome`] is a tagged enum and only fatal configuration
//! faults travel in the `Err` channel.

pub mod cats;

use tracing::warn;

use crate::attr::{AttributeSource, DriverGuard};
use crate::model::{Category, FeatureId, FeatureKind, Selection};
use crate::topology::Topology;
use crate::{Error, Result};

pub use cats::CatRanges;

// ============================================================================
// Mask-application mode
// ============================================================================

/// Which feature kinds a filter applies to. Features of other kinds are
/// never marked, whatever their categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureMask {
    Points,
    Lines,
    #[default]
    All,
}

impl FeatureMask {
    pub fn admits(self, kind: FeatureKind) -> bool {
        match self {
            FeatureMask::Points => kind == FeatureKind::Point,
            FeatureMask::Lines => kind == FeatureKind::Line,
            FeatureMask::All => true,
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of resolving a user filter.
///
/// Exactly one of three things happened: a selection was built, evaluation
/// failed recoverably, or no filter was requested in the first place.
/// Callers interpret `NotRequested` per their own policy ("select
/// everything" or "nothing to filter").
#[derive(Debug)]
pub enum SelectionOutcome {
    /// The filter evaluated; here is the selection.
    Built(Selection),
    /// The filter was present but could not be evaluated. The cause is
    /// attached; it was already surfaced as a warning.
    EvaluationFailed(Error),
    /// Neither a predicate nor a category expression was supplied.
    NotRequested,
}

impl SelectionOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, SelectionOutcome::Built(_))
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionOutcome::Built(sel) => Some(sel),
            _ => None,
        }
    }

    pub fn into_selection(self) -> Option<Selection> {
        match self {
            SelectionOutcome::Built(sel) => Some(sel),
            _ => None,
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolve a user filter into a selection over the map's features.
///
/// - `predicate` takes precedence: when both filters are supplied the
///   category expression is ignored with a warning.
/// - `layer` must be >= 1 whenever a filter is supplied — violating that is
///   a fatal configuration error, raised before anything is allocated.
/// - Store-side faults during predicate evaluation (missing layer link,
///   unopenable database, failed query) are recoverable here and come back
///   as [`SelectionOutcome::EvaluationFailed`]; contrast with cost
///   building, where an unopenable database escalates.
pub fn resolve_selection<T, A>(
    topo: &T,
    attrs: &A,
    layer: i32,
    mask: FeatureMask,
    predicate: Option<&str>,
    categories: Option<&str>,
) -> Result<SelectionOutcome>
where
    T: Topology,
    A: AttributeSource,
{
    if let Some(predicate) = predicate {
        if layer < 1 {
            return Err(Error::InvalidLayer { filter: "where", layer });
        }
        if categories.is_some() {
            warn!("both 'where' and 'cats' filters were supplied, 'cats' will be ignored");
        }
        match mark_by_predicate(topo, attrs, layer, mask, predicate) {
            Ok(selection) => Ok(SelectionOutcome::Built(selection)),
            Err(err) => {
                warn!(error = %err, "unable to load data from database");
                Ok(SelectionOutcome::EvaluationFailed(err))
            }
        }
    } else if let Some(expr) = categories {
        if layer < 1 {
            return Err(Error::InvalidLayer { filter: "cats", layer });
        }
        let ranges = match CatRanges::parse(expr) {
            Ok(ranges) => ranges,
            Err(err) => {
                warn!(error = %err, "problem loading category values");
                return Ok(SelectionOutcome::EvaluationFailed(err));
            }
        };
        Ok(SelectionOutcome::Built(mark_by_cats(topo, layer, mask, &ranges)?))
    } else {
        Ok(SelectionOutcome::NotRequested)
    }
}

fn mark_by_predicate<T, A>(
    topo: &T,
    attrs: &A,
    layer: i32,
    mask: FeatureMask,
    predicate: &str,
) -> Result<Selection>
where
    T: Topology,
    A: AttributeSource,
{
    let field = topo.layer_field(layer)?;
    let driver = DriverGuard::open(attrs, &field)?;
    let matching =
        attrs.select_categories(driver.handle(), &field.table, &field.key_column, predicate)?;
    let matching: hashbrown::HashSet<Category> = matching.into_iter().collect();

    let mut selection = Selection::new(topo.feature_count());
    for id in 1..=topo.feature_count() {
        let id = FeatureId(id);
        let info = topo.feature(id)?;
        if !mask.admits(info.kind) {
            continue;
        }
        if let Some(cat) = info.categories.get(layer) {
            if matching.contains(&cat) {
                selection.set(id, true);
            }
        }
    }
    Ok(selection)
}

fn mark_by_cats<T: Topology>(
    topo: &T,
    layer: i32,
    mask: FeatureMask,
    ranges: &CatRanges,
) -> Result<Selection> {
    let mut selection = Selection::new(topo.feature_count());
    for id in 1..=topo.feature_count() {
        let id = FeatureId(id);
        let info = topo.feature(id)?;
        if !mask.admits(info.kind) {
            continue;
        }
        if let Some(cat) = info.categories.get(layer) {
            if ranges.contains(cat) {
                selection.set(id, true);
            }
        }
    }
    Ok(selection)
}

// ============================================================================
// Point queries
// ============================================================================

/// All point features carrying a category in `layer` that falls within
/// `ranges`. The returned ids are ready for [`crate::points_to_nodes`].
pub fn points_by_category<T: Topology>(
    topo: &T,
    layer: i32,
    ranges: &CatRanges,
) -> Result<Vec<FeatureId>> {
    let mut points = Vec::new();
    for id in 1..=topo.feature_count() {
        let id = FeatureId(id);
        let info = topo.feature(id)?;
        if info.kind != FeatureKind::Point {
            continue;
        }
        if let Some(cat) = info.categories.get(layer) {
            if ranges.contains(cat) {
                points.push(id);
            }
        }
    }
    Ok(points)
}

// ============================================================================
// Tests
// ============================================================================
