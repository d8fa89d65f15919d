//! End-to-end tests for the selection resolver.
//!
//! Each test drives `resolve_selection` against `MemoryTopology` +
//! `MemoryAttributeSource` and checks the three-way outcome contract.

use vecnet_prep::{
    resolve_selection, Error, FeatureId, FeatureMask, FieldInfo, MemoryAttributeSource,
    MemoryTopology, SelectionOutcome,
};

/// Map with three categorized points (cats 1..3) and one line (cat 2),
/// all in layer 1 with a linked attribute table.
fn fixture() -> (MemoryTopology, MemoryAttributeSource) {
    let mut topo = MemoryTopology::new();
    let a = topo.add_node(0.0, 0.0, 0.0);
    let b = topo.add_node(1.0, 0.0, 0.0);
    let c = topo.add_node(2.0, 0.0, 0.0);
    topo.add_point(a, &[(1, 1)]); // feature 1
    topo.add_point(b, &[(1, 2)]); // feature 2
    topo.add_point(c, &[(1, 3)]); // feature 3
    topo.add_line(a, b, &[(1, 2)]); // feature 4
    topo.link_field(1, FieldInfo::new("sqlite", "map.db", "roads", "cat"));
    (topo, MemoryAttributeSource::new())
}

// ============================================================================
// 1. Three-way outcome: every (predicate, cats) combination
// ============================================================================

#[test]
fn test_outcome_is_exactly_one_of_three() {
    let (topo, mut attrs) = fixture();
    attrs.set_predicate_result("cost > 1", vec![2]);

    // Neither filter.
    let outcome = resolve_selection(&topo, &attrs, 1, FeatureMask::All, None, None).unwrap();
    assert!(matches!(outcome, SelectionOutcome::NotRequested));

    // Cats only.
    let outcome =
        resolve_selection(&topo, &attrs, 1, FeatureMask::All, None, Some("2")).unwrap();
    assert!(outcome.is_built());

    // Predicate only.
    let outcome =
        resolve_selection(&topo, &attrs, 1, FeatureMask::All, Some("cost > 1"), None)
            .unwrap();
    assert!(outcome.is_built());

    // Both: predicate wins, cats ignored.
    let outcome = resolve_selection(
        &topo,
        &attrs,
        1,
        FeatureMask::All,
        Some("cost > 1"),
        Some("1,3"),
    )
    .unwrap();
    let sel = outcome.into_selection().unwrap();
    assert!(!sel.is_selected(FeatureId(1)));
    assert!(sel.is_selected(FeatureId(2)));
    assert!(!sel.is_selected(FeatureId(3)));
    assert!(sel.is_selected(FeatureId(4)));
}

// ============================================================================
// 2. Scenario C: filter with layer = 0 is fatal, before any allocation
// ============================================================================

#[test]
fn test_category_expression_with_layer_zero_is_fatal() {
    let (topo, attrs) = fixture();
    let err = resolve_selection(&topo, &attrs, 0, FeatureMask::All, None, Some("1-3"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLayer { filter: "cats", layer: 0 }));
    assert!(err.is_fatal());
}

#[test]
fn test_predicate_with_negative_layer_is_fatal() {
    let (topo, attrs) = fixture();
    let err = resolve_selection(&topo, &attrs, -1, FeatureMask::All, Some("x = 1"), None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLayer { filter: "where", layer: -1 }));
    assert!(err.is_fatal());
}

// ============================================================================
// 3. Recoverable failures keep the failure/no-filter distinction
// ============================================================================

#[test]
fn test_failed_evaluation_is_distinct_from_no_filter() {
    let (topo, attrs) = fixture();

    // Unregistered predicate: the store cannot evaluate it.
    let outcome =
        resolve_selection(&topo, &attrs, 1, FeatureMask::All, Some("bogus"), None).unwrap();
    assert!(matches!(outcome, SelectionOutcome::EvaluationFailed(_)));

    // Unparseable category expression.
    let outcome =
        resolve_selection(&topo, &attrs, 1, FeatureMask::All, None, Some("3-1")).unwrap();
    assert!(matches!(outcome, SelectionOutcome::EvaluationFailed(_)));

    // No filter at all is a different signal.
    let outcome = resolve_selection(&topo, &attrs, 1, FeatureMask::All, None, None).unwrap();
    assert!(matches!(outcome, SelectionOutcome::NotRequested));
}

#[test]
fn test_store_faults_during_predicate_are_recoverable() {
    let (topo, mut attrs) = fixture();
    attrs.set_unreachable(true);

    // In selection resolution an unreachable database degrades to a
    // recoverable outcome; only cost building escalates it.
    let outcome =
        resolve_selection(&topo, &attrs, 1, FeatureMask::All, Some("cost > 1"), None)
            .unwrap();
    assert!(matches!(outcome, SelectionOutcome::EvaluationFailed(_)));
    assert_eq!(attrs.open_handles(), 0);
}

// ============================================================================
// 4. Mask application
// ============================================================================

#[test]
fn test_mask_limits_filter_to_requested_kinds() {
    let (topo, attrs) = fixture();

    let sel = resolve_selection(&topo, &attrs, 1, FeatureMask::Lines, None, Some("1-3"))
        .unwrap()
        .into_selection()
        .unwrap();
    assert!(!sel.is_selected(FeatureId(1)));
    assert!(!sel.is_selected(FeatureId(2)));
    assert!(!sel.is_selected(FeatureId(3)));
    assert!(sel.is_selected(FeatureId(4)));

    let sel = resolve_selection(&topo, &attrs, 1, FeatureMask::Points, None, Some("1-3"))
        .unwrap()
        .into_selection()
        .unwrap();
    assert_eq!(sel.count_selected(), 3);
    assert!(!sel.is_selected(FeatureId(4)));
}

// ============================================================================
// 5. Features without categories in the layer are never marked
// ============================================================================

#[test]
fn test_uncategorized_features_stay_unselected() {
    let mut topo = MemoryTopology::new();
    let n = topo.add_node(0.0, 0.0, 0.0);
    topo.add_point(n, &[]); // no category anywhere
    topo.add_point(n, &[(2, 1)]); // category in another layer
    topo.link_field(1, FieldInfo::new("sqlite", "map.db", "roads", "cat"));
    let attrs = MemoryAttributeSource::new();

    let sel = resolve_selection(&topo, &attrs, 1, FeatureMask::All, None, Some("1"))
        .unwrap()
        .into_selection()
        .unwrap();
    assert_eq!(sel.count_selected(), 0);
}
