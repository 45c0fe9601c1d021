/// Key selection helpers: include, exclude, rename, occurrence counts and
/// required-key checks.
use serde_json::{json, Value};
use treechain_core::select::{
    check_required_keys, count_occurrences, exclude_keys, include_keys, rename_key, Target,
};
use treechain_core::{ChainError, Mapping, Node, Scalar};

fn mapping(value: Value) -> Mapping {
    match Node::from(value) {
        Node::Mapping(map) => map,
        other => panic!("expected a mapping, got {}", other.kind()),
    }
}

fn node(value: Value) -> Node {
    Node::from(value)
}

// ============================================================================
// Include / exclude
// ============================================================================

#[test]
fn include_keeps_listed_keys_in_original_order() {
    let map = mapping(json!({"a": 1, "b": 2, "c": 3}));
    assert_eq!(include_keys(&map, &["c", "a"]), mapping(json!({"a": 1, "c": 3})));
}

#[test]
fn include_ignores_unknown_keys() {
    let map = mapping(json!({"a": 1}));
    assert_eq!(include_keys(&map, &["zz"]), Mapping::new());
}

#[test]
fn exclude_drops_listed_keys() {
    let map = mapping(json!({"a": 1, "b": 2, "c": 3}));
    assert_eq!(exclude_keys(&map, &["b"]), mapping(json!({"a": 1, "c": 3})));
}

#[test]
fn include_and_exclude_match_index_keys() {
    let map = mapping(json!({"0": "zero", "name": "n"}));
    assert_eq!(include_keys(&map, &["0"]), mapping(json!({"0": "zero"})));
    assert_eq!(exclude_keys(&map, &["0"]), mapping(json!({"name": "n"})));
}

// ============================================================================
// Rename
// ============================================================================

#[test]
fn rename_moves_value_to_end() {
    let map = mapping(json!({"a": 1, "b": 2, "c": 3}));
    assert_eq!(rename_key(&map, "a", "z"), mapping(json!({"b": 2, "c": 3, "z": 1})));
}

#[test]
fn rename_onto_existing_key_overwrites_in_place() {
    let map = mapping(json!({"a": 1, "b": 2, "c": 3}));
    assert_eq!(rename_key(&map, "c", "a"), mapping(json!({"a": 3, "b": 2})));
}

#[test]
fn rename_of_absent_key_is_noop() {
    let map = mapping(json!({"a": 1}));
    assert_eq!(rename_key(&map, "missing", "z"), map);
}

#[test]
fn rename_of_null_value_is_noop() {
    let map = mapping(json!({"a": null, "b": 1}));
    assert_eq!(rename_key(&map, "a", "z"), map);
}

// ============================================================================
// Occurrence counting
// ============================================================================

#[test]
fn counts_values_recursively() {
    let tree = node(json!({"a": "x", "b": {"c": "x", "d": ["x", "y"]}}));
    assert_eq!(count_occurrences(&tree, &Scalar::Str("x".into()), Target::Values), 3);
}

#[test]
fn counts_keys_of_leaves_only() {
    let tree = node(json!({"id": 1, "child": {"id": 2, "list": {"id": {"deep": 0}}}}));
    assert_eq!(count_occurrences(&tree, &Scalar::Str("id".into()), Target::Keys), 2);
}

#[test]
fn counting_is_loose_for_numbers() {
    let tree = node(json!([1, "1", 1.0, "01", 2]));
    assert_eq!(count_occurrences(&tree, &Scalar::Int(1), Target::Values), 4);
}

#[test]
fn counting_booleans_uses_truthiness() {
    let tree = node(json!([true, 1, "yes", 0, "", null]));
    assert_eq!(count_occurrences(&tree, &Scalar::Bool(true), Target::Values), 3);
    assert_eq!(count_occurrences(&tree, &Scalar::Bool(false), Target::Values), 3);
}

#[test]
fn counting_on_scalar_root_is_zero() {
    assert_eq!(count_occurrences(&node(json!(1)), &Scalar::Int(1), Target::Values), 0);
}

#[test]
fn counting_in_nested_sequences() {
    let tree = node(json!([0, 0, [0, 1]]));
    assert_eq!(count_occurrences(&tree, &Scalar::Int(0), Target::Values), 3);
    assert_eq!(count_occurrences(&tree, &Scalar::Int(0), Target::Keys), 2);
}

// ============================================================================
// Required keys
// ============================================================================

#[test]
fn required_keys_present() {
    let tree = node(json!({"user": "u", "pass": "p", "extra": 1}));
    assert!(check_required_keys(&["user", "pass"], &tree).is_ok());
}

#[test]
fn required_key_with_null_value_counts_as_present() {
    let tree = node(json!({"user": null}));
    assert!(check_required_keys(&["user"], &tree).is_ok());
}

#[test]
fn missing_required_keys_are_all_reported_in_order() {
    let tree = node(json!({"user": "u"}));
    match check_required_keys(&["token", "user", "scope"], &tree).unwrap_err() {
        ChainError::MissingRequiredKeys { missing } => assert_eq!(missing, ["token", "scope"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn required_keys_only_checks_top_level() {
    let tree = node(json!({"outer": {"inner": 1}}));
    assert!(check_required_keys(&["inner"], &tree).is_err());
}

#[test]
fn required_keys_on_sequence_use_indexes() {
    let tree = node(json!(["a", "b"]));
    assert!(check_required_keys(&["0", "1"], &tree).is_ok());
    assert!(check_required_keys(&["2"], &tree).is_err());
}

#[test]
fn required_keys_on_scalar_root_fails() {
    assert!(matches!(
        check_required_keys(&["a"], &node(json!(5))),
        Err(ChainError::InvalidRootKind { found: "integer" })
    ));
}
