/// Chain-addressed get/set/unset on mapping roots.
///
/// Covers intermediate creation, refusal to descend through scalars, sequence
/// element addressing and the separator-taking `*_by_chain` forms.
use serde_json::{json, Value};
use treechain_core::access::{get, get_by_chain, set, set_by_chain, unset, unset_by_chain};
use treechain_core::{Chain, ChainError, Key, Mapping, Node};

fn node(value: Value) -> Node {
    Node::from(value)
}

fn chain(text: &str) -> Chain {
    Chain::parse(text, ':')
}

// ============================================================================
// get
// ============================================================================

#[test]
fn get_nested_value() {
    let root = node(json!({"lvl_1": {"lvl_2": {"lvl_3": "val"}}}));
    assert_eq!(get(&root, &chain("lvl_1:lvl_2:lvl_3")).unwrap(), Some(&node(json!("val"))));
}

#[test]
fn get_missing_final_segment_is_none() {
    let root = node(json!({"lvl_1": {"lvl_2": {"lvl_3": "val"}}}));
    assert_eq!(get(&root, &chain("lvl_1:lvl_2:lvl_4")).unwrap(), None);
}

#[test]
fn get_missing_intermediate_is_none() {
    let root = node(json!({"a": {"b": 1}}));
    assert_eq!(get(&root, &chain("x:b")).unwrap(), None);
}

#[test]
fn get_through_scalar_is_none() {
    let root = node(json!({"a": "text"}));
    assert_eq!(get(&root, &chain("a:b")).unwrap(), None);
}

#[test]
fn get_single_segment() {
    let root = node(json!({"a": 1}));
    assert_eq!(get(&root, &chain("a")).unwrap(), Some(&node(json!(1))));
}

#[test]
fn get_returns_subtree() {
    let root = node(json!({"a": {"b": {"c": 1}}}));
    assert_eq!(get(&root, &chain("a:b")).unwrap(), Some(&node(json!({"c": 1}))));
}

#[test]
fn get_indexes_into_sequences() {
    let root = node(json!({"list": ["x", {"deep": true}]}));
    assert_eq!(get(&root, &chain("list:0")).unwrap(), Some(&node(json!("x"))));
    assert_eq!(get(&root, &chain("list:1:deep")).unwrap(), Some(&node(json!(true))));
    assert_eq!(get(&root, &chain("list:2")).unwrap(), None);
}

#[test]
fn get_present_null_is_some() {
    let root = node(json!({"a": null}));
    assert_eq!(get(&root, &chain("a")).unwrap(), Some(&Node::null()));
}

#[test]
fn get_on_sequence_root_fails() {
    let root = node(json!(["a"]));
    let err = get(&root, &chain("0")).unwrap_err();
    assert!(matches!(err, ChainError::InvalidRootKind { found: "sequence" }));
}

#[test]
fn get_on_scalar_root_fails() {
    let err = get(&node(json!(3)), &chain("a")).unwrap_err();
    assert!(matches!(err, ChainError::InvalidRootKind { found: "integer" }));
}

#[test]
fn get_with_empty_chain_fails() {
    let root = node(json!({"a": 1}));
    assert!(matches!(get(&root, &Chain::new()), Err(ChainError::EmptyChain)));
}

#[test]
fn chains_reach_integer_spelled_name_keys() {
    let map: Mapping = [(Key::Name("1".into()), node(json!({"b": 2})))].into_iter().collect();
    let mut root = Node::from(map);
    assert_eq!(get(&root, &chain("1:b")).unwrap(), Some(&node(json!(2))));
    set(&mut root, &chain("1:c"), node(json!(3))).unwrap();
    unset(&mut root, &chain("1:b")).unwrap();
    assert_eq!(root, node(json!({"1": {"c": 3}})));
}

#[test]
fn get_by_chain_honours_separator() {
    let root = node(json!({"a": {"b:c": 1, "b": {"c": 2}}}));
    assert_eq!(get_by_chain(&root, "a.b:c", '.').unwrap(), Some(&node(json!(1))));
    assert_eq!(get_by_chain(&root, "a:b:c", ':').unwrap(), Some(&node(json!(2))));
}

// ============================================================================
// set
// ============================================================================

#[test]
fn set_into_empty_root_creates_intermediates() {
    let mut root = node(json!({}));
    set(&mut root, &chain("lvl_1:lvl_2:lvl_3"), node(json!("val"))).unwrap();
    assert_eq!(root, node(json!({"lvl_1": {"lvl_2": {"lvl_3": "val"}}})));
}

#[test]
fn set_adds_named_key_beside_list_items() {
    let mut root = node(json!({"lvl_1": {"lvl_1_1": ["val_1"], "lvl_1_2": ["val_2"]}}));
    set(&mut root, &chain("lvl_1:lvl_1_2:lvl_1_2_1"), node(json!("set_val"))).unwrap();

    assert_eq!(
        get(&root, &chain("lvl_1:lvl_1_2:lvl_1_2_1")).unwrap(),
        Some(&node(json!("set_val")))
    );
    assert_eq!(
        root,
        node(json!({"lvl_1": {
            "lvl_1_1": ["val_1"],
            "lvl_1_2": {"0": "val_2", "lvl_1_2_1": "set_val"}
        }}))
    );
}

#[test]
fn set_overwrites_existing_value() {
    let mut root = node(json!({"a": {"b": 1}}));
    set(&mut root, &chain("a:b"), node(json!(2))).unwrap();
    assert_eq!(root, node(json!({"a": {"b": 2}})));
}

#[test]
fn set_overwrite_keeps_key_position() {
    let mut root = node(json!({"a": 1, "b": 2, "c": 3}));
    set(&mut root, &chain("b"), node(json!(20))).unwrap();
    assert_eq!(root, node(json!({"a": 1, "b": 20, "c": 3})));
}

#[test]
fn set_replaces_subtree_at_final_segment() {
    let mut root = node(json!({"a": {"b": {"c": 1}}}));
    set(&mut root, &chain("a:b"), node(json!("flat"))).unwrap();
    assert_eq!(root, node(json!({"a": {"b": "flat"}})));
}

#[test]
fn set_replaces_null_intermediate() {
    let mut root = node(json!({"a": null}));
    set(&mut root, &chain("a:b"), node(json!(1))).unwrap();
    assert_eq!(root, node(json!({"a": {"b": 1}})));
}

#[test]
fn set_refuses_to_descend_through_scalar() {
    let mut root = node(json!({"a": {"b": 0}}));
    let err = set(&mut root, &chain("a:b:c"), node(json!(1))).unwrap_err();
    match err {
        ChainError::NotAddressable { chain, found } => {
            assert_eq!(chain, "a:b");
            assert_eq!(found, "integer");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(root, node(json!({"a": {"b": 0}})), "root must be unchanged");
}

#[test]
fn set_refuses_empty_string_intermediate() {
    let mut root = node(json!({"a": ""}));
    assert!(matches!(
        set(&mut root, &chain("a:b"), node(json!(1))),
        Err(ChainError::NotAddressable { found: "string", .. })
    ));
}

#[test]
fn set_appends_to_sequence_at_len() {
    let mut root = node(json!({"list": ["a"]}));
    set(&mut root, &chain("list:1"), node(json!("b"))).unwrap();
    assert_eq!(root, node(json!({"list": ["a", "b"]})));
}

#[test]
fn set_replaces_sequence_element() {
    let mut root = node(json!({"list": ["a", "b"]}));
    set(&mut root, &chain("list:0"), node(json!("z"))).unwrap();
    assert_eq!(root, node(json!({"list": ["z", "b"]})));
}

#[test]
fn set_past_end_of_sequence_promotes_to_mapping() {
    let mut root = node(json!({"list": ["a"]}));
    set(&mut root, &chain("list:5"), node(json!("f"))).unwrap();
    assert_eq!(root, node(json!({"list": {"0": "a", "5": "f"}})));
}

#[test]
fn set_on_sequence_root_fails() {
    let mut root = node(json!([1]));
    assert!(matches!(
        set(&mut root, &chain("0"), node(json!(2))),
        Err(ChainError::InvalidRootKind { .. })
    ));
}

#[test]
fn set_by_chain_honours_separator() {
    let mut root = node(json!({}));
    set_by_chain(&mut root, "a/b", node(json!(1)), '/').unwrap();
    assert_eq!(root, node(json!({"a": {"b": 1}})));
}

// ============================================================================
// unset
// ============================================================================

#[test]
fn unset_removes_leaf_and_keeps_parents() {
    let mut root = node(json!({"l1": {"l2": {"l3": "val"}}}));
    unset(&mut root, &chain("l1:l2:l3")).unwrap();
    assert_eq!(root, node(json!({"l1": {"l2": {}}})));
}

#[test]
fn unset_missing_path_is_noop() {
    let mut root = node(json!({"a": {"b": 1}}));
    unset(&mut root, &chain("x:y:z")).unwrap();
    unset(&mut root, &chain("a:c")).unwrap();
    unset(&mut root, &chain("a:b:c")).unwrap();
    assert_eq!(root, node(json!({"a": {"b": 1}})));
}

#[test]
fn unset_is_idempotent() {
    let mut root = node(json!({"a": {"b": 1, "c": 2}}));
    unset(&mut root, &chain("a:b")).unwrap();
    let after_first = root.clone();
    unset(&mut root, &chain("a:b")).unwrap();
    assert_eq!(root, after_first);
    assert_eq!(get(&root, &chain("a:b")).unwrap(), None);
}

#[test]
fn unset_preserves_sibling_order() {
    let mut root = node(json!({"a": 1, "b": 2, "c": 3}));
    unset(&mut root, &chain("b")).unwrap();
    assert_eq!(root, node(json!({"a": 1, "c": 3})));
}

#[test]
fn unset_last_sequence_element_keeps_list() {
    let mut root = node(json!({"list": ["a", "b"]}));
    unset(&mut root, &chain("list:1")).unwrap();
    assert_eq!(root, node(json!({"list": ["a"]})));
}

#[test]
fn unset_inner_sequence_element_keeps_remaining_keys() {
    let mut root = node(json!({"list": ["a", "b", "c"]}));
    unset(&mut root, &chain("list:0")).unwrap();
    assert_eq!(root, node(json!({"list": {"1": "b", "2": "c"}})));
}

#[test]
fn unset_on_scalar_root_fails() {
    let mut root = node(json!("x"));
    assert!(matches!(
        unset(&mut root, &chain("a")),
        Err(ChainError::InvalidRootKind { found: "string" })
    ));
}

#[test]
fn unset_by_chain_honours_separator() {
    let mut root = node(json!({"a": {"b": 1, "c": 2}}));
    unset_by_chain(&mut root, "a.b", '.').unwrap();
    assert_eq!(root, node(json!({"a": {"c": 2}})));
}
