use obj_iface_path::{format_pointer, get, parse_pointer, parent_mut_or_insert, PathError};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_pointer_empty_component() {
    let doc = json!({"": "value", "foo": {"": "inner"}});

    let path = parse_pointer("/").unwrap();
    assert_eq!(get(&doc, &path), Some(&json!("value")));

    let path = parse_pointer("/foo/").unwrap();
    assert_eq!(get(&doc, &path), Some(&json!("inner")));
}

#[test]
fn test_pointer_escaped_keys() {
    let doc = json!({"a/b": {"m~n": 1}});
    let path = parse_pointer("/a~1b/m~0n").unwrap();
    assert_eq!(get(&doc, &path), Some(&json!(1)));
}

#[test]
fn test_pointer_lists_are_opaque() {
    let doc = json!({"e": [4, 5]});
    let path = parse_pointer("/e/0").unwrap();
    assert_eq!(get(&doc, &path), None);
}

#[test]
fn test_bridge_stops_at_list() {
    let mut doc = json!({"e": [4, 5]});
    let err = parent_mut_or_insert(&mut doc, &["e", "0", "x"]).unwrap_err();
    assert_eq!(
        err,
        PathError::NotARecord {
            path: vec!["e".to_string()]
        }
    );
}

proptest! {
    #[test]
    fn format_then_parse_preserves_keys(keys in prop::collection::vec(".{0,8}", 0..6)) {
        let pointer = format_pointer(&keys);
        prop_assert_eq!(parse_pointer(&pointer).unwrap(), keys);
    }
}
