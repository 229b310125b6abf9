//! The mutation guard and mutating operations.

use magicmap::{magic, Key, MagicMap, Value};

#[test]
fn values_are_hooked_on_insert() {
    let md = MagicMap::new();
    let plain: magicmap::PlainMap = [("city", "Berlin")].into_iter().collect();
    md.insert("address", plain).unwrap();
    assert!(md.get("address").unwrap().as_magic().is_some());
    assert_eq!(md.get("address.city").unwrap(), Value::from("Berlin"));
}

#[test]
fn placeholder_from_null_rejects_mutation() {
    let md = MagicMap::new();
    md.insert("user", Value::Null).unwrap();
    // md.user is a protected placeholder; writing through it must fail
    let user = md.attr("user");
    let user = user.as_magic().unwrap();
    let err = user.insert("x", 1).unwrap_err();
    assert!(err.is_protected());
    assert!(err.to_string().contains("null"));
    // and the original is untouched
    assert_eq!(md.get("user").unwrap(), Value::Null);
}

#[test]
fn placeholder_from_missing_rejects_mutation() {
    let md = MagicMap::new();
    let ghost = md.attr("ghost");
    let ghost = ghost.as_magic().unwrap();
    assert!(ghost.insert("x", 1).unwrap_err().is_protected());
    assert!(ghost.remove("x").unwrap_err().is_protected());
    assert!(ghost.clear().unwrap_err().is_protected());
    assert!(ghost.pop_last().unwrap_err().is_protected());
    assert!(ghost.update([("x", 1)]).unwrap_err().is_protected());
    assert!(ghost.set_default("x", 1).unwrap_err().is_protected());
    assert!(ghost.is_empty());
}

#[test]
fn update_merges_and_hooks() {
    let md = magic! { "a": 1 };
    md.update([
        ("b", Value::Int(2)),
        ("nested", Value::Map([("x", 9)].into_iter().collect())),
    ])
    .unwrap();
    assert_eq!(md.len(), 3);
    assert_eq!(md.get("nested.x").unwrap(), Value::Int(9));
}

#[test]
fn remove_preserves_order() {
    let md = magic! { "a": 1, "b": 2, "c": 3 };
    assert_eq!(md.remove("b").unwrap(), Some(Value::Int(2)));
    assert_eq!(md.keys(), vec![Key::from("a"), Key::from("c")]);
    assert_eq!(md.remove("b").unwrap(), None);
}

#[test]
fn pop_last_takes_the_newest_entry() {
    let md = magic! { "a": 1, "b": 2 };
    let (key, value) = md.pop_last().unwrap().unwrap();
    assert_eq!(key, Key::from("b"));
    assert_eq!(value, Value::Int(2));
    assert_eq!(md.len(), 1);
}

#[test]
fn set_default_only_fills_gaps() {
    let md = magic! { "present": 1 };
    assert_eq!(md.set_default("present", 9).unwrap(), Value::Int(1));
    assert_eq!(md.set_default("absent", 9).unwrap(), Value::Int(9));
    assert_eq!(md.get("absent").unwrap(), Value::Int(9));
}

#[test]
fn non_text_keys_are_first_class() {
    let md = MagicMap::new();
    md.insert(3, "three").unwrap();
    md.insert(Key::tuple([Key::from("a"), Key::Int(1)]), "pair")
        .unwrap();
    assert_eq!(md.get(3).unwrap(), Value::from("three"));
    assert_eq!(
        md.get(Key::tuple([Key::from("a"), Key::Int(1)])).unwrap(),
        Value::from("pair")
    );
}

#[test]
fn from_keys_binds_every_key() {
    let md = MagicMap::from_keys(["a", "b", "c"], 0);
    assert_eq!(md.len(), 3);
    assert_eq!(md.get("b").unwrap(), Value::Int(0));
}

#[test]
fn filter_recurses_into_nested_maps() {
    let md = magic! {
        "user": { "name": "Alice", "temp": "x" },
        "temp": "y",
    };
    let kept = md.filter(|key, _| key.as_str() != Some("temp"));
    assert!(!kept.contains_key("temp"));
    let user = kept.get("user").unwrap();
    let user = user.as_magic().unwrap();
    assert!(!user.contains_key("temp"));
    assert_eq!(user.get("name").unwrap(), Value::from("Alice"));
    // the original is untouched
    assert!(md.contains_key("temp"));
}

#[test]
fn compact_drops_nulls_and_empties() {
    let md = magic! {
        "keep": 1,
        "null": null,
        "hollow": { "inner": null },
        "list": [1, null, {}],
    };
    let compacted = md.compact();
    assert!(compacted.contains_key("keep"));
    assert!(!compacted.contains_key("null"));
    // the nested map lost its only entry, so it is dropped too
    assert!(!compacted.contains_key("hollow"));
    let list = compacted.get("list").unwrap();
    let list = list.as_list().unwrap().clone();
    assert_eq!(list.to_vec(), vec![Value::Int(1)]);
}

#[test]
fn filter_survives_cycles() {
    let md = MagicMap::new();
    md.insert("keep", 1).unwrap();
    md.insert("me", md.clone()).unwrap();
    let kept = md.filter(|_, _| true);
    // the cycle is reproduced in the result, not expanded
    let me = kept.get("me").unwrap();
    let me = me.as_magic().unwrap();
    me.insert("marker", 2).unwrap();
    assert_eq!(kept.get("marker").unwrap(), Value::Int(2));
}
