//! Lookup behavior across the three access surfaces.

use magicmap::{magic, none, MagicMap, Value};

fn sample() -> MagicMap {
    magic! {
        "user": {
            "name": "Alice",
            "nickname": null,
        },
        "users": [ { "name": "Alice" }, { "name": "Bob" } ],
        "a.b": "literal",
    }
}

#[test]
fn bracket_access_is_strict() {
    let md = sample();
    assert_eq!(md.get("user").unwrap().attr("name").as_str(), Some("Alice"));
    assert!(md.get("absent").unwrap_err().is_not_found());
}

#[test]
fn bracket_access_returns_literal_null() {
    let md = sample();
    let user = md.get("user").unwrap();
    let user = user.as_magic().unwrap();
    assert_eq!(user.get("nickname").unwrap(), Value::Null);
}

#[test]
fn attribute_access_never_fails() {
    let md = sample();
    // missing key: protected empty from-missing
    let gone = md.attr("gone");
    assert!(gone.as_magic().unwrap().is_from_missing());
    // null value: protected empty from-none
    let nick = md.attr("user").attr("nickname");
    assert!(nick.as_magic().unwrap().is_from_none());
    // chains through placeholders, null, and scalars stay total
    let deep = md.attr("gone").attr("still").attr("gone");
    assert!(deep.as_magic().unwrap().is_from_missing());
    let through_null = md.attr("user").attr("nickname").attr("anything");
    assert!(through_null.as_magic().unwrap().is_from_missing());
    let through_scalar = md.attr("user").attr("name").attr("first");
    assert!(through_scalar.as_magic().unwrap().is_from_missing());
}

#[test]
fn dotted_bracket_access_walks_sequences() {
    let md = sample();
    assert_eq!(md.get("users.0.name").unwrap(), Value::from("Alice"));
    assert_eq!(md.get("users.1.name").unwrap(), Value::from("Bob"));
    assert_eq!(md.get("users.-1.name").unwrap(), Value::from("Bob"));
    assert!(md.get("users.9.name").unwrap_err().is_not_found());
    assert!(md.get("users.x.name").unwrap_err().is_not_found());
}

#[test]
fn literal_key_beats_dotted_interpretation() {
    let md = sample();
    assert_eq!(md.get("a.b").unwrap(), Value::from("literal"));
}

#[test]
fn explicit_segments_match_dotted_strings() {
    let md = sample();
    assert_eq!(
        md.get_path(&["users", "0", "name"]).unwrap(),
        md.get("users.0.name").unwrap()
    );
}

#[test]
fn mget_matrix() {
    let md = sample();

    // absent, no default: from-missing placeholder
    let missing = md.mget("missing");
    assert!(missing.as_magic().unwrap().is_from_missing());

    // absent, with default: default
    assert_eq!(md.mget_or("missing", "fallback"), Value::from("fallback"));

    // present null, no default: from-none placeholder
    let nick = md.attr("user").as_magic().unwrap().mget("nickname");
    assert!(nick.as_magic().unwrap().is_from_none());

    // present null, explicit default: default wins, even a literal null
    let user = md.get("user").unwrap();
    let user = user.as_magic().unwrap();
    assert_eq!(user.mget_or("nickname", Value::Null), Value::Null);
    assert_eq!(user.mget_or("nickname", "anon"), Value::from("anon"));

    // present non-null: the value itself
    assert_eq!(user.mget("name"), Value::from("Alice"));

    // the shorthand is the same contract
    assert!(md.mg("missing").as_magic().unwrap().is_from_missing());
}

#[test]
fn reserved_names_expose_the_flags() {
    let md = sample();
    assert_eq!(md.attr("_from_none"), Value::Bool(false));
    assert_eq!(md.attr("_from_missing"), Value::Bool(false));
    assert_eq!(md.attr("gone").attr("_from_missing"), Value::Bool(true));
    assert_eq!(
        md.attr("user").attr("nickname").attr("_from_none"),
        Value::Bool(true)
    );
}

#[test]
fn none_unwraps_placeholders() {
    let md = sample();
    assert_eq!(none(md.attr("gone")), Value::Null);
    assert_eq!(none(md.attr("user").attr("nickname")), Value::Null);
    // non-placeholders pass through, including ordinary empty maps
    assert_eq!(none(Value::from("x")), Value::from("x"));
    let empty = Value::Magic(MagicMap::new());
    assert!(none(empty).as_magic().is_some());
}

#[test]
fn placeholders_compare_as_empty_maps() {
    let md = sample();
    let a = md.attr("gone");
    let b = md.attr("user").attr("nickname");
    // different flags, same content
    assert_eq!(a, b);
    assert_eq!(a, Value::Magic(MagicMap::new()));
}
