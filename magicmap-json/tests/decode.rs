//! End-to-end decoding and encoding.

use magicmap::{magic, MagicMap, Value};

const DOC: &str = r#"{
    "user": {
        "name": "Alice",
        "nickname": null,
        "scores": [10, 9.5, null]
    },
    "tags": ["a", "b"]
}"#;

#[test]
fn objects_decode_into_wrapped_maps() {
    let md = magicmap_json::map_from_str(DOC).unwrap();
    assert_eq!(md.get("user.name").unwrap(), Value::from("Alice"));
    assert!(md.get("user").unwrap().as_magic().is_some());
    assert_eq!(md.get("user.scores.0").unwrap(), Value::Int(10));
    assert_eq!(md.get("user.scores.1").unwrap(), Value::Float(9.5));
}

#[test]
fn decoded_nulls_behave_like_stored_nulls() {
    let md = magicmap_json::map_from_str(DOC).unwrap();
    let nick = md.attr("user").attr("nickname");
    assert!(nick.as_magic().unwrap().is_from_none());
    let user = md.get("user").unwrap();
    assert_eq!(user.as_magic().unwrap().get("nickname").unwrap(), Value::Null);
}

#[test]
fn streaming_input_decodes_the_same() {
    let from_reader = magicmap_json::map_from_reader(DOC.as_bytes()).unwrap();
    let from_str = magicmap_json::map_from_str(DOC).unwrap();
    assert_eq!(from_reader, from_str);
}

#[test]
fn non_object_roots_are_allowed_but_typed() {
    let list = magicmap_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(list.as_list().unwrap().len(), 3);

    let err = magicmap_json::map_from_str("[1, 2, 3]").unwrap_err();
    assert!(err.to_string().contains("list"));
}

#[test]
fn invalid_json_reports_decode_errors() {
    let err = magicmap_json::from_str("{ not json").unwrap_err();
    assert!(matches!(err.kind, magicmap_json::ErrorKind::Decode(_)));
}

#[test]
fn trailing_garbage_is_rejected() {
    assert!(magicmap_json::from_str("{} {}").is_err());
}

#[test]
fn encode_decode_round_trip() {
    let md = magic! {
        "name": "Alice",
        "flags": [true, false],
        "meta": { "n": 1 },
    };
    let text = magicmap_json::to_string(&Value::Magic(md.clone())).unwrap();
    let back = magicmap_json::map_from_str(&text).unwrap();
    assert_eq!(md, back);
}

#[test]
fn pretty_output_is_indented() {
    let md = magic! { "a": 1 };
    let text = magicmap_json::to_string_pretty(&Value::Magic(md)).unwrap();
    assert!(text.contains('\n'));
    assert!(text.contains("\"a\": 1"));
}

#[test]
fn cyclic_graphs_fail_to_encode_instead_of_hanging() {
    let md = MagicMap::new();
    md.insert("me", md.clone()).unwrap();
    let err = magicmap_json::to_string(&Value::Magic(md)).unwrap_err();
    assert!(matches!(err.kind, magicmap_json::ErrorKind::Encode(_)));
}

#[test]
fn writer_output_matches_string_output() {
    let md = magic! { "a": [1, 2] };
    let value = Value::Magic(md);
    let mut buffer = Vec::new();
    magicmap_json::to_writer(&mut buffer, &value).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        magicmap_json::to_string(&value).unwrap()
    );
}
