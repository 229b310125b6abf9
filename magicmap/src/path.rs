//! Dotted-path resolution for strict lookups.
//!
//! A path like `"users.0.name"` walks mappings by key and sequences by
//! index, one segment at a time. The walk is strict: every failure mode
//! has its own error kind naming the offending segment and the full path,
//! and nothing degrades to a placeholder here.

use crate::error::Error;
use crate::key::Key;
use crate::map::{MagicMap, Origin};
use crate::value::Value;

pub(crate) fn walk_dotted(root: &Value, path: &str) -> Result<Value, Error> {
    let mut current = root.clone();
    for segment in path.split('.') {
        current = step(&current, segment, path)?;
    }
    Ok(finish(current))
}

pub(crate) fn walk_segments(root: &Value, segments: &[&str]) -> Result<Value, Error> {
    let path = segments.join(".");
    let mut current = root.clone();
    for segment in segments {
        current = step(&current, segment, &path)?;
    }
    Ok(finish(current))
}

/// A path that resolves all the way down to a literal null degrades to a
/// from-null placeholder, matching attribute semantics; only single-key
/// bracket access sees the literal null.
fn finish(value: Value) -> Value {
    match value {
        Value::Null => Value::Magic(MagicMap::placeholder(Origin::FromNone)),
        other => other,
    }
}

/// Applies one path segment to one value.
fn step(value: &Value, segment: &str, path: &str) -> Result<Value, Error> {
    match value {
        Value::Magic(map) => {
            if let Some(found) = map.raw_get(&Key::from(segment)) {
                return Ok(found);
            }
            // maps can be keyed by integers; "users.3.x" may mean key 3
            if let Ok(n) = segment.parse::<i64>() {
                if let Some(found) = map.raw_get(&Key::Int(n)) {
                    return Ok(found);
                }
            }
            Err(Error::missing_segment(segment, path))
        }
        Value::Map(plain) => {
            if let Some(found) = plain.get(segment) {
                return Ok(found);
            }
            if let Ok(n) = segment.parse::<i64>() {
                if let Some(found) = plain.get(Key::Int(n)) {
                    return Ok(found);
                }
            }
            Err(Error::missing_segment(segment, path))
        }
        Value::List(list) => {
            let index = parse_index(segment, list.len(), path)?;
            match list.get(index) {
                Some(elem) => Ok(elem),
                None => Err(Error::missing_segment(segment, path)),
            }
        }
        Value::Tuple(tuple) => {
            let index = parse_index(segment, tuple.len(), path)?;
            match tuple.items().get(index) {
                Some(elem) => Ok(elem.clone()),
                None => Err(Error::missing_segment(segment, path)),
            }
        }
        other => Err(Error::unindexable(segment, path, other.kind().name())),
    }
}

/// Parses a sequence index, honoring negative indices counted from the
/// end.
fn parse_index(segment: &str, len: usize, path: &str) -> Result<usize, Error> {
    let n: i64 = segment
        .parse()
        .map_err(|_| Error::bad_index(segment, path))?;
    let resolved = if n < 0 { n + len as i64 } else { n };
    if resolved < 0 || resolved >= len as i64 {
        return Err(Error::index_out_of_range(n, len, path));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MagicMap;
    use crate::value::List;

    fn sample() -> MagicMap {
        let users = List::from_vec(vec![
            Value::Magic(MagicMap::from_pairs([("name", "Alice")])),
            Value::Magic(MagicMap::from_pairs([("name", "Bob")])),
        ]);
        MagicMap::from_pairs([("users", Value::List(users))])
    }

    #[test]
    fn walks_maps_and_sequences() {
        let map = sample();
        assert_eq!(
            map.get("users.0.name").unwrap(),
            Value::from("Alice")
        );
        assert_eq!(map.get("users.1.name").unwrap(), Value::from("Bob"));
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let map = sample();
        assert_eq!(map.get("users.-1.name").unwrap(), Value::from("Bob"));
    }

    #[test]
    fn each_failure_has_its_own_kind() {
        use crate::error::ErrorKind;
        let map = sample();

        let err = map.get("users.0.email").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MissingSegment { .. }));

        let err = map.get("users.first.name").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::BadIndex { .. }));

        let err = map.get("users.7.name").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IndexOutOfRange { index: 7, .. }));

        let err = map.get("users.0.name.first").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Unindexable { actual: "str", .. }
        ));
    }

    #[test]
    fn null_at_the_end_of_a_path_degrades_to_a_placeholder() {
        let users = List::from_vec(vec![Value::Magic(MagicMap::from_pairs([(
            "nick",
            Value::Null,
        )]))]);
        let map = MagicMap::from_pairs([("users", Value::List(users))]);

        let end = map.get("users.0.nick").unwrap();
        assert!(end.as_magic().unwrap().is_from_none());

        // single-key access still sees the literal null
        let user = map.get("users.0").unwrap();
        assert_eq!(user.as_magic().unwrap().get("nick").unwrap(), Value::Null);
    }

    #[test]
    fn literal_key_wins_over_path_walk() {
        let map = MagicMap::from_pairs([("a.b", 1)]);
        assert_eq!(map.get("a.b").unwrap(), Value::Int(1));
    }
}
