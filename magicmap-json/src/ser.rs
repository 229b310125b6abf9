//! JSON encoding of value graphs.
//!
//! Wrapped and plain maps both come out as JSON objects (keys stringified
//! via their display form), lists, tuples and sets as arrays, scalars as
//! themselves and null as null. The value model allows cycles; JSON does
//! not, so the encoder carries an explicit depth budget and fails cleanly
//! instead of recursing forever.

use std::io::Write;

use serde::ser::{Error as _, SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

use magicmap::{Key, Value};

use crate::error::Error;

// deep enough for any sane document, shallow enough to catch a cycle fast
const MAX_DEPTH: usize = 128;

/// Encodes a value graph as compact JSON.
pub fn to_string(value: &Value) -> Result<String, Error> {
    serde_json::to_string(&JsonNode { value, depth: 0 }).map_err(Error::encode)
}

/// Encodes a value graph as pretty-printed JSON.
pub fn to_string_pretty(value: &Value) -> Result<String, Error> {
    serde_json::to_string_pretty(&JsonNode { value, depth: 0 }).map_err(Error::encode)
}

/// Encodes a value graph into a writer.
pub fn to_writer(writer: impl Write, value: &Value) -> Result<(), Error> {
    serde_json::to_writer(writer, &JsonNode { value, depth: 0 }).map_err(Error::encode)
}

struct JsonNode<'a> {
    value: &'a Value,
    depth: usize,
}

impl Serialize for JsonNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.depth > MAX_DEPTH {
            return Err(S::Error::custom(
                "nesting exceeds the encoder depth limit (cyclic structure?)",
            ));
        }
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s.as_str()),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::List(list) => {
                let items = list.to_vec();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in &items {
                    seq.serialize_element(&JsonNode {
                        value: item,
                        depth: self.depth + 1,
                    })?;
                }
                seq.end()
            }
            Value::Tuple(tuple) => {
                let mut seq = serializer.serialize_seq(Some(tuple.len()))?;
                for item in tuple.items() {
                    seq.serialize_element(&JsonNode {
                        value: item,
                        depth: self.depth + 1,
                    })?;
                }
                seq.end()
            }
            Value::Set(set) => {
                let mut seq = serializer.serialize_seq(Some(set.len()))?;
                for key in set.iter() {
                    seq.serialize_element(&KeyNode { key })?;
                }
                seq.end()
            }
            Value::Map(plain) => {
                let entries = plain.entries();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in &entries {
                    map.serialize_entry(
                        &key.to_string(),
                        &JsonNode {
                            value,
                            depth: self.depth + 1,
                        },
                    )?;
                }
                map.end()
            }
            Value::Magic(magic) => {
                let entries = magic.entries();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in &entries {
                    map.serialize_entry(
                        &key.to_string(),
                        &JsonNode {
                            value,
                            depth: self.depth + 1,
                        },
                    )?;
                }
                map.end()
            }
        }
    }
}

struct KeyNode<'a> {
    key: &'a Key,
}

impl Serialize for KeyNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.key {
            Key::Str(s) => serializer.serialize_str(s.as_str()),
            Key::Int(n) => serializer.serialize_i64(*n),
            Key::Bool(b) => serializer.serialize_bool(*b),
            Key::Tuple(keys) => {
                let mut seq = serializer.serialize_seq(Some(keys.len()))?;
                for key in keys.iter() {
                    seq.serialize_element(&KeyNode { key })?;
                }
                seq.end()
            }
        }
    }
}
