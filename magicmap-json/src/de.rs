//! JSON decoding straight into wrapped maps.
//!
//! Objects are materialized through [`MagicMap::object_hook`] as they are
//! decoded, bottom-up, so the result needs no second conversion pass: a
//! document parses directly into a fully hooked graph.

use std::fmt;
use std::io::Read;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::Deserializer;

use magicmap::{Key, List, MagicMap, Value};

use crate::error::Error;

/// Decodes a JSON document from a string.
///
/// Every object in the document becomes a wrapped [`MagicMap`]; arrays
/// become lists; scalars map onto their [`Value`] counterparts.
pub fn from_str(input: &str) -> Result<Value, Error> {
    let mut de = serde_json::Deserializer::from_str(input);
    let value = NodeSeed.deserialize(&mut de).map_err(Error::decode)?;
    de.end().map_err(Error::decode)?;
    log::trace!("decoded {} byte(s) of JSON", input.len());
    Ok(value)
}

/// Decodes a JSON document from a streaming reader.
pub fn from_reader(reader: impl Read) -> Result<Value, Error> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    let value = NodeSeed.deserialize(&mut de).map_err(Error::decode)?;
    de.end().map_err(Error::decode)?;
    Ok(value)
}

/// [`from_str`], insisting that the document root is an object.
pub fn map_from_str(input: &str) -> Result<MagicMap, Error> {
    into_map(from_str(input)?)
}

/// [`from_reader`], insisting that the document root is an object.
pub fn map_from_reader(reader: impl Read) -> Result<MagicMap, Error> {
    into_map(from_reader(reader)?)
}

fn into_map(value: Value) -> Result<MagicMap, Error> {
    match value {
        Value::Magic(map) => Ok(map),
        other => Err(Error::not_an_object(other.kind().name())),
    }
}

// seed instead of Deserialize: Value lives in another crate, and building
// through the seed lets objects go through the object-hook factory
struct NodeSeed;

impl<'de> DeserializeSeed<'de> for NodeSeed {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        // JSON has no integer width; values past i64 degrade to float
        Ok(match i64::try_from(v) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Float(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(elem) = seq.next_element_seed(NodeSeed)? {
            items.push(elem);
        }
        Ok(Value::List(List::from_vec(items)))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(NodeSeed)?;
            pairs.push((Key::from(key), value));
        }
        Ok(Value::Magic(MagicMap::object_hook(pairs)))
    }
}
