//! Forgiving, attribute-style navigation over dynamic nested data.
//!
//! The centerpiece is [`MagicMap`]: an ordered mapping that recursively
//! wraps every nested mapping stored in it, lets you navigate arbitrarily
//! deep structures without checking each level, and tells apart "this key
//! held null" from "this key never existed" via protected placeholder
//! instances.
//!
//! ```
//! use magicmap::magic;
//!
//! let md = magic! {
//!     "user": {
//!         "name": "Alice",
//!         "nickname": null,
//!     },
//!     "items": [ { "id": 1 }, { "id": 2 } ],
//! };
//!
//! // forgiving: missing paths degrade to protected empty maps
//! let city = md.attr("user").attr("address").attr("city");
//! assert!(city.as_magic().unwrap().is_from_missing());
//!
//! // strict: bracket access fails loudly, and walks dotted paths
//! assert_eq!(md.get("items.1.id").unwrap().as_i64(), Some(2));
//! assert!(md.get("items.9.id").unwrap_err().is_not_found());
//!
//! // null and missing are distinguishable
//! assert!(md.attr("user").attr("nickname").as_magic().unwrap().is_from_none());
//! ```
//!
//! Conversion in and out of the wrapped world is done by two engines,
//! [`hook`] and [`disenchant`], both of which preserve shared references
//! and terminate on cyclic graphs.

mod copy;
mod disenchant;
mod error;
mod hook;
mod key;
mod macros;
mod map;
mod path;
mod state;
mod value;

pub use crate::disenchant::disenchant;
pub use crate::error::{Error, ErrorKind};
pub use crate::hook::hook;
pub use crate::key::Key;
pub use crate::map::{MagicMap, Origin};
pub use crate::state::MapState;
pub use crate::value::{List, PlainMap, Set, Tuple, Value, ValueKind};

/// Converts a mapping value into a wrapped [`MagicMap`].
///
/// Plain maps are hooked; already-wrapped maps pass through as the same
/// instance. Anything else is an error.
pub fn enchant(value: &Value) -> Result<MagicMap, Error> {
    match value {
        Value::Magic(map) => Ok(map.clone()),
        Value::Map(plain) => Ok(crate::hook::hook_plain_map(plain.clone())),
        other => Err(Error::not_a_mapping(other.kind().name())),
    }
}

/// Collapses protected placeholders back to null.
///
/// The inverse of the forgiving-access policy: an empty wrapped map
/// carrying either sentinel flag becomes [`Value::Null`]; every other
/// value (including ordinary empty maps) is returned unchanged.
#[must_use]
pub fn none(value: Value) -> Value {
    match &value {
        Value::Magic(map) if map.is_protected() && map.is_empty() => Value::Null,
        _ => value,
    }
}
