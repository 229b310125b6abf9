//! JSON in and out of [`magicmap`] value graphs.
//!
//! Decoding wires the wrapped-map factory in as the per-object
//! materialization step, so a parsed document is a fully hooked graph with
//! no second conversion pass:
//!
//! ```
//! let md = magicmap_json::map_from_str(
//!     r#"{ "user": { "name": "Alice", "nickname": null } }"#,
//! ).unwrap();
//!
//! assert_eq!(md.get("user.name").unwrap().as_str(), Some("Alice"));
//! assert!(md.attr("user").attr("nickname").as_magic().unwrap().is_from_none());
//! ```
//!
//! Encoding walks any [`Value`](magicmap::Value) graph back out to JSON
//! text, with a depth budget in place of cycle detection.

mod de;
mod error;
mod ser;

pub use crate::de::{from_reader, from_str, map_from_reader, map_from_str};
pub use crate::error::{Error, ErrorKind};
pub use crate::ser::{to_string, to_string_pretty, to_writer};
