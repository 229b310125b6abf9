//! Map keys.

use std::fmt::{self, Debug, Display, Formatter};

use compact_str::CompactString;

/// A map key.
///
/// Keys are not restricted to text: integers, booleans and tuples of keys
/// are all valid wherever a key is expected, matching the contract of a
/// general ordered mapping. Text keys are the common case and the only kind
/// that participates in dotted-path lookups.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Text key.
    Str(CompactString),
    /// Integer key.
    Int(i64),
    /// Boolean key.
    Bool(bool),
    /// Composite key built from other keys.
    Tuple(Box<[Key]>),
}

impl Key {
    /// Returns the text of a `Str` key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Builds a composite key from a sequence of keys.
    pub fn tuple(keys: impl IntoIterator<Item = Key>) -> Self {
        Key::Tuple(keys.into_iter().collect())
    }

    /// A `Str` key containing the path separator is a dotted path, not a
    /// plain key. Only consulted after a literal lookup has failed.
    pub(crate) fn dotted(&self) -> Option<&str> {
        match self {
            Key::Str(s) if s.contains('.') => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(CompactString::from(s))
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(CompactString::from(s))
    }
}

impl From<CompactString> for Key {
    fn from(s: CompactString) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n.into())
    }
}

impl From<u32> for Key {
    fn from(n: u32) -> Self {
        Key::Int(n.into())
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(n) => write!(f, "{n}"),
            Key::Bool(b) => write!(f, "{b}"),
            Key::Tuple(keys) => {
                f.write_str("(")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl Debug for Key {
    // Keys print like the literals they were built from: `"name"`, `3`, `true`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{:?}", s.as_str()),
            Key::Int(n) => write!(f, "{n}"),
            Key::Bool(b) => write!(f, "{b}"),
            Key::Tuple(keys) => {
                let mut tup = f.debug_tuple("");
                for key in keys.iter() {
                    tup.field(key);
                }
                tup.finish()
            }
        }
    }
}
