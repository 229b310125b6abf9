//! Error types for map access, mutation and conversion.

use std::fmt::{self, Display};

use crate::key::Key;
use crate::map::Origin;

/// Error type for map operations.
///
/// Strict lookups report the not-found family of kinds; mutation of a
/// protected placeholder reports [`ErrorKind::Protected`]; conversion of a
/// non-mapping reports [`ErrorKind::NotAMapping`]. The forgiving surfaces
/// (`attr`, `mget`) never produce an error at all.
#[derive(Debug)]
pub struct Error {
    /// The specific kind of error.
    pub kind: ErrorKind,
}

/// Specific error kinds for map operations.
#[derive(Debug)]
pub enum ErrorKind {
    /// Strict access on an absent key.
    Missing {
        /// The key that was looked up.
        key: Key,
    },
    /// A dotted-path segment did not resolve to an existing key.
    MissingSegment {
        /// The segment that failed.
        segment: String,
        /// The full dotted path being walked.
        path: String,
    },
    /// A dotted-path segment indexed a sequence but was not an integer.
    BadIndex {
        /// The segment that failed to parse.
        segment: String,
        /// The full dotted path being walked.
        path: String,
    },
    /// A sequence index fell outside the sequence.
    IndexOutOfRange {
        /// The requested index (before negative-index normalization).
        index: i64,
        /// The length of the sequence.
        len: usize,
        /// The full dotted path being walked.
        path: String,
    },
    /// A dotted path tried to descend into a value that is neither a
    /// mapping nor a sequence.
    Unindexable {
        /// The segment that could not be applied.
        segment: String,
        /// The full dotted path being walked.
        path: String,
        /// The kind of value the walk stopped at.
        actual: &'static str,
    },
    /// Mutation attempted on a protected placeholder instance.
    Protected {
        /// Why the placeholder exists.
        origin: Origin,
    },
    /// Conversion expected a mapping.
    NotAMapping {
        /// The kind of value that was supplied instead.
        actual: &'static str,
    },
}

impl Error {
    /// Creates an error of the given kind.
    pub const fn new(kind: ErrorKind) -> Self {
        Error { kind }
    }

    pub(crate) fn missing(key: Key) -> Self {
        Error::new(ErrorKind::Missing { key })
    }

    pub(crate) fn missing_segment(segment: &str, path: &str) -> Self {
        Error::new(ErrorKind::MissingSegment {
            segment: segment.to_string(),
            path: path.to_string(),
        })
    }

    pub(crate) fn bad_index(segment: &str, path: &str) -> Self {
        Error::new(ErrorKind::BadIndex {
            segment: segment.to_string(),
            path: path.to_string(),
        })
    }

    pub(crate) fn index_out_of_range(index: i64, len: usize, path: &str) -> Self {
        Error::new(ErrorKind::IndexOutOfRange {
            index,
            len,
            path: path.to_string(),
        })
    }

    pub(crate) fn unindexable(segment: &str, path: &str, actual: &'static str) -> Self {
        Error::new(ErrorKind::Unindexable {
            segment: segment.to_string(),
            path: path.to_string(),
            actual,
        })
    }

    pub(crate) fn protected(origin: Origin) -> Self {
        Error::new(ErrorKind::Protected { origin })
    }

    pub(crate) fn not_a_mapping(actual: &'static str) -> Self {
        Error::new(ErrorKind::NotAMapping { actual })
    }

    /// True for the whole not-found family: absent keys, absent path
    /// segments, bad or out-of-range indices, and unindexable mid-path
    /// values.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Missing { .. }
                | ErrorKind::MissingSegment { .. }
                | ErrorKind::BadIndex { .. }
                | ErrorKind::IndexOutOfRange { .. }
                | ErrorKind::Unindexable { .. }
        )
    }

    /// True when a mutation was rejected because the receiver is a
    /// protected placeholder.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        matches!(self.kind, ErrorKind::Protected { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Missing { key } => write!(f, "key not found: {key:?}"),
            ErrorKind::MissingSegment { segment, path } => {
                write!(f, "segment {segment:?} not found while walking {path:?}")
            }
            ErrorKind::BadIndex { segment, path } => {
                write!(
                    f,
                    "segment {segment:?} is not a valid index while walking {path:?}"
                )
            }
            ErrorKind::IndexOutOfRange { index, len, path } => {
                write!(
                    f,
                    "index {index} out of range for sequence of length {len} while walking {path:?}"
                )
            }
            ErrorKind::Unindexable {
                segment,
                path,
                actual,
            } => {
                write!(
                    f,
                    "cannot descend into {actual} value at segment {segment:?} while walking {path:?}"
                )
            }
            ErrorKind::Protected { origin } => {
                let reason = match origin {
                    Origin::FromNone => "a null value",
                    _ => "a missing key",
                };
                write!(f, "cannot modify placeholder created from {reason}")
            }
            ErrorKind::NotAMapping { actual } => {
                write!(f, "expected a mapping, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_family() {
        assert!(Error::missing(Key::from("x")).is_not_found());
        assert!(Error::missing_segment("b", "a.b").is_not_found());
        assert!(Error::index_out_of_range(9, 2, "xs.9").is_not_found());
        assert!(!Error::protected(Origin::FromNone).is_not_found());
    }

    #[test]
    fn messages_name_the_path() {
        let err = Error::missing_segment("email", "user.email.domain");
        let text = err.to_string();
        assert!(text.contains("email"));
        assert!(text.contains("user.email.domain"));
    }
}
