//! Error types for JSON decoding and encoding.

use std::fmt::{self, Display};

/// Error type for JSON operations.
#[derive(Debug)]
pub struct Error {
    /// The specific kind of error.
    pub kind: ErrorKind,
}

/// Specific error kinds for JSON operations.
#[derive(Debug)]
pub enum ErrorKind {
    /// The input was not valid JSON.
    Decode(serde_json::Error),
    /// The value graph could not be written out, most commonly because it
    /// is cyclic and hit the recursion limit.
    Encode(serde_json::Error),
    /// Decoding succeeded but the document root was not a JSON object.
    NotAnObject {
        /// The kind of value the document root decoded to.
        actual: &'static str,
    },
}

impl Error {
    pub(crate) fn decode(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Decode(err),
        }
    }

    pub(crate) fn encode(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Encode(err),
        }
    }

    pub(crate) fn not_an_object(actual: &'static str) -> Self {
        Error {
            kind: ErrorKind::NotAnObject { actual },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Decode(err) => write!(f, "invalid JSON: {err}"),
            ErrorKind::Encode(err) => write!(f, "cannot encode value graph: {err}"),
            ErrorKind::NotAnObject { actual } => {
                write!(f, "expected a JSON object at the document root, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Decode(err) | ErrorKind::Encode(err) => Some(err),
            ErrorKind::NotAnObject { .. } => None,
        }
    }
}
