use crate::value::Value;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Typed failure returned by every fallible mapping operation.
/// Decoding is binary: it either yields a fully valid value or one of these.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("decode error: {reason}")]
    Decode { reason: String },

    #[error("invalid {kind} key for entity '{entity}': {reason}")]
    InvalidKey {
        entity: &'static str,
        kind: &'static str,
        reason: String,
    },

    #[error("missing identity entry '{field}'")]
    MissingIdentity { field: &'static str },

    #[error("malformed entity: {reason}")]
    MalformedEntity { reason: String },

    #[error("invalid update: {reason}")]
    InvalidUpdate { reason: String },

    #[error("unsupported: {reason}")]
    Unsupported { reason: String },

    #[error("serialize error: {reason}")]
    Serialize { reason: String },
}

impl Error {
    /// Tag mismatch between a decoded value and the expected type label.
    #[must_use]
    pub const fn type_mismatch(expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.tag().label(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEntity {
            reason: reason.into(),
        }
    }

    pub fn invalid_update(reason: impl Into<String>) -> Self {
        Self::InvalidUpdate {
            reason: reason.into(),
        }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    /// Prefix a field-level failure with the field it came from.
    ///
    /// Every variant other than `Decode` is folded into a `Decode` reason so
    /// record decoding reports one error category.
    #[must_use]
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Self::Decode { reason } => Self::decode(format!("field '{field}': {reason}")),
            other => Self::decode(format!("field '{field}': {other}")),
        }
    }

    /// Return a stable error kind independent of message text.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidKey { .. } => ErrorKind::InvalidKey,
            Self::MissingIdentity { .. } => ErrorKind::MissingIdentity,
            Self::MalformedEntity { .. } => ErrorKind::MalformedEntity,
            Self::InvalidUpdate { .. } => ErrorKind::InvalidUpdate,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Serialize { .. } => ErrorKind::Serialize,
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize {
            reason: err.to_string(),
        }
    }
}

///
/// ErrorKind
///
/// Stable error-kind taxonomy for mapping failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    TypeMismatch,
    Decode,
    InvalidKey,
    MissingIdentity,
    MalformedEntity,
    InvalidUpdate,
    Unsupported,
    Serialize,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::Decode => "decode",
            Self::InvalidKey => "invalid_key",
            Self::MissingIdentity => "missing_identity",
            Self::MalformedEntity => "malformed_entity",
            Self::InvalidUpdate => "invalid_update",
            Self::Unsupported => "unsupported",
            Self::Serialize => "serialize",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
