use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// NativeValue
///
/// Opaque backend-native payload (object ids, dialect literals, ...).
/// The mapping layer carries it without interpretation; only the backend
/// named by `backend_type` knows how to read `bytes`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct NativeValue {
    pub backend_type: String,
    #[serde(with = "serde_bytes")]
    pub bytes: Vec<u8>,
}

impl NativeValue {
    #[must_use]
    pub fn new(backend_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            backend_type: backend_type.into(),
            bytes: bytes.into(),
        }
    }
}

impl Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.backend_type)?;
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}
