use crate::value::Value;

///
/// ValueTag
///
/// Stable value-variant tag used by diagnostics and canonical ordering.
///
/// IMPORTANT:
/// Discriminants double as the cross-variant canonical rank and must not
/// be reordered.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Null = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    Text = 4,
    Bytes = 5,
    Timestamp = 6,
    List = 7,
    Map = 8,
    Native = 9,
}

impl ValueTag {
    /// Stable byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::Bytes => "Bytes",
            Self::Timestamp => "Timestamp",
            Self::List => "List",
            Self::Map => "Map",
            Self::Native => "Native",
        }
    }
}

#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Int(_) => ValueTag::Int,
        Value::Float(_) => ValueTag::Float,
        Value::Text(_) => ValueTag::Text,
        Value::Bytes(_) => ValueTag::Bytes,
        Value::Timestamp(_) => ValueTag::Timestamp,
        Value::List(_) => ValueTag::List,
        Value::Map(_) => ValueTag::Map,
        Value::Native(_) => ValueTag::Native,
    }
}
