use crate::value::Value;

///
/// FieldDescriptor
/// Metadata for one field of one record type.
///
/// `name` is the application-level name, `storage_name` is what backends
/// store; the two diverge when a field is renamed in either layer.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub storage_name: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, storage_name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            storage_name,
            kind,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Whether `value` has a shape this field can hold.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        if value.is_null() {
            return self.nullable || matches!(self.kind, FieldKind::Any);
        }

        self.kind.admits(value)
    }
}

///
/// FieldKind
///
/// Value shape expected for a field.
/// Aligned with `Value` variants; a lossy projection of the Rust field type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Text,
    Bytes,
    Timestamp,
    Native,

    // Collections
    List(&'static Self),
    Map(&'static Self),

    /// Identity or reference to another record; shape is decided by the key.
    Key,

    /// Untyped `Value` field.
    Any,
}

impl FieldKind {
    /// Stable label used in type-mismatch diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::Bytes => "Bytes",
            Self::Timestamp => "Timestamp",
            Self::Native => "Native",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Key => "Key",
            Self::Any => "Any",
        }
    }

    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any | Self::Key, _)
            | (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Text, Value::Text(_))
            | (Self::Bytes, Value::Bytes(_))
            | (Self::Timestamp, Value::Timestamp(_))
            | (Self::Native, Value::Native(_)) => true,
            (Self::List(item), Value::List(items)) => items.iter().all(|v| item.admits(v)),
            (Self::Map(item), Value::Map(entries)) => entries.iter().all(|(_, v)| item.admits(v)),

            _ => false,
        }
    }
}
