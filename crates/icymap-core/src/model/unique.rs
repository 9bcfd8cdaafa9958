use crate::{model::field::FieldDescriptor, value::Value};

///
/// UniqueDescriptor
/// Static metadata for a uniqueness rule distinct from the primary key.
/// Field order is significant.
///

#[derive(Debug, Eq, PartialEq)]
pub struct UniqueDescriptor {
    pub name: &'static str,
    pub fields: &'static [&'static FieldDescriptor],
}

impl UniqueDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [&'static FieldDescriptor]) -> Self {
        Self { name, fields }
    }
}

///
/// UniqueConstraint
///
/// One record's values for one unique rule: a name plus ordered
/// (field, value) pairs.
///

#[derive(Clone, Debug, PartialEq)]
pub struct UniqueConstraint {
    name: &'static str,
    fields: Vec<(&'static FieldDescriptor, Value)>,
}

impl UniqueConstraint {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Build a constraint instance from its descriptor and values in
    /// descriptor order. Returns `None` on an arity mismatch.
    #[must_use]
    pub fn from_descriptor(
        descriptor: &'static UniqueDescriptor,
        values: Vec<Value>,
    ) -> Option<Self> {
        if descriptor.fields.len() != values.len() {
            return None;
        }

        Some(Self {
            name: descriptor.name,
            fields: descriptor.fields.iter().copied().zip(values).collect(),
        })
    }

    #[must_use]
    pub fn with(mut self, field: &'static FieldDescriptor, value: impl Into<Value>) -> Self {
        self.fields.push((field, value.into()));
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[(&'static FieldDescriptor, Value)] {
        &self.fields
    }

    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.fields.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Generic form: a single-field constraint is its value, anything else
    /// is the ordered list of its values.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self.fields.as_slice() {
            [(_, value)] => value.clone(),
            fields => Value::List(fields.iter().map(|(_, v)| v.clone()).collect()),
        }
    }
}
