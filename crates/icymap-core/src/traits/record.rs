use crate::{
    accessor::FieldLens,
    error::Error,
    key::KeyKind,
    model::{entity::EntityDescriptor, field::FieldDescriptor, unique::UniqueConstraint},
    traits::FieldValue,
    value::Value,
};
use std::vec;

///
/// Record
///
/// The persistable-record contract. Implemented by generated code for every
/// record type; everything else in the crate is generic over it.
///
/// ## Semantics
/// - `to_values` yields one value per non-identity field, in descriptor order
/// - `from_values` is a left inverse of `to_values`
/// - `KeyKind` picks the canonical primary key (`PrimaryKey<Self>`)
///

pub trait Record: Clone + Sized + 'static {
    type KeyKind: KeyKind;

    fn descriptor() -> &'static EntityDescriptor;

    fn to_values(&self) -> Vec<Value>;

    fn from_values(values: Vec<Value>) -> Result<Self, Error>;

    fn unique_constraints(&self) -> Vec<UniqueConstraint> {
        Vec::new()
    }

    /// Value-level accessor for one field, identity included.
    fn field_accessor(field: &FieldDescriptor) -> Option<&'static dyn FieldLens<Self>>;

    /// Generic form: a `Map` of storage name to value, in descriptor order.
    fn to_value(&self) -> Value {
        let fields = Self::descriptor()
            .value_fields()
            .map(|field| field.storage_name.to_string());

        Value::Map(fields.zip(self.to_values()).collect())
    }

    /// Inverse of `to_value`.
    ///
    /// Fields are looked up by storage name; absent fields decode from
    /// `Null` and unknown entries are ignored.
    fn from_value(value: Value) -> Result<Self, Error> {
        let descriptor = Self::descriptor();
        let Value::Map(mut entries) = value else {
            return Err(Error::decode(format!(
                "record '{}' expects a Map, found {}",
                descriptor.name,
                value.tag().label()
            )));
        };

        let values = descriptor
            .value_fields()
            .map(|field| {
                entries
                    .iter()
                    .position(|(name, _)| name == field.storage_name)
                    .map_or(Value::Null, |i| entries.swap_remove(i).1)
            })
            .collect();

        Self::from_values(values).inspect_err(|err| {
            tracing::debug!(record = descriptor.name, %err, "record decode failed");
        })
    }
}

///
/// RecordReader
///
/// Sequential decoder for `Record::from_values` implementations.
/// Checks arity up front and tags every failure with the field name.
///

pub struct RecordReader {
    descriptor: &'static EntityDescriptor,
    fields: Vec<&'static FieldDescriptor>,
    values: vec::IntoIter<Value>,
    position: usize,
}

impl RecordReader {
    pub fn new(descriptor: &'static EntityDescriptor, values: Vec<Value>) -> Result<Self, Error> {
        let fields: Vec<_> = descriptor.value_fields().collect();
        if fields.len() != values.len() {
            return Err(Error::decode(format!(
                "record '{}' expects {} values, found {}",
                descriptor.name,
                fields.len(),
                values.len()
            )));
        }

        Ok(Self {
            descriptor,
            fields,
            values: values.into_iter(),
            position: 0,
        })
    }

    /// Decode the next field in descriptor order.
    pub fn read<T: FieldValue>(&mut self) -> Result<T, Error> {
        let field = self.fields.get(self.position).copied();
        let (Some(field), Some(value)) = (field, self.values.next()) else {
            return Err(Error::decode(format!(
                "record '{}' read past its last field",
                self.descriptor.name
            )));
        };
        self.position += 1;

        T::from_value(&value).map_err(|err| err.in_field(field.name))
    }
}
