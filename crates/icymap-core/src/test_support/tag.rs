use crate::{
    accessor::{Field, FieldLens},
    error::Error,
    key::{HasKey, Natural},
    model::{
        entity::EntityDescriptor,
        field::{FieldDescriptor, FieldKind},
    },
    traits::{FieldValue, Record, RecordReader},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Tag
///
/// Natural-keyed record whose JSON is a bare string.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Tag(pub String);

pub(crate) static SLUG_FIELD: FieldDescriptor =
    FieldDescriptor::new("slug", "slug", FieldKind::Key);
pub(crate) static LABEL_FIELD: FieldDescriptor =
    FieldDescriptor::new("label", "label", FieldKind::Text);

pub(crate) static TAG: EntityDescriptor = EntityDescriptor {
    name: "Tag",
    storage_name: "tags",
    identity: &SLUG_FIELD,
    fields: &[&SLUG_FIELD, &LABEL_FIELD],
    uniques: &[],
};

pub(crate) static LABEL: Field<Tag, String> = Field::new(
    &LABEL_FIELD,
    |e| e.record.0.clone(),
    |mut e, label| {
        e.record.0 = label;
        e
    },
);

impl Record for Tag {
    type KeyKind = Natural;

    fn descriptor() -> &'static EntityDescriptor {
        &TAG
    }

    fn to_values(&self) -> Vec<Value> {
        vec![self.0.to_value()]
    }

    fn from_values(values: Vec<Value>) -> Result<Self, Error> {
        let mut reader = RecordReader::new(Self::descriptor(), values)?;

        Ok(Self(reader.read()?))
    }

    // no accessor for the slug: exercises the unsupported-lens path
    fn field_accessor(field: &FieldDescriptor) -> Option<&'static dyn FieldLens<Self>> {
        (field.name == LABEL_FIELD.name).then_some(&LABEL as &'static dyn FieldLens<Self>)
    }
}

impl HasKey<Natural> for Tag {
    type Repr = String;
}
