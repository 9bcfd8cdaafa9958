use crate::{
    accessor::{Field, FieldLens},
    entity::Entity,
    error::Error,
    key::{Generated, HasKey, Key, PrimaryKey, Unique},
    model::{
        entity::EntityDescriptor,
        field::{FieldDescriptor, FieldKind},
        unique::{UniqueConstraint, UniqueDescriptor},
    },
    traits::{FieldValue, Record, RecordReader},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// User
///
/// Generated surrogate key, one renamed column and one nullable unique.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct User {
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
}

impl User {
    pub(crate) fn new(name: &str, age: i32, email: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            age,
            email: email.map(str::to_string),
        }
    }

    pub(crate) fn entity(id: i64, name: &str, age: i32) -> Entity<Self> {
        Entity::new(Key::new(id), Self::new(name, age, None))
    }
}

///
/// DESCRIPTORS
///

pub(crate) static ID_FIELD: FieldDescriptor = FieldDescriptor::new("id", "id", FieldKind::Key);
pub(crate) static NAME_FIELD: FieldDescriptor =
    FieldDescriptor::new("name", "name", FieldKind::Text);
pub(crate) static AGE_FIELD: FieldDescriptor =
    FieldDescriptor::new("age", "user_age", FieldKind::Int);
pub(crate) static EMAIL_FIELD: FieldDescriptor =
    FieldDescriptor::new("email", "email", FieldKind::Text).nullable();

pub(crate) static UNIQUE_EMAIL: UniqueDescriptor = UniqueDescriptor::new("email", &[&EMAIL_FIELD]);

pub(crate) static USER: EntityDescriptor = EntityDescriptor {
    name: "User",
    storage_name: "users",
    identity: &ID_FIELD,
    fields: &[&ID_FIELD, &NAME_FIELD, &AGE_FIELD, &EMAIL_FIELD],
    uniques: &[&UNIQUE_EMAIL],
};

///
/// ACCESSORS
///

pub(crate) static ID: Field<User, PrimaryKey<User>> = Field::new(
    &ID_FIELD,
    |e| e.key.clone(),
    |mut e, key| {
        e.key = key;
        e
    },
);

pub(crate) static NAME: Field<User, String> = Field::new(
    &NAME_FIELD,
    |e| e.record.name.clone(),
    |mut e, name| {
        e.record.name = name;
        e
    },
);

pub(crate) static AGE: Field<User, i32> = Field::new(
    &AGE_FIELD,
    |e| e.record.age,
    |mut e, age| {
        e.record.age = age;
        e
    },
);

pub(crate) static EMAIL: Field<User, Option<String>> = Field::new(
    &EMAIL_FIELD,
    |e| e.record.email.clone(),
    |mut e, email| {
        e.record.email = email;
        e
    },
);

impl Record for User {
    type KeyKind = Generated;

    fn descriptor() -> &'static EntityDescriptor {
        &USER
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.name.to_value(),
            self.age.to_value(),
            self.email.to_value(),
        ]
    }

    fn from_values(values: Vec<Value>) -> Result<Self, Error> {
        let mut reader = RecordReader::new(Self::descriptor(), values)?;

        Ok(Self {
            name: reader.read()?,
            age: reader.read()?,
            email: reader.read()?,
        })
    }

    fn unique_constraints(&self) -> Vec<UniqueConstraint> {
        UniqueConstraint::from_descriptor(&UNIQUE_EMAIL, vec![self.email.to_value()])
            .into_iter()
            .collect()
    }

    fn field_accessor(field: &FieldDescriptor) -> Option<&'static dyn FieldLens<Self>> {
        let lens: &'static dyn FieldLens<Self> = match field.name {
            "id" => &ID,
            "name" => &NAME,
            "age" => &AGE,
            "email" => &EMAIL,
            _ => return None,
        };

        Some(lens)
    }
}

impl HasKey<Generated> for User {
    type Repr = i64;
}

impl HasKey<Unique> for User {
    type Repr = String;
}
