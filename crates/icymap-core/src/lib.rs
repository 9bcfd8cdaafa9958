//! Core runtime for IcyMap: the value model, typed keys, the record
//! contract, field accessors, backend-neutral query values and the entity
//! wire forms. Everything a generated record needs, and nothing that talks
//! to a backend.

// public exports are one module level down
pub mod accessor;
pub mod entity;
pub mod error;
pub mod key;
pub mod model;
pub mod query;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Reserved map entry holding the key in the generic value codec.
pub const IDENTITY_FIELD: &str = "_id";

/// Object entry holding the key in the flattened JSON form.
pub const ENTITY_ID_FIELD: &str = "id";

/// Object entry holding the key in the nested JSON form.
pub const ENTITY_KEY_FIELD: &str = "key";

/// Object entry holding the record in the nested JSON form.
pub const ENTITY_VALUE_FIELD: &str = "value";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, codecs or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        accessor::{Field, FieldRef},
        entity::Entity,
        key::{Generated, HasKey, Key, KeyKind, Natural, PrimaryKey, Unique},
        model::{
            entity::EntityDescriptor,
            field::{FieldDescriptor, FieldKind},
            unique::{UniqueConstraint, UniqueDescriptor},
        },
        query::{Filter, SelectOption, Update},
        traits::{FieldValue, Record},
        value::Value,
    };
}
