//! ## Crate layout
//! - `core`: value model, keys, the record contract, accessors, query values
//!   and the entity wire forms.
//!
//! The `prelude` module is what generated record code and application code
//! import; everything else is reached through `core`.

pub use icymap_core as core;

/// re-exports
///
/// generated code can use these, stops the user having to specify all the
/// dependencies in the Cargo.toml file manually
pub mod __reexports {
    pub use serde;
    #[cfg(feature = "json")]
    pub use serde_json;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{
    ENTITY_ID_FIELD, ENTITY_KEY_FIELD, ENTITY_VALUE_FIELD, IDENTITY_FIELD,
    error::{Error, ErrorKind},
};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        accessor::{Field, FieldLens as _, FieldRef},
        entity::Entity,
        key::{Generated, HasKey, Key, KeyKind as _, Natural, PrimaryKey, Unique},
        model::{
            entity::EntityDescriptor,
            field::{FieldDescriptor, FieldKind},
            unique::{UniqueConstraint, UniqueDescriptor},
        },
        query::{Filter, SelectOption, SelectWindow, Update},
        traits::{FieldValue, Record, RecordReader},
        types::*,
        value::Value,
    };
    pub use serde::{Deserialize, Serialize};
}
