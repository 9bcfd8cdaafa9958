//! The (key, record) pair and its wire forms.
//!
//! Three encodings live here: the generic `Value` codec with its reserved
//! identity entry, and, behind the `json` feature, the nested and flattened
//! JSON forms. `Entity` itself serializes in the nested form.

mod codec;
#[cfg(feature = "json")]
mod json;


use crate::{
    ENTITY_KEY_FIELD, ENTITY_VALUE_FIELD,
    key::{HasKey, PrimaryKey},
    model::unique::UniqueConstraint,
    traits::Record,
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned, ser::SerializeStruct,
};
use std::fmt;

///
/// Entity
///
/// A record paired with its primary key. Plain data; both parts are public.
///

pub struct Entity<R: Record> {
    pub key: PrimaryKey<R>,
    pub record: R,
}

impl<R: Record> Entity<R> {
    #[must_use]
    pub const fn new(key: PrimaryKey<R>, record: R) -> Self {
        Self { key, record }
    }

    #[must_use]
    pub const fn key(&self) -> &PrimaryKey<R> {
        &self.key
    }

    #[must_use]
    pub const fn record(&self) -> &R {
        &self.record
    }

    #[must_use]
    pub fn into_parts(self) -> (PrimaryKey<R>, R) {
        (self.key, self.record)
    }

    #[must_use]
    pub fn unique_constraints(&self) -> Vec<UniqueConstraint> {
        self.record.unique_constraints()
    }
}

impl<R: Record> Clone for Entity<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            record: self.record.clone(),
        }
    }
}

impl<R: Record + fmt::Debug> fmt::Debug for Entity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("key", &self.key)
            .field("record", &self.record)
            .finish()
    }
}

impl<R: Record + PartialEq> PartialEq for Entity<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.record == other.record
    }
}

impl<R: Record + Eq> Eq for Entity<R> {}

///
/// SERDE
/// Nested form: `{ "key": <key>, "value": <record> }`.
///

impl<R> Serialize for Entity<R>
where
    R: HasKey<<R as Record>::KeyKind> + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Entity", 2)?;
        state.serialize_field(ENTITY_KEY_FIELD, &self.key)?;
        state.serialize_field(ENTITY_VALUE_FIELD, &self.record)?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(bound = "R: HasKey<<R as Record>::KeyKind> + DeserializeOwned")]
struct NestedEntity<R: Record> {
    key: PrimaryKey<R>,
    value: R,
}

impl<'de, R> Deserialize<'de> for Entity<R>
where
    R: HasKey<<R as Record>::KeyKind> + DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let NestedEntity { key, value } = NestedEntity::deserialize(deserializer)?;

        Ok(Self::new(key, value))
    }
}
