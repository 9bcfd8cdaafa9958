mod kind;


use crate::{
    error::Error,
    model::unique::UniqueConstraint,
    traits::{FieldValue, Record},
    types::Timestamp,
    value::Value,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

pub use kind::{Generated, KeyKind, Natural, Unique};

///
/// HasKey
///
/// Associates a record with the representation of one of its key kinds.
///
/// ## Semantics
/// - Implemented by generated code, once per (record, kind) pair
/// - `Repr` must round-trip losslessly through `Value`
/// - The key serializes exactly like `Repr`
///

pub trait HasKey<K: KeyKind>: Record {
    type Repr: FieldValue + Serialize + DeserializeOwned;
}

/// The one canonical primary-key type of a record.
pub type PrimaryKey<R> = Key<R, <R as Record>::KeyKind>;

///
/// Key
///
/// Typed identifier for record `R` under key kind `K`.
/// Holds the key's canonical `Value`; equality, ordering, hashing, display
/// and parsing are all structural over that value.
///

pub struct Key<R, K> {
    value: Value,
    _marker: PhantomData<fn() -> (R, K)>,
}

impl<R, K> Key<R, K> {
    const fn from_canonical(value: Value) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.value
    }

    /// keyToValue: total and deterministic.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.value.clone()
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl<R, K> Key<R, K>
where
    R: HasKey<K>,
    K: KeyKind,
{
    /// Construct a key from its typed representation.
    pub fn new(repr: <R as HasKey<K>>::Repr) -> Self {
        Self::from_canonical(repr.to_value())
    }

    /// valueToKey: fails with `InvalidKey` when `value` does not decode as
    /// this record's key representation.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        match <R as HasKey<K>>::Repr::from_value(&value) {
            Ok(repr) => Ok(Self::new(repr)),
            Err(err) => {
                tracing::debug!(
                    entity = R::descriptor().name,
                    kind = K::LABEL,
                    %err,
                    "key decode failed"
                );

                Err(Self::invalid(err.to_string()))
            }
        }
    }

    /// Typed view of the key.
    pub fn repr(&self) -> Result<<R as HasKey<K>>::Repr, Error> {
        <R as HasKey<K>>::Repr::from_value(&self.value)
            .map_err(|err| Self::invalid(err.to_string()))
    }

    fn invalid(reason: String) -> Error {
        Error::InvalidKey {
            entity: R::descriptor().name,
            kind: K::LABEL,
            reason,
        }
    }
}

impl<R> Key<R, Unique>
where
    R: HasKey<Unique>,
{
    /// Key named by one of the record's unique constraints.
    pub fn from_constraint(constraint: &UniqueConstraint) -> Result<Self, Error> {
        Self::from_value(constraint.to_value())
    }
}

impl<R, K> Clone for Key<R, K> {
    fn clone(&self) -> Self {
        Self::from_canonical(self.value.clone())
    }
}

impl<R, K> fmt::Debug for Key<R, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.value).finish()
    }
}

impl<R, K> fmt::Display for Key<R, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<R, K> PartialEq for Key<R, K> {
    fn eq(&self, other: &Self) -> bool {
        Value::canonical_eq(&self.value, &other.value)
    }
}

impl<R, K> Eq for Key<R, K> {}

impl<R, K> PartialOrd for Key<R, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R, K> Ord for Key<R, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        Value::canonical_cmp(&self.value, &other.value)
    }
}

impl<R, K> Hash for Key<R, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.canonical_hash(state);
    }
}

impl<R, K> From<Key<R, K>> for Value {
    fn from(key: Key<R, K>) -> Self {
        key.into_value()
    }
}

// Inverse of `Display` for scalar keys. Each scalar reading of the text is
// offered to the key's representation in turn (Int, Bool, Float, Timestamp,
// `0x` Bytes) and Text is the fallback. List and Map keys display in a
// form that does not parse back.
impl<R, K> FromStr for Key<R, K>
where
    R: HasKey<K>,
    K: KeyKind,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidates = [
            s.parse::<i64>().ok().map(Value::Int),
            s.parse::<bool>().ok().map(Value::Bool),
            s.parse::<f64>().ok().map(Value::Float),
            s.parse::<Timestamp>().ok().map(Value::Timestamp),
            parse_hex(s).map(Value::Bytes),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|value| <R as HasKey<K>>::Repr::from_value(&value).ok())
            .map_or_else(
                || Self::from_value(Value::Text(s.to_string())),
                |repr| Ok(Self::new(repr)),
            )
    }
}

fn parse_hex(s: &str) -> Option<Vec<u8>> {
    let digits = s.strip_prefix("0x")?;
    if digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok())
        .collect()
}

impl<R, K> FieldValue for Key<R, K>
where
    R: HasKey<K>,
    K: KeyKind,
{
    fn to_value(&self) -> Value {
        self.value.clone()
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        Self::from_value(value.clone())
    }
}

impl<R, K> Serialize for Key<R, K>
where
    R: HasKey<K>,
    K: KeyKind,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.repr()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de, R, K> Deserialize<'de> for Key<R, K>
where
    R: HasKey<K>,
    K: KeyKind,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = <R as HasKey<K>>::Repr::deserialize(deserializer)?;

        Ok(Self::new(repr))
    }
}
