use crate::{
    ENTITY_ID_FIELD, ENTITY_KEY_FIELD, ENTITY_VALUE_FIELD,
    entity::Entity,
    error::Error,
    key::{HasKey, KeyKind, PrimaryKey},
    traits::Record,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value as JsonValue};

impl<R> Entity<R>
where
    R: HasKey<<R as Record>::KeyKind> + Serialize,
{
    /// `{ "key": <key>, "value": <record> }`
    pub fn to_json_nested(&self) -> Result<JsonValue, Error> {
        let mut object = Map::new();
        object.insert(ENTITY_KEY_FIELD.to_string(), serde_json::to_value(&self.key)?);
        object.insert(ENTITY_VALUE_FIELD.to_string(), serde_json::to_value(&self.record)?);

        Ok(JsonValue::Object(object))
    }

    /// The record's JSON with the key under [`ENTITY_ID_FIELD`].
    ///
    /// A record that does not serialize to an object is returned as is and
    /// the key is dropped.
    pub fn to_json_flat(&self) -> Result<JsonValue, Error> {
        let mut json = serde_json::to_value(&self.record)?;
        if let JsonValue::Object(object) = &mut json {
            object.insert(ENTITY_ID_FIELD.to_string(), serde_json::to_value(&self.key)?);
        }

        Ok(json)
    }
}

impl<R> Entity<R>
where
    R: HasKey<<R as Record>::KeyKind> + DeserializeOwned,
{
    pub fn from_json_nested(json: JsonValue) -> Result<Self, Error> {
        let JsonValue::Object(mut object) = json else {
            return Err(not_an_object::<R>("nested"));
        };

        let key = take_field::<R>(&mut object, ENTITY_KEY_FIELD)?;
        let value = take_field::<R>(&mut object, ENTITY_VALUE_FIELD)?;

        Ok(Self::new(decode_key(key)?, decode_record(value)?))
    }

    /// The whole object decodes as the record, so the record decoder must
    /// accept the extra [`ENTITY_ID_FIELD`] entry.
    pub fn from_json_flat(json: JsonValue) -> Result<Self, Error> {
        let JsonValue::Object(object) = &json else {
            return Err(not_an_object::<R>("flattened"));
        };
        let Some(id) = object.get(ENTITY_ID_FIELD).cloned() else {
            return Err(missing_field::<R>(ENTITY_ID_FIELD));
        };

        Ok(Self::new(decode_key(id)?, decode_record(json)?))
    }
}

fn take_field<R: Record>(
    object: &mut Map<String, JsonValue>,
    field: &str,
) -> Result<JsonValue, Error> {
    object.remove(field).ok_or_else(|| missing_field::<R>(field))
}

fn decode_key<R>(json: JsonValue) -> Result<PrimaryKey<R>, Error>
where
    R: HasKey<<R as Record>::KeyKind>,
{
    serde_json::from_value(json).map_err(|err| {
        tracing::debug!(entity = R::descriptor().name, %err, "json key decode failed");

        Error::InvalidKey {
            entity: R::descriptor().name,
            kind: <R::KeyKind as KeyKind>::LABEL,
            reason: err.to_string(),
        }
    })
}

fn decode_record<R>(json: JsonValue) -> Result<R, Error>
where
    R: Record + DeserializeOwned,
{
    serde_json::from_value(json).map_err(|err| {
        tracing::debug!(entity = R::descriptor().name, %err, "json record decode failed");

        Error::decode(format!("record '{}': {err}", R::descriptor().name))
    })
}

fn not_an_object<R: Record>(form: &str) -> Error {
    Error::malformed(format!(
        "{form} entity '{}' must be a JSON object",
        R::descriptor().name
    ))
}

fn missing_field<R: Record>(field: &str) -> Error {
    Error::malformed(format!(
        "entity '{}' is missing '{field}'",
        R::descriptor().name
    ))
}
