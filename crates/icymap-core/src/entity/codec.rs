use crate::{
    IDENTITY_FIELD,
    entity::Entity,
    error::Error,
    key::{HasKey, PrimaryKey},
    traits::Record,
    value::Value,
};

impl<R: Record> Entity<R> {
    /// Generic form: the record's `Map` with the key prepended under
    /// [`IDENTITY_FIELD`].
    ///
    /// # Panics
    /// Panics if the record's `to_value` does not return a `Map`, or if the
    /// map already holds an [`IDENTITY_FIELD`] entry; either record violates
    /// the `Record` contract.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let name = R::descriptor().name;
        let Value::Map(fields) = self.record.to_value() else {
            tracing::error!(entity = name, "record encoder returned a non-map value");
            panic!("record '{name}' broke the Record contract: to_value must return a Map");
        };

        if fields.iter().any(|(field, _)| field == IDENTITY_FIELD) {
            tracing::error!(entity = name, "record encoder emitted the reserved identity entry");
            panic!("record '{name}' broke the Record contract: '{IDENTITY_FIELD}' is reserved");
        }

        let mut entries = Vec::with_capacity(fields.len() + 1);
        entries.push((IDENTITY_FIELD.to_string(), self.key.to_value()));
        entries.extend(fields);

        Value::Map(entries)
    }
}

impl<R> Entity<R>
where
    R: HasKey<<R as Record>::KeyKind>,
{
    /// Inverse of [`to_value`](Self::to_value).
    ///
    /// The identity entry may appear anywhere in the map but exactly once.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        decode_value(value).inspect_err(|err| {
            tracing::debug!(entity = R::descriptor().name, %err, "entity decode failed");
        })
    }
}

fn decode_value<R>(value: Value) -> Result<Entity<R>, Error>
where
    R: HasKey<<R as Record>::KeyKind>,
{
    let name = R::descriptor().name;
    let Value::Map(mut entries) = value else {
        return Err(Error::malformed(format!(
            "entity '{name}' expects a Map, found {}",
            value.tag().label()
        )));
    };

    let mut identities = entries
        .iter()
        .enumerate()
        .filter(|(_, (field, _))| field == IDENTITY_FIELD)
        .map(|(i, _)| i);

    let position = match (identities.next(), identities.next()) {
        (Some(i), None) => i,
        (None, _) => {
            return Err(Error::MissingIdentity {
                field: IDENTITY_FIELD,
            });
        }
        (Some(_), Some(_)) => {
            return Err(Error::malformed(format!(
                "entity '{name}' has more than one '{IDENTITY_FIELD}' entry"
            )));
        }
    };

    let (_, key) = entries.remove(position);
    let key = PrimaryKey::<R>::from_value(key)?;
    let record = R::from_value(Value::Map(entries))?;

    Ok(Entity::new(key, record))
}
