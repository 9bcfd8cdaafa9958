use crate::{
    error::Error,
    types::{NativeValue, Timestamp},
    value::Value,
};
use chrono::{DateTime, Utc};
use serde_bytes::ByteBuf;
use std::collections::BTreeMap;

///
/// FieldValue
///
/// Conversion boundary between Rust field types and `Value`.
///
/// `to_value` is total. `from_value` fails with `TypeMismatch` when the
/// tag is incompatible; there is no coercion across tags.
///

pub trait FieldValue: Sized {
    fn to_value(&self) -> Value;

    fn from_value(value: &Value) -> Result<Self, Error>;
}

// impl_field_value
#[macro_export]
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Result<Self, Error> {
                    match value {
                        Value::$variant(v) => (*v)
                            .try_into()
                            .map_err(|_| Error::type_mismatch(stringify!($type), value)),
                        other => Err(Error::type_mismatch(stringify!($type), other)),
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f64 => Float,
    Timestamp => Timestamp,
);

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            other => Err(Error::type_mismatch("String", other)),
        }
    }
}

impl FieldValue for ByteBuf {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Bytes(v) => Ok(Self::from(v.clone())),
            other => Err(Error::type_mismatch("Bytes", other)),
        }
    }
}

impl FieldValue for NativeValue {
    fn to_value(&self) -> Value {
        Value::Native(self.clone())
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Native(v) => Ok(v.clone()),
            other => Err(Error::type_mismatch("Native", other)),
        }
    }
}

impl FieldValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(Timestamp::from(*self))
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Timestamp(ts) => ts
                .to_datetime()
                .ok_or_else(|| Error::type_mismatch("DateTime<Utc>", value)),
            other => Err(Error::type_mismatch("DateTime<Utc>", other)),
        }
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        Ok(value.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        if value.is_null() {
            return Ok(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        T::from_value(value).map(Self::new)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        let Value::List(items) = value else {
            return Err(Error::type_mismatch("List", value));
        };

        items.iter().map(T::from_value).collect()
    }
}

impl<T: FieldValue> FieldValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        let Value::Map(entries) = value else {
            return Err(Error::type_mismatch("Map", value));
        };

        entries
            .iter()
            .map(|(key, value)| T::from_value(value).map(|v| (key.clone(), v)))
            .collect()
    }
}
