//! Field identities and accessors.
//!
//! `Field<R, T>` is the typed handle generated per field: it names the field
//! and carries a getter and a wither over `Entity<R>`. Query values erase it
//! to `FieldRef<R>`; generic code reaches a field through the object-safe
//! `FieldLens<R>` returned by `Record::field_accessor`.


use crate::{
    entity::Entity,
    error::Error,
    model::field::FieldDescriptor,
    query::{Filter, FilterOp, FilterOperand, SelectOption, Update, UpdateOp},
    traits::{FieldValue, Record},
    value::Value,
};
use std::{fmt, marker::PhantomData};

///
/// FieldLens
///
/// Value-level, purely functional accessor over one field of an entity.
/// Writes return a new entity; the input is never modified.
///

pub trait FieldLens<R: Record>: Send + Sync {
    fn descriptor(&self) -> &'static FieldDescriptor;

    fn get_value(&self, entity: &Entity<R>) -> Value;

    fn set_value(&self, entity: &Entity<R>, value: &Value) -> Result<Entity<R>, Error>;
}

///
/// Field
///
/// Typed field identity plus lens. Declared once per field as a `static`
/// by generated code.
///

pub struct Field<R: Record, T> {
    descriptor: &'static FieldDescriptor,
    get: fn(&Entity<R>) -> T,
    with: fn(Entity<R>, T) -> Entity<R>,
}

impl<R: Record, T> Field<R, T> {
    #[must_use]
    pub const fn new(
        descriptor: &'static FieldDescriptor,
        get: fn(&Entity<R>) -> T,
        with: fn(Entity<R>, T) -> Entity<R>,
    ) -> Self {
        Self {
            descriptor,
            get,
            with,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    /// Type-erased identity of this field.
    #[must_use]
    pub const fn erased(&self) -> FieldRef<R> {
        FieldRef::new(self.descriptor)
    }

    pub fn get(&self, entity: &Entity<R>) -> T {
        (self.get)(entity)
    }

    /// Copy of `entity` with this field replaced.
    #[must_use]
    pub fn set(&self, entity: &Entity<R>, value: T) -> Entity<R> {
        (self.with)(entity.clone(), value)
    }

    /// Consuming variant of [`set`](Self::set).
    #[must_use]
    pub fn with(&self, entity: Entity<R>, value: T) -> Entity<R> {
        (self.with)(entity, value)
    }
}

impl<R: Record, T: FieldValue> Field<R, T> {
    ///
    /// FILTERS
    ///

    fn point(&self, op: FilterOp, value: &T) -> Filter<R> {
        Filter::field(self.erased(), op, FilterOperand::Single(value.to_value()))
    }

    fn membership(&self, op: FilterOp, values: impl IntoIterator<Item = T>) -> Filter<R> {
        let values = values.into_iter().map(|v| v.to_value()).collect();

        Filter::field(self.erased(), op, FilterOperand::Many(values))
    }

    #[must_use]
    pub fn eq(&self, value: T) -> Filter<R> {
        self.point(FilterOp::Eq, &value)
    }

    #[must_use]
    pub fn ne(&self, value: T) -> Filter<R> {
        self.point(FilterOp::Ne, &value)
    }

    #[must_use]
    pub fn lt(&self, value: T) -> Filter<R> {
        self.point(FilterOp::Lt, &value)
    }

    #[must_use]
    pub fn le(&self, value: T) -> Filter<R> {
        self.point(FilterOp::Le, &value)
    }

    #[must_use]
    pub fn gt(&self, value: T) -> Filter<R> {
        self.point(FilterOp::Gt, &value)
    }

    #[must_use]
    pub fn ge(&self, value: T) -> Filter<R> {
        self.point(FilterOp::Ge, &value)
    }

    #[must_use]
    pub fn in_(&self, values: impl IntoIterator<Item = T>) -> Filter<R> {
        self.membership(FilterOp::In, values)
    }

    #[must_use]
    pub fn not_in(&self, values: impl IntoIterator<Item = T>) -> Filter<R> {
        self.membership(FilterOp::NotIn, values)
    }

    ///
    /// UPDATES
    ///

    #[must_use]
    pub fn assign(&self, value: T) -> Update<R> {
        Update::new(self.erased(), value.to_value(), UpdateOp::Assign)
    }

    #[must_use]
    pub fn add(&self, value: T) -> Update<R> {
        Update::new(self.erased(), value.to_value(), UpdateOp::Add)
    }

    #[must_use]
    pub fn subtract(&self, value: T) -> Update<R> {
        Update::new(self.erased(), value.to_value(), UpdateOp::Subtract)
    }

    #[must_use]
    pub fn multiply(&self, value: T) -> Update<R> {
        Update::new(self.erased(), value.to_value(), UpdateOp::Multiply)
    }

    #[must_use]
    pub fn divide(&self, value: T) -> Update<R> {
        Update::new(self.erased(), value.to_value(), UpdateOp::Divide)
    }

    ///
    /// ORDERING
    ///

    #[must_use]
    pub const fn asc(&self) -> SelectOption<R> {
        SelectOption::Asc(self.erased())
    }

    #[must_use]
    pub const fn desc(&self) -> SelectOption<R> {
        SelectOption::Desc(self.erased())
    }
}

impl<R: Record, T> Clone for Field<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record, T> Copy for Field<R, T> {}

impl<R: Record, T> fmt::Debug for Field<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.descriptor.name).finish()
    }
}

impl<R, T> FieldLens<R> for Field<R, T>
where
    R: Record,
    T: FieldValue,
{
    fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    fn get_value(&self, entity: &Entity<R>) -> Value {
        self.get(entity).to_value()
    }

    fn set_value(&self, entity: &Entity<R>, value: &Value) -> Result<Entity<R>, Error> {
        let value = T::from_value(value)?;

        Ok(self.set(entity, value))
    }
}

///
/// FieldRef
///
/// Type-erased field identity of record `R`, as stored in filters, updates
/// and select options.
///

pub struct FieldRef<R> {
    descriptor: &'static FieldDescriptor,
    _marker: PhantomData<fn() -> R>,
}

impl<R> FieldRef<R> {
    const fn new(descriptor: &'static FieldDescriptor) -> Self {
        Self {
            descriptor,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.descriptor.name
    }
}

impl<R: Record> FieldRef<R> {
    /// Erased identity for a descriptor of `R`; `None` for foreign fields.
    #[must_use]
    pub fn from_descriptor(descriptor: &'static FieldDescriptor) -> Option<Self> {
        R::descriptor()
            .contains(descriptor)
            .then_some(Self::new(descriptor))
    }

    /// The record's accessor for this field.
    pub fn lens(&self) -> Result<&'static dyn FieldLens<R>, Error> {
        R::field_accessor(self.descriptor).ok_or_else(|| {
            Error::unsupported(format!(
                "record '{}' has no accessor for field '{}'",
                R::descriptor().name,
                self.descriptor.name
            ))
        })
    }
}

impl<R> Clone for FieldRef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldRef<R> {}

impl<R> fmt::Debug for FieldRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRef").field(&self.descriptor.name).finish()
    }
}

impl<R> PartialEq for FieldRef<R> {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl<R> Eq for FieldRef<R> {}
