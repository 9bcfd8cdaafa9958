use crate::{
    accessor::FieldRef,
    entity::Entity,
    error::Error,
    model::unique::UniqueConstraint,
    query::normalize,
    traits::Record,
    value::Value,
};
use std::{
    any::Any,
    fmt,
    ops::{BitAnd, BitOr},
    slice,
    sync::Arc,
};

///
/// FilterOp
///
/// Comparison operator. The operator, not the operand's shape, decides
/// whether the operand is read as one value or as a list.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
}

impl FilterOp {
    /// Membership operators read their operand as a list.
    #[must_use]
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// FilterOperand
///

#[derive(Clone, Debug, PartialEq)]
pub enum FilterOperand {
    Single(Value),
    Many(Vec<Value>),
}

impl FilterOperand {
    /// Point-comparison view; a list operand compares as `Value::List`.
    #[must_use]
    pub fn as_single(&self) -> Value {
        match self {
            Self::Single(value) => value.clone(),
            Self::Many(values) => Value::List(values.clone()),
        }
    }

    /// Membership view; a single operand is a one-element list.
    #[must_use]
    pub fn as_many(&self) -> &[Value] {
        match self {
            Self::Single(value) => slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

///
/// FieldFilter
/// Single-field predicate: field, operator, operand.
///

pub struct FieldFilter<R> {
    field: FieldRef<R>,
    op: FilterOp,
    operand: FilterOperand,
}

impl<R> FieldFilter<R> {
    #[must_use]
    pub const fn new(field: FieldRef<R>, op: FilterOp, operand: FilterOperand) -> Self {
        Self { field, op, operand }
    }

    #[must_use]
    pub const fn field(&self) -> FieldRef<R> {
        self.field
    }

    #[must_use]
    pub const fn op(&self) -> FilterOp {
        self.op
    }

    #[must_use]
    pub const fn operand(&self) -> &FilterOperand {
        &self.operand
    }

    /// Evaluate against a field value under canonical value semantics.
    ///
    /// Ordering comparisons across different value variants are false.
    #[must_use]
    pub fn test(&self, value: &Value) -> bool {
        let ordered = |want: fn(std::cmp::Ordering) -> bool| {
            value
                .partial_cmp(&self.operand.as_single())
                .is_some_and(want)
        };
        let member = || {
            self.operand
                .as_many()
                .iter()
                .any(|candidate| Value::canonical_eq(value, candidate))
        };

        match self.op {
            FilterOp::Eq => Value::canonical_eq(value, &self.operand.as_single()),
            FilterOp::Ne => !Value::canonical_eq(value, &self.operand.as_single()),
            FilterOp::Lt => ordered(std::cmp::Ordering::is_lt),
            FilterOp::Le => ordered(std::cmp::Ordering::is_le),
            FilterOp::Gt => ordered(std::cmp::Ordering::is_gt),
            FilterOp::Ge => ordered(std::cmp::Ordering::is_ge),
            FilterOp::In => member(),
            FilterOp::NotIn => !member(),
        }
    }
}

impl<R> Clone for FieldFilter<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            op: self.op,
            operand: self.operand.clone(),
        }
    }
}

impl<R> fmt::Debug for FieldFilter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldFilter")
            .field("field", &self.field)
            .field("op", &self.op)
            .field("operand", &self.operand)
            .finish()
    }
}

impl<R> PartialEq for FieldFilter<R> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.op == other.op && self.operand == other.operand
    }
}

///
/// BackendFilter
///
/// Opaque backend-specific predicate. The payload type is chosen by the
/// backend and recovered by downcasting; nothing here interprets it.
///

#[derive(Clone)]
pub struct BackendFilter(Arc<dyn Any + Send + Sync>);

impl BackendFilter {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Arc::new(payload))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for BackendFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BackendFilter(..)")
    }
}

// Opaque payloads compare by identity.
impl PartialEq for BackendFilter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

///
/// Filter
///
/// Backend-neutral predicate tree over records of type `R`.
///
/// `And(vec![])` is vacuously true and `Or(vec![])` vacuously false, so
/// dynamic filter sets compose without special cases.
///

pub enum Filter<R> {
    Field(FieldFilter<R>),
    Backend(BackendFilter),
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl<R> Filter<R> {
    /// The empty conjunction.
    #[must_use]
    pub const fn always() -> Self {
        Self::And(Vec::new())
    }

    /// The empty disjunction.
    #[must_use]
    pub const fn never() -> Self {
        Self::Or(Vec::new())
    }

    #[must_use]
    pub const fn and(filters: Vec<Self>) -> Self {
        Self::And(filters)
    }

    #[must_use]
    pub const fn or(filters: Vec<Self>) -> Self {
        Self::Or(filters)
    }

    #[must_use]
    pub const fn field(field: FieldRef<R>, op: FilterOp, operand: FilterOperand) -> Self {
        Self::Field(FieldFilter::new(field, op, operand))
    }

    pub fn backend<T: Any + Send + Sync>(payload: T) -> Self {
        Self::Backend(BackendFilter::new(payload))
    }

    #[must_use]
    pub const fn is_always(&self) -> bool {
        matches!(self, Self::And(children) if children.is_empty())
    }

    #[must_use]
    pub const fn is_never(&self) -> bool {
        matches!(self, Self::Or(children) if children.is_empty())
    }

    /// Canonical, logically equivalent form; see [`normalize`].
    #[must_use]
    pub fn normalize(&self) -> Self {
        normalize::normalize(self)
    }
}

impl<R: Record> Filter<R> {
    /// Equality conjunction selecting the record named by a unique constraint.
    pub fn from_unique(constraint: &UniqueConstraint) -> Result<Self, Error> {
        let children = constraint
            .fields()
            .iter()
            .map(|(descriptor, value)| {
                let field = FieldRef::from_descriptor(descriptor).ok_or_else(|| {
                    Error::unsupported(format!(
                        "unique '{}' names field '{}' outside record '{}'",
                        constraint.name(),
                        descriptor.name,
                        R::descriptor().name
                    ))
                })?;

                Ok(Self::field(
                    field,
                    FilterOp::Eq,
                    FilterOperand::Single(value.clone()),
                ))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self::And(children))
    }

    /// Evaluate the filter in memory through the record's field accessors.
    pub fn matches(&self, entity: &Entity<R>) -> Result<bool, Error> {
        match self {
            Self::Field(filter) => {
                let value = filter.field().lens()?.get_value(entity);

                Ok(filter.test(&value))
            }
            Self::Backend(_) => Err(Error::unsupported(
                "backend filters cannot be evaluated in memory",
            )),
            Self::And(children) => {
                for child in children {
                    if !child.matches(entity)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(children) => {
                for child in children {
                    if child.matches(entity)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Check every operand against its field descriptor's declared shape.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Field(filter) => {
                let descriptor = filter.field().descriptor();
                let values = if filter.op().is_membership() {
                    filter.operand().as_many().to_vec()
                } else {
                    vec![filter.operand().as_single()]
                };

                match values.iter().find(|v| !descriptor.admits(v)) {
                    Some(bad) => Err(Error::type_mismatch(descriptor.kind.label(), bad)),
                    None => Ok(()),
                }
            }
            Self::Backend(_) => Ok(()),
            Self::And(children) | Self::Or(children) => {
                children.iter().try_for_each(Self::validate)
            }
        }
    }
}

impl<R> Clone for Filter<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(filter) => Self::Field(filter.clone()),
            Self::Backend(filter) => Self::Backend(filter.clone()),
            Self::And(children) => Self::And(children.clone()),
            Self::Or(children) => Self::Or(children.clone()),
        }
    }
}

impl<R> fmt::Debug for Filter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(filter) => f.debug_tuple("Field").field(filter).finish(),
            Self::Backend(filter) => f.debug_tuple("Backend").field(filter).finish(),
            Self::And(children) => f.debug_tuple("And").field(children).finish(),
            Self::Or(children) => f.debug_tuple("Or").field(children).finish(),
        }
    }
}

impl<R> PartialEq for Filter<R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Backend(a), Self::Backend(b)) => a == b,
            (Self::And(a), Self::And(b)) | (Self::Or(a), Self::Or(b)) => a == b,
            _ => false,
        }
    }
}

impl<R> BitAnd for Filter<R> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl<R> BitOr for Filter<R> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}
