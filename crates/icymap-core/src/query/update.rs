use crate::{accessor::FieldRef, entity::Entity, error::Error, traits::Record, value::Value};
use derive_more::Display;
use std::fmt;

///
/// UpdateOp
///
/// `Backend` carries an operator name only the target backend understands.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum UpdateOp {
    #[display("assign")]
    Assign,
    #[display("add")]
    Add,
    #[display("subtract")]
    Subtract,
    #[display("multiply")]
    Multiply,
    #[display("divide")]
    Divide,
    #[display("backend({_0})")]
    Backend(String),
}

///
/// Update
/// One field modification: field, operand, operator.
///

pub struct Update<R> {
    field: FieldRef<R>,
    value: Value,
    op: UpdateOp,
}

impl<R> Update<R> {
    #[must_use]
    pub const fn new(field: FieldRef<R>, value: Value, op: UpdateOp) -> Self {
        Self { field, value, op }
    }

    #[must_use]
    pub const fn field(&self) -> FieldRef<R> {
        self.field
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn op(&self) -> &UpdateOp {
        &self.op
    }
}

impl<R: Record> Update<R> {
    /// Apply to an in-memory entity, returning the modified copy.
    ///
    /// Arithmetic is checked and only defined for `Int` with `Int` and
    /// `Float` with `Float`.
    pub fn apply(&self, entity: &Entity<R>) -> Result<Entity<R>, Error> {
        let lens = self.field.lens()?;
        let current = lens.get_value(entity);

        let next = match &self.op {
            UpdateOp::Assign => self.value.clone(),
            UpdateOp::Add => {
                arithmetic(&self.op, &current, &self.value, i64::checked_add, |a, b| a + b)?
            }
            UpdateOp::Subtract => {
                arithmetic(&self.op, &current, &self.value, i64::checked_sub, |a, b| a - b)?
            }
            UpdateOp::Multiply => {
                arithmetic(&self.op, &current, &self.value, i64::checked_mul, |a, b| a * b)?
            }
            UpdateOp::Divide => {
                arithmetic(&self.op, &current, &self.value, i64::checked_div, |a, b| a / b)?
            }
            UpdateOp::Backend(name) => {
                return Err(Error::unsupported(format!(
                    "backend update '{name}' cannot be applied in memory"
                )));
            }
        };

        lens.set_value(entity, &next)
    }

    /// Apply a sequence of updates left to right.
    pub fn apply_all(updates: &[Self], entity: &Entity<R>) -> Result<Entity<R>, Error> {
        updates
            .iter()
            .try_fold(entity.clone(), |acc, update| update.apply(&acc))
    }
}

fn arithmetic(
    op: &UpdateOp,
    current: &Value,
    operand: &Value,
    int: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> Result<Value, Error> {
    match (current, operand) {
        (Value::Int(a), Value::Int(b)) => int(*a, *b).map(Value::Int).ok_or_else(|| {
            Error::invalid_update(format!("{op} of {a} and {b} overflows or divides by zero"))
        }),
        (Value::Float(a), Value::Float(b)) => {
            let result = float(*a, *b);

            // finite operands must give a finite result
            if result.is_finite() || !a.is_finite() || !b.is_finite() {
                Ok(Value::Float(result))
            } else {
                Err(Error::invalid_update(format!(
                    "{op} of {a} and {b} overflows or divides by zero"
                )))
            }
        }
        (Value::Int(_), other) => Err(Error::type_mismatch("Int", other)),
        (Value::Float(_), other) => Err(Error::type_mismatch("Float", other)),
        (other, _) => Err(Error::type_mismatch("Int or Float", other)),
    }
}

impl<R> Clone for Update<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            value: self.value.clone(),
            op: self.op.clone(),
        }
    }
}

impl<R> fmt::Debug for Update<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Update")
            .field("field", &self.field)
            .field("value", &self.value)
            .field("op", &self.op)
            .finish()
    }
}

impl<R> PartialEq for Update<R> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.value == other.value && self.op == other.op
    }
}
