use crate::value::Value;
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// Total canonical comparator: variant rank first, then in-variant order.
///
/// Floats order by IEEE total order, so `NaN` and signed zeros are
/// distinct, comparable values here.
#[must_use]
pub(super) fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.tag().cmp(&right.tag());
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => cmp_lists(a, b),
        (Value::Map(a), Value::Map(b)) => cmp_maps(a, b),
        (Value::Native(a), Value::Native(b)) => a.cmp(b),

        // Null == Null; other same-rank pairs are unreachable.
        _ => Ordering::Equal,
    }
}

fn cmp_lists(left: &[Value], right: &[Value]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        let cmp = canonical_cmp(a, b);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn cmp_maps(left: &[(String, Value)], right: &[(String, Value)]) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right) {
        let cmp = left_key
            .cmp(right_key)
            .then_with(|| canonical_cmp(left_value, right_value));
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

/// Hash consistent with `canonical_cmp`: equal values hash equally.
pub(super) fn canonical_hash<H: Hasher>(value: &Value, state: &mut H) {
    state.write_u8(value.tag().to_u8());

    match value {
        Value::Null => {}
        Value::Bool(v) => v.hash(state),
        Value::Int(v) => v.hash(state),
        Value::Float(v) => v.to_bits().hash(state),
        Value::Text(v) => v.hash(state),
        Value::Bytes(v) => v.hash(state),
        Value::Timestamp(v) => v.hash(state),
        Value::List(items) => {
            items.len().hash(state);
            for item in items {
                canonical_hash(item, state);
            }
        }
        Value::Map(entries) => {
            entries.len().hash(state);
            for (key, item) in entries {
                key.hash(state);
                canonical_hash(item, state);
            }
        }
        Value::Native(v) => v.hash(state),
    }
}
