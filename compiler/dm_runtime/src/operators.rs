//! Binary operator application.
//!
//! When the left operand is an object, the operator is delegated to the
//! meta-object of its definition; an object without one supports no
//! operators. Otherwise DM's scalar semantics apply: `null` acts as `0` (or
//! as `""` next to a string), integer results that overflow become floats.

use crate::errors::RuntimeResult;
use crate::meta_object::MetaOperator;
use crate::value::DreamValue;

/// Apply `op` to `a` and `b`.
pub fn binary_operator(
    op: MetaOperator,
    a: &DreamValue,
    b: &DreamValue,
) -> RuntimeResult<DreamValue> {
    if let DreamValue::Object(object) = a {
        return match object.definition().meta_object() {
            Some(meta_object) => op.dispatch(meta_object.as_ref(), a, b),
            None => Err(op.unsupported(a)),
        };
    }

    match op {
        MetaOperator::Add | MetaOperator::Append => add(op, a, b),
        MetaOperator::Subtract | MetaOperator::Remove => arithmetic(
            op,
            a,
            b,
            i32::checked_sub,
            |x, y| x - y,
        ),
        MetaOperator::Combine => bitwise(op, a, b, |x, y| Some(x | y)),
        MetaOperator::Mask => bitwise(op, a, b, |x, y| Some(x & y)),
        MetaOperator::Output => bitwise(op, a, b, |x, y| {
            u32::try_from(y).ok().and_then(|shift| x.checked_shl(shift))
        }),
    }
}

fn add(op: MetaOperator, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
    match (a, b) {
        (DreamValue::String(x), DreamValue::String(y)) => {
            Ok(DreamValue::string(format!("{x}{y}")))
        }
        (DreamValue::String(_), DreamValue::Null) => Ok(a.clone()),
        (DreamValue::Null, DreamValue::String(_)) => Ok(b.clone()),
        _ => arithmetic(op, a, b, i32::checked_add, |x, y| x + y),
    }
}

/// `null` counts as `0` on either side of a numeric operator.
fn numeric(value: &DreamValue) -> Option<DreamValue> {
    match value {
        DreamValue::Null => Some(DreamValue::Integer(0)),
        DreamValue::Integer(_) | DreamValue::Float(_) => Some(value.clone()),
        _ => None,
    }
}

fn arithmetic(
    op: MetaOperator,
    a: &DreamValue,
    b: &DreamValue,
    integer: fn(i32, i32) -> Option<i32>,
    float: fn(f32, f32) -> f32,
) -> RuntimeResult<DreamValue> {
    let (Some(x), Some(y)) = (numeric(a), numeric(b)) else {
        return Err(op.unsupported(if numeric(a).is_none() { a } else { b }));
    };
    if let (DreamValue::Integer(x), DreamValue::Integer(y)) = (&x, &y) {
        if let Some(result) = integer(*x, *y) {
            return Ok(DreamValue::Integer(result));
        }
    }
    Ok(DreamValue::Float(float(x.as_float()?, y.as_float()?)))
}

fn bitwise(
    op: MetaOperator,
    a: &DreamValue,
    b: &DreamValue,
    apply: fn(i32, i32) -> Option<i32>,
) -> RuntimeResult<DreamValue> {
    let integer = |value: &DreamValue| match numeric(value) {
        Some(DreamValue::Integer(x)) => Some(x),
        _ => None,
    };
    match (integer(a), integer(b)) {
        (Some(x), Some(y)) => apply(x, y)
            .map(DreamValue::Integer)
            .ok_or_else(|| op.unsupported(b)),
        (None, _) => Err(op.unsupported(a)),
        (_, None) => Err(op.unsupported(b)),
    }
}
