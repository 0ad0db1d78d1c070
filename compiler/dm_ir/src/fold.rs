//! Constant folding.
//!
//! Evaluates expressions made only of constants at compile time, so that
//! `var/max_health = 10 * 5` stores `50` in the compiled definition instead
//! of an initialisation expression.
//!
//! Written as one exhaustive `match` over `Expr`: a new expression variant
//! must be classified here before the crate compiles.
//!
//! Arithmetic follows DM runtime semantics: integers stay integers while the
//! result is exact and in range, otherwise the result is a float. Logical
//! operators return one of their operands, and comparisons yield `1` or `0`.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::{ensure_sufficient_stack, DreamPath};

/// A folded constant.
#[derive(Clone, PartialEq, Debug)]
pub enum Constant {
    Null,
    Integer(i32),
    Float(f32),
    String(String),
    Resource(String),
    Path(DreamPath),
}

impl Constant {
    /// DM truthiness: `null`, `0` and `""` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Constant::Null => false,
            Constant::Integer(value) => *value != 0,
            Constant::Float(value) => *value != 0.0,
            Constant::String(value) => !value.is_empty(),
            Constant::Resource(_) | Constant::Path(_) => true,
        }
    }

    /// Convert back to a constant expression.
    pub fn into_expr(self) -> Expr {
        match self {
            Constant::Null => Expr::Null,
            Constant::Integer(value) => Expr::Integer(value),
            Constant::Float(value) => Expr::float(value),
            Constant::String(value) => Expr::String(value),
            Constant::Resource(value) => Expr::Resource(value),
            Constant::Path(value) => Expr::Path(value),
        }
    }

    fn as_float(&self) -> Option<f32> {
        match self {
            #[expect(
                clippy::cast_precision_loss,
                reason = "DM numbers are single-precision floats"
            )]
            Constant::Integer(value) => Some(*value as f32),
            Constant::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn as_integer(&self) -> Option<i32> {
        match self {
            Constant::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

fn truth(value: bool) -> Constant {
    Constant::Integer(i32::from(value))
}

/// Fold `expr` to a constant, or `None` if it depends on runtime state.
pub fn fold_constant(expr: &Expr) -> Option<Constant> {
    ensure_sufficient_stack(|| match expr {
        Expr::Integer(value) => Some(Constant::Integer(*value)),
        Expr::Float(bits) => Some(Constant::Float(f32::from_bits(*bits))),
        Expr::String(value) => Some(Constant::String(value.clone())),
        Expr::Resource(value) => Some(Constant::Resource(value.clone())),
        Expr::Null => Some(Constant::Null),
        Expr::Path(path) => Some(Constant::Path(path.clone())),

        Expr::Unary { op, operand } => fold_unary(*op, operand),
        Expr::Binary { op, lhs, rhs } => fold_binary(*op, lhs, rhs),
        Expr::Ternary {
            condition,
            if_true,
            if_false,
        } => {
            if fold_constant(condition)?.is_truthy() {
                fold_constant(if_true)
            } else {
                fold_constant(if_false)
            }
        }

        Expr::Identifier(_)
        | Expr::StringFormat { .. }
        | Expr::List(_)
        | Expr::Input { .. }
        | Expr::Initial(_)
        | Expr::IsType { .. }
        | Expr::ImplicitIsType(_)
        | Expr::LocateCoordinates { .. }
        | Expr::Locate { .. }
        | Expr::Call { .. }
        | Expr::Assign { .. }
        | Expr::New { .. }
        | Expr::In { .. }
        | Expr::ListIndex { .. }
        | Expr::ProcCall { .. }
        | Expr::Dereference(_)
        | Expr::Callable(_) => None,
    })
}

fn fold_unary(op: UnaryOp, operand: &Expr) -> Option<Constant> {
    match op {
        UnaryOp::Not => Some(truth(!fold_constant(operand)?.is_truthy())),
        UnaryOp::Negate => match fold_constant(operand)? {
            Constant::Integer(value) => Some(match value.checked_neg() {
                Some(negated) => Constant::Integer(negated),
                None => Constant::Float(-f64_to_f32(f64::from(value))),
            }),
            Constant::Float(value) => Some(Constant::Float(-value)),
            _ => None,
        },
        UnaryOp::BitNot => fold_constant(operand)?
            .as_integer()
            .map(|value| Constant::Integer(!value)),
        // Increments write back to their operand, which is never a constant.
        UnaryOp::PreIncrement
        | UnaryOp::PreDecrement
        | UnaryOp::PostIncrement
        | UnaryOp::PostDecrement => None,
    }
}

fn fold_binary(op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Option<Constant> {
    let lhs = fold_constant(lhs)?;

    // Short-circuit operators only need the right side when it is selected.
    match op {
        BinaryOp::And => {
            return if lhs.is_truthy() {
                fold_constant(rhs)
            } else {
                Some(lhs)
            };
        }
        BinaryOp::Or => {
            return if lhs.is_truthy() {
                Some(lhs)
            } else {
                fold_constant(rhs)
            };
        }
        _ => {}
    }

    let rhs = fold_constant(rhs)?;
    match op {
        BinaryOp::Equal => Some(truth(constants_equal(&lhs, &rhs))),
        BinaryOp::NotEqual => Some(truth(!constants_equal(&lhs, &rhs))),
        BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual => fold_comparison(op, &lhs, &rhs),
        BinaryOp::Add => match (&lhs, &rhs) {
            (Constant::String(a), Constant::String(b)) => Some(Constant::String(format!("{a}{b}"))),
            _ => fold_arithmetic(op, &lhs, &rhs),
        },
        BinaryOp::Subtract
        | BinaryOp::Multiply
        | BinaryOp::Divide
        | BinaryOp::Modulus
        | BinaryOp::Power => fold_arithmetic(op, &lhs, &rhs),
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::LeftShift
        | BinaryOp::RightShift => fold_bitwise(op, lhs.as_integer()?, rhs.as_integer()?),
        BinaryOp::And | BinaryOp::Or => None,
    }
}

/// Numbers compare by value regardless of representation.
fn constants_equal(lhs: &Constant, rhs: &Constant) -> bool {
    match (lhs.as_float(), rhs.as_float()) {
        (Some(a), Some(b)) => a == b,
        _ => lhs == rhs,
    }
}

fn fold_comparison(op: BinaryOp, lhs: &Constant, rhs: &Constant) -> Option<Constant> {
    let ordering = match (lhs, rhs) {
        (Constant::String(a), Constant::String(b)) => a.partial_cmp(b)?,
        _ => lhs.as_float()?.partial_cmp(&rhs.as_float()?)?,
    };
    Some(truth(match op {
        BinaryOp::LessThan => ordering.is_lt(),
        BinaryOp::LessThanOrEqual => ordering.is_le(),
        BinaryOp::GreaterThan => ordering.is_gt(),
        _ => ordering.is_ge(),
    }))
}

fn fold_arithmetic(op: BinaryOp, lhs: &Constant, rhs: &Constant) -> Option<Constant> {
    if let (Constant::Integer(a), Constant::Integer(b)) = (lhs, rhs) {
        let exact = match op {
            BinaryOp::Add => a.checked_add(*b),
            BinaryOp::Subtract => a.checked_sub(*b),
            BinaryOp::Multiply => a.checked_mul(*b),
            BinaryOp::Divide if *b != 0 && a.checked_rem(*b) == Some(0) => a.checked_div(*b),
            BinaryOp::Modulus => {
                if *b == 0 {
                    return None;
                }
                a.checked_rem(*b)
            }
            BinaryOp::Power => u32::try_from(*b).ok().and_then(|b| a.checked_pow(b)),
            _ => None,
        };
        if let Some(value) = exact {
            return Some(Constant::Integer(value));
        }
    }

    let a = lhs.as_float()?;
    let b = rhs.as_float()?;
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide | BinaryOp::Modulus if b == 0.0 => return None,
        BinaryOp::Divide => a / b,
        BinaryOp::Modulus => a % b,
        BinaryOp::Power => a.powf(b),
        _ => return None,
    };
    result.is_finite().then_some(Constant::Float(result))
}

fn fold_bitwise(op: BinaryOp, a: i32, b: i32) -> Option<Constant> {
    let value = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::LeftShift => a.checked_shl(u32::try_from(b).ok()?)?,
        BinaryOp::RightShift => a.checked_shr(u32::try_from(b).ok()?)?,
        _ => return None,
    };
    Some(Constant::Integer(value))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "DM numbers are single-precision floats"
)]
fn f64_to_f32(value: f64) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests;
