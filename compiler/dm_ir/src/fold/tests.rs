use super::*;
use crate::ast::{BinaryOp, Expr, UnaryOp};
use pretty_assertions::assert_eq;

fn int(value: i32) -> Expr {
    Expr::Integer(value)
}

fn string(value: &str) -> Expr {
    Expr::String(value.into())
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Option<Constant> {
    fold_constant(&Expr::binary(op, lhs, rhs))
}

#[test]
fn test_literals_fold_to_themselves() {
    assert_eq!(fold_constant(&int(7)), Some(Constant::Integer(7)));
    assert_eq!(fold_constant(&Expr::float(2.5)), Some(Constant::Float(2.5)));
    assert_eq!(fold_constant(&Expr::Null), Some(Constant::Null));
    assert_eq!(
        fold_constant(&Expr::Resource("icons/mob.dmi".into())),
        Some(Constant::Resource("icons/mob.dmi".into()))
    );
    assert_eq!(
        fold_constant(&Expr::Path(DreamPath::new("/obj"))),
        Some(Constant::Path(DreamPath::new("/obj")))
    );
}

#[test]
fn test_integer_arithmetic() {
    assert_eq!(binary(BinaryOp::Add, int(2), int(3)), Some(Constant::Integer(5)));
    assert_eq!(binary(BinaryOp::Multiply, int(10), int(5)), Some(Constant::Integer(50)));
    assert_eq!(binary(BinaryOp::Subtract, int(1), int(4)), Some(Constant::Integer(-3)));
    assert_eq!(binary(BinaryOp::Modulus, int(7), int(3)), Some(Constant::Integer(1)));
    assert_eq!(binary(BinaryOp::Power, int(2), int(10)), Some(Constant::Integer(1024)));
    assert_eq!(binary(BinaryOp::Divide, int(9), int(3)), Some(Constant::Integer(3)));
}

#[test]
fn test_inexact_division_becomes_float() {
    assert_eq!(binary(BinaryOp::Divide, int(7), int(2)), Some(Constant::Float(3.5)));
}

#[test]
fn test_overflow_becomes_float() {
    assert_eq!(
        binary(BinaryOp::Add, int(i32::MAX), int(1)),
        Some(Constant::Float(2_147_483_648.0))
    );
    assert_eq!(
        fold_constant(&Expr::unary(UnaryOp::Negate, int(i32::MIN))),
        Some(Constant::Float(2_147_483_648.0))
    );
}

#[test]
fn test_division_by_zero_does_not_fold() {
    assert_eq!(binary(BinaryOp::Divide, int(1), int(0)), None);
    assert_eq!(binary(BinaryOp::Modulus, int(1), int(0)), None);
    assert_eq!(binary(BinaryOp::Divide, Expr::float(1.0), Expr::float(0.0)), None);
}

#[test]
fn test_mixed_arithmetic() {
    assert_eq!(binary(BinaryOp::Add, int(1), Expr::float(0.5)), Some(Constant::Float(1.5)));
    assert_eq!(
        binary(BinaryOp::Multiply, Expr::float(1.5), int(2)),
        Some(Constant::Float(3.0))
    );
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        binary(BinaryOp::Add, string("foo"), string("bar")),
        Some(Constant::String("foobar".into()))
    );
    assert_eq!(binary(BinaryOp::Add, string("foo"), int(1)), None);
}

#[test]
fn test_comparisons_yield_integers() {
    assert_eq!(binary(BinaryOp::LessThan, int(1), int(2)), Some(Constant::Integer(1)));
    assert_eq!(
        binary(BinaryOp::GreaterThanOrEqual, int(1), int(2)),
        Some(Constant::Integer(0))
    );
    assert_eq!(binary(BinaryOp::Equal, int(2), Expr::float(2.0)), Some(Constant::Integer(1)));
    assert_eq!(
        binary(BinaryOp::NotEqual, string("a"), string("b")),
        Some(Constant::Integer(1))
    );
    assert_eq!(binary(BinaryOp::LessThan, string("a"), string("b")), Some(Constant::Integer(1)));
    assert_eq!(binary(BinaryOp::LessThan, string("a"), int(1)), None);
}

#[test]
fn test_logical_operators_return_operands() {
    assert_eq!(binary(BinaryOp::Or, int(0), string("x")), Some(Constant::String("x".into())));
    assert_eq!(binary(BinaryOp::Or, int(3), string("x")), Some(Constant::Integer(3)));
    assert_eq!(binary(BinaryOp::And, Expr::Null, int(5)), Some(Constant::Null));
    assert_eq!(binary(BinaryOp::And, int(1), int(5)), Some(Constant::Integer(5)));
}

#[test]
fn test_short_circuit_ignores_runtime_side() {
    // `0 && foo` is known without evaluating `foo`.
    assert_eq!(
        binary(BinaryOp::And, int(0), Expr::identifier("foo")),
        Some(Constant::Integer(0))
    );
    assert_eq!(binary(BinaryOp::Or, int(0), Expr::identifier("foo")), None);
}

#[test]
fn test_bitwise() {
    assert_eq!(binary(BinaryOp::BitAnd, int(6), int(3)), Some(Constant::Integer(2)));
    assert_eq!(binary(BinaryOp::BitOr, int(4), int(1)), Some(Constant::Integer(5)));
    assert_eq!(binary(BinaryOp::BitXor, int(5), int(1)), Some(Constant::Integer(4)));
    assert_eq!(binary(BinaryOp::LeftShift, int(1), int(4)), Some(Constant::Integer(16)));
    assert_eq!(binary(BinaryOp::RightShift, int(16), int(2)), Some(Constant::Integer(4)));
    assert_eq!(binary(BinaryOp::LeftShift, int(1), int(-1)), None);
    assert_eq!(binary(BinaryOp::BitAnd, Expr::float(1.5), int(1)), None);
}

#[test]
fn test_unary() {
    assert_eq!(fold_constant(&Expr::unary(UnaryOp::Not, int(0))), Some(Constant::Integer(1)));
    assert_eq!(
        fold_constant(&Expr::unary(UnaryOp::Not, string("x"))),
        Some(Constant::Integer(0))
    );
    assert_eq!(fold_constant(&Expr::unary(UnaryOp::Negate, int(4))), Some(Constant::Integer(-4)));
    assert_eq!(fold_constant(&Expr::unary(UnaryOp::BitNot, int(0))), Some(Constant::Integer(-1)));
    assert_eq!(fold_constant(&Expr::unary(UnaryOp::PreIncrement, int(1))), None);
}

#[test]
fn test_ternary_with_constant_condition() {
    let expr = Expr::Ternary {
        condition: Box::new(binary_expr(BinaryOp::GreaterThan, int(2), int(1))),
        if_true: Box::new(string("yes")),
        if_false: Box::new(Expr::identifier("unknown")),
    };
    assert_eq!(fold_constant(&expr), Some(Constant::String("yes".into())));

    let runtime = Expr::Ternary {
        condition: Box::new(Expr::identifier("flag")),
        if_true: Box::new(int(1)),
        if_false: Box::new(int(2)),
    };
    assert_eq!(fold_constant(&runtime), None);
}

#[test]
fn test_nested_fold() {
    // (1 + 2) * (10 - 4)
    let expr = binary_expr(
        BinaryOp::Multiply,
        binary_expr(BinaryOp::Add, int(1), int(2)),
        binary_expr(BinaryOp::Subtract, int(10), int(4)),
    );
    let folded = fold_constant(&expr);
    assert_eq!(folded, Some(Constant::Integer(18)));
    assert_eq!(folded.map(Constant::into_expr), Some(int(18)));
}

#[test]
fn test_runtime_expressions_do_not_fold() {
    assert_eq!(fold_constant(&Expr::identifier("src")), None);
    assert_eq!(binary(BinaryOp::Add, int(1), Expr::identifier("x")), None);
    assert_eq!(fold_constant(&Expr::List(vec![])), None);
}

fn binary_expr(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(op, lhs, rhs)
}
