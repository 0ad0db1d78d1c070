//! Argument lists.

use super::expr::Expr;

/// An argument at a call site: `f(1)` or `f(key = 1)`.
///
/// Named arguments also express associations in `list("a" = 1)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallParameter {
    pub value: Expr,
    pub name: Option<String>,
}

impl CallParameter {
    pub fn positional(value: Expr) -> Self {
        CallParameter { value, name: None }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        CallParameter {
            value,
            name: Some(name.into()),
        }
    }
}
