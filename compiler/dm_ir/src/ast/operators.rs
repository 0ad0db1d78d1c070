//! Binary, unary and assignment operators.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Arithmetic
    Multiply,
    Divide,
    Modulus,
    Power,
    Add,
    Subtract,

    // Logical
    Or,
    And,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// Source-level symbol, used in diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::Power => "**",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Or => "||",
            Self::And => "&&",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }

    /// Precedence level. Lower binds tighter.
    ///
    /// - 1: `**`
    /// - 2: `*` `/` `%`
    /// - 3: `+` `-`
    /// - 4: `<` `<=` `>` `>=`
    /// - 5: `<<` `>>`
    /// - 6: `==` `!=`
    /// - 7: `&` `^` `|`
    /// - 8: `&&`
    /// - 9: `||`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Power => 1,
            Self::Multiply | Self::Divide | Self::Modulus => 2,
            Self::Add | Self::Subtract => 3,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual => {
                4
            }
            Self::LeftShift | Self::RightShift => 5,
            Self::Equal | Self::NotEqual => 6,
            Self::BitAnd | Self::BitXor | Self::BitOr => 7,
            Self::And => 8,
            Self::Or => 9,
        }
    }

    /// Returns true for operators whose result is a truth value (1 or 0).
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    Negate,
    BitNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
            Self::BitNot => "~",
            Self::PreIncrement | Self::PostIncrement => "++",
            Self::PreDecrement | Self::PostDecrement => "--",
        }
    }

    /// Returns true if the operator writes back to its operand.
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::PreIncrement | Self::PreDecrement | Self::PostIncrement | Self::PostDecrement
        )
    }
}

/// Assignment operators.
///
/// `+=`, `-=`, `|=` and `&=` are the append, remove, combine and mask
/// operators: on lists they mutate the receiver in place rather than
/// rebinding the target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Append,
    Remove,
    Combine,
    Mask,
    Multiply,
    Divide,
    LeftShift,
    RightShift,
    Xor,
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Append => "+=",
            Self::Remove => "-=",
            Self::Combine => "|=",
            Self::Mask => "&=",
            Self::Multiply => "*=",
            Self::Divide => "/=",
            Self::LeftShift => "<<=",
            Self::RightShift => ">>=",
            Self::Xor => "^=",
        }
    }

    /// The binary operator applied before storing, if any.
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::Append => Some(BinaryOp::Add),
            Self::Remove => Some(BinaryOp::Subtract),
            Self::Combine => Some(BinaryOp::BitOr),
            Self::Mask => Some(BinaryOp::BitAnd),
            Self::Multiply => Some(BinaryOp::Multiply),
            Self::Divide => Some(BinaryOp::Divide),
            Self::LeftShift => Some(BinaryOp::LeftShift),
            Self::RightShift => Some(BinaryOp::RightShift),
            Self::Xor => Some(BinaryOp::BitXor),
        }
    }
}
