//! Expression Types
//!
//! Every expression form of the language. Children are owned (`Box`/`Vec`),
//! so an `Expr` is a strict tree.
//!
//! Float constants are stored as `u32` bits so the whole tree can be
//! `Eq + Hash`; use [`Expr::float`] and [`Expr::float_value`] to cross over.

use super::collections::CallParameter;
use super::operators::{AssignOp, BinaryOp, UnaryOp};
use crate::{DMValueType, DreamPath};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Expr {
    // Constants
    /// Integer literal: `42`
    Integer(i32),
    /// Float literal as bits: `4.5`
    Float(u32),
    /// String literal without interpolation: `"hello"`
    String(String),
    /// Resource literal: `'icons/mob.dmi'`
    Resource(String),
    /// `null`
    Null,
    /// Path literal: `/obj/item`
    Path(DreamPath),

    /// Variable reference: `health`
    Identifier(String),

    /// Interpolated string: `"Hello, [name]!"`
    ///
    /// `value` holds the literal text with the interpolation markers left in
    /// place; `interpolated` holds the embedded expressions in order.
    StringFormat {
        value: String,
        interpolated: Vec<Expr>,
    },

    /// List literal: `list(1, 2, "a" = 3)`
    List(Vec<CallParameter>),

    /// `input(usr, "Name?") as text|null in choices`
    Input {
        parameters: Vec<CallParameter>,
        types: DMValueType,
        list: Option<Box<Expr>>,
    },

    /// `initial(src.health)`
    Initial(Box<Expr>),

    /// `istype(value, /mob)`
    IsType { value: Box<Expr>, ty: Box<Expr> },

    /// `istype(M)`: type inferred from the declared type of `M`.
    ImplicitIsType(Box<Expr>),

    /// `locate(x, y, z)`
    LocateCoordinates {
        x: Box<Expr>,
        y: Box<Expr>,
        z: Box<Expr>,
    },

    /// `locate(/obj) in container`; either part may be absent.
    Locate {
        expression: Option<Box<Expr>>,
        container: Option<Box<Expr>>,
    },

    /// `call(object, "proc")(args)`
    Call {
        call_parameters: Vec<CallParameter>,
        proc_parameters: Vec<CallParameter>,
    },

    /// Assignment and compound assignment: `a = b`, `L += item`
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },

    /// `new /obj(loc)`, `new T(loc)`, `new a.b(loc)`, `new(loc)`
    New {
        target: NewTarget,
        parameters: Vec<CallParameter>,
    },

    /// Unary operation: `!a`, `-a`, `~a`, `++a`, `a--`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation: `a + b`
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `a ? b : c`
    Ternary {
        condition: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Box<Expr>,
    },

    /// `value in list`
    In { value: Box<Expr>, list: Box<Expr> },

    /// `list[index]`
    ListIndex { expression: Box<Expr>, index: Box<Expr> },

    /// Proc call: `attack(target)`, `src.attack(target)`, `..()`
    ProcCall {
        callable: Callable,
        parameters: Vec<CallParameter>,
    },

    /// Property access: `a.b:c`
    Dereference(Dereference),

    /// A bare callable used as a value: `.` (the implicit return value)
    /// or `..` (the parent proc).
    Callable(Callable),
}

impl Expr {
    /// Float constant.
    pub fn float(value: f32) -> Self {
        Expr::Float(value.to_bits())
    }

    /// The value of a float constant.
    pub fn float_value(&self) -> Option<f32> {
        match self {
            Expr::Float(bits) => Some(f32::from_bits(*bits)),
            _ => None,
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn assign(op: AssignOp, target: Expr, value: Expr) -> Self {
        Expr::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// Returns true for literal constants.
    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            Expr::Integer(_)
                | Expr::Float(_)
                | Expr::String(_)
                | Expr::Resource(_)
                | Expr::Null
                | Expr::Path(_)
        )
    }
}

/// The target of a `new` expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NewTarget {
    /// `new /obj/item(...)`
    Path(DreamPath),
    /// `new T(...)` where `T` holds a type path.
    Identifier(String),
    /// `new src.item_type(...)`
    Dereference(Dereference),
    /// `new(...)`: type taken from the assignment target's declared type.
    Inferred,
}

/// Whether a dereference step is checked at compile time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DereferenceKind {
    /// `a.b`: the property must exist on the declared type.
    Direct,
    /// `a:b`: the property is looked up at runtime.
    Search,
}

/// One `.prop` or `:prop` step.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DereferenceStep {
    pub kind: DereferenceKind,
    pub property: String,
}

impl DereferenceStep {
    pub fn direct(property: impl Into<String>) -> Self {
        DereferenceStep {
            kind: DereferenceKind::Direct,
            property: property.into(),
        }
    }

    pub fn search(property: impl Into<String>) -> Self {
        DereferenceStep {
            kind: DereferenceKind::Search,
            property: property.into(),
        }
    }
}

/// A receiver followed by one or more property steps: `a.b:c`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Dereference {
    pub expression: Box<Expr>,
    pub steps: Vec<DereferenceStep>,
}

impl Dereference {
    pub fn new(expression: Expr, steps: Vec<DereferenceStep>) -> Self {
        Dereference {
            expression: Box::new(expression),
            steps,
        }
    }

    /// The property named by the final step.
    pub fn last_property(&self) -> Option<&str> {
        self.steps.last().map(|step| step.property.as_str())
    }
}

/// Something a proc call can target.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Callable {
    /// `a.b.attack()`: the last step names the proc.
    Dereference(Dereference),
    /// `attack()`: a proc on `src` or a global proc.
    ProcIdentifier(String),
    /// `..()`: the overridden implementation.
    Super,
    /// `.`: the current proc.
    SelfProc,
}
