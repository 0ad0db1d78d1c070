//! Syntax tree types.
//!
//! # Module Structure
//!
//! - `items`: object-level declarations (`File`, `Statement`, proc and var definitions)
//! - `stmt`: proc-body statements and control flow
//! - `expr`: expressions, dereferences and callables
//! - `operators`: binary, unary and assignment operators
//! - `collections`: call arguments
//!
//! The parser builds these nodes once; compiler passes only read them.

mod collections;
mod expr;
mod items;
mod operators;
mod stmt;

pub use collections::CallParameter;
pub use expr::{Callable, Dereference, DereferenceKind, DereferenceStep, Expr, NewTarget};
pub use items::{
    BlockInner, DefinitionParameter, File, ObjectDefinition, ObjectVarDefinition,
    ObjectVarOverride, ProcDefinition, Statement,
};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{ProcBlockInner, ProcStatement, ProcVarDeclaration, SwitchCase};
