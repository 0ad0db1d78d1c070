//! DM IR - class paths and the syntax tree.
//!
//! This crate contains the data structures shared by every stage that
//! handles DM source:
//! - `DreamPath`: slash-delimited class paths (`/obj/item/sword`)
//! - `DMValueType`: the `as` value-type flags used by parameters and `input()`
//! - `ast`: the syntax tree produced by the parser
//! - `visitor`: generic traversal so passes can be added without touching nodes
//! - `fold`: constant folding, the first pass built on the traversal
//!
//! # Design Philosophy
//!
//! - **Closed node set**: every construct is a variant of a Rust enum, so a
//!   pass that matches on nodes is checked for exhaustiveness at compile time.
//! - **Strict tree**: children are owned by their parent (`Box`/`Vec`), nodes
//!   are never shared and never mutated after construction.
//! - **Normalize at construction**: declaration nodes split their paths
//!   (`proc`/`verb`/`global`/`var` markers) when built, not in later passes.

pub mod ast;
pub mod fold;
mod path;
mod stack;
mod value_type;
pub mod visitor;

pub use ast::{
    AssignOp, BinaryOp, BlockInner, CallParameter, Callable, DefinitionParameter, Dereference,
    DereferenceKind, DereferenceStep, Expr, File, NewTarget, ObjectDefinition,
    ObjectVarDefinition, ObjectVarOverride, ProcBlockInner, ProcDefinition, ProcStatement,
    ProcVarDeclaration, Statement, SwitchCase, UnaryOp,
};
pub use fold::{fold_constant, Constant};
pub use path::{DreamPath, PathKind};
pub use stack::ensure_sufficient_stack;
pub use value_type::DMValueType;
pub use visitor::{Accept, Visitor};
