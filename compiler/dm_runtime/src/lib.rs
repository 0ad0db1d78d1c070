//! DM Runtime - the object model compiled programs execute against.
//!
//! # Module Structure
//!
//! - `tree`: the object tree, loaded wholesale from compiled definitions
//! - `definition`: per-class templates (variables, globals, procs, init proc)
//! - `object` / `list`: runtime instances and list storage
//! - `meta_object`: behavior hooks for built-in types, with list semantics
//! - `operators`: binary operators, delegating to meta-objects
//! - `identifier`: the read/write locations the interpreter resolves operands to
//! - `json`: the compiled-definition format and constant decoding
//! - `resource`: the resource loader boundary
//!
//! # Threading
//!
//! The tree is built once and read afterwards. Shared state (instance
//! variables, global cells, list storage) sits behind `parking_lot` locks;
//! the scheduler is expected to run one proc body at a time, so locks are
//! never held across calls into scripts or hooks.

mod definition;
mod errors;
mod identifier;
pub mod json;
mod list;
mod meta_object;
mod object;
pub mod operators;
mod proc;
mod resource;
mod tree;
mod value;

#[cfg(test)]
mod test_helpers;

pub use definition::{GlobalVariable, ObjectDefinition};
pub use errors::{LoadError, ResourceError, RuntimeError, RuntimeResult};
pub use identifier::{ListIndexTarget, ProcFrame, ProcIdentifier};
pub use json::DreamObjectJson;
pub use list::DreamList;
pub use meta_object::{ListMetaObject, MetaObject, MetaOperator};
pub use object::{DreamObject, ObjectRef};
pub use operators::binary_operator;
pub use proc::{DreamProc, DreamProcArguments};
pub use resource::{DreamResource, FileResourceLoader, ResourceLoader};
pub use tree::{ObjectTree, TreeEntry, TreeEntryId};
pub use value::DreamValue;

// Re-exported so embedders need not depend on dm_ir directly for paths.
pub use dm_ir::{DMValueType, DreamPath};
