//! Error types for the object runtime.
//!
//! Three categories, one enum each:
//! - `RuntimeError`: resolution failures and misuse, reported to the caller.
//!   At the interpreter level these become the script's own catchable error.
//! - `LoadError`: malformed compiled input. Fatal to the load; the tree keeps
//!   its previous contents.
//! - `ResourceError`: the resource loader boundary.

use dm_ir::DreamPath;
use std::path::PathBuf;
use thiserror::Error;

/// Result of a runtime operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    // Resolution
    #[error("path '{path}' must be an absolute path")]
    PathNotAbsolute { path: DreamPath },
    #[error("object '{path}' does not exist")]
    ObjectDoesNotExist { path: DreamPath },
    #[error("value '{name}' doesn't exist")]
    UndefinedVariable { name: String },
    #[error("proc '{name}' doesn't exist on {ty}")]
    UndefinedProc { name: String, ty: DreamPath },
    #[error("local variable {index} is out of range (proc has {count} locals)")]
    LocalOutOfRange { index: usize, count: usize },

    // Misuse
    #[error("cannot assign to a proc ('{name}')")]
    CannotAssignProc { name: String },
    #[error("{ty} is not a list")]
    NotAList { ty: String },

    // Lists
    #[error("list index {index} is out of range (list has {len} entries)")]
    ListIndexOutOfRange { index: i32, len: usize },
    #[error("invalid list index {index}")]
    InvalidListIndex { index: String },

    // Operators
    #[error("operator '{op}' is not supported on {type_name}")]
    UnsupportedOperator {
        op: &'static str,
        type_name: String,
    },
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: &'static str, got: String },

    #[error("object of type {ty} has been deleted")]
    ObjectDeleted { ty: DreamPath },
}

impl RuntimeError {
    pub fn object_does_not_exist(path: &DreamPath) -> Self {
        RuntimeError::ObjectDoesNotExist { path: path.clone() }
    }

    pub fn undefined_variable(name: &str) -> Self {
        RuntimeError::UndefinedVariable {
            name: name.to_string(),
        }
    }
}

/// Failure while loading compiled definitions.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("root object should have an empty name, found '{name}'")]
    InvalidRootName { name: String },
    #[error("invalid value kind for dream value ({kind})")]
    InvalidValueKind { kind: &'static str },
    #[error("invalid variable type ({tag})")]
    InvalidVariableType { tag: u64 },
    #[error("property 'resourcePath' must be a string or null")]
    InvalidResourcePath,
    #[error("missing property '{property}'")]
    MissingProperty { property: &'static str },
    #[error("object '{path}' is defined twice")]
    DuplicateEntry { path: DreamPath },
    #[error("malformed compiled definitions: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Resolution(#[from] RuntimeError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Failure at the resource loader boundary.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource '{path}' is outside the resource root")]
    OutsideRoot { path: String },
    #[error("failed to read resource '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
