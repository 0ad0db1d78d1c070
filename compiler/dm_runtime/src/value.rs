//! Runtime values.
//!
//! `DreamValue` is the tagged value every expression evaluates to. It is
//! cheap to clone: strings, resources, objects and procs are shared through
//! `Arc`.
//!
//! Equality and hashing are structural for scalars (floats compare by bit
//! pattern) and by identity for objects and procs, so any value can key an
//! associative list.

use crate::errors::{RuntimeError, RuntimeResult};
use crate::object::ObjectRef;
use crate::proc::DreamProc;
use crate::resource::DreamResource;
use dm_ir::DreamPath;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub enum DreamValue {
    #[default]
    Null,
    Integer(i32),
    Float(f32),
    String(Arc<str>),
    Path(DreamPath),
    Resource(Arc<DreamResource>),
    Object(ObjectRef),
    Proc(Arc<DreamProc>),
}

impl DreamValue {
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        DreamValue::String(value.into())
    }

    pub fn object(object: &ObjectRef) -> Self {
        DreamValue::Object(Arc::clone(object))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DreamValue::Null)
    }

    /// Name of the value's kind, as used in error messages.
    ///
    /// Objects report their type path.
    pub fn type_name(&self) -> String {
        match self {
            DreamValue::Null => "null".to_string(),
            DreamValue::Integer(_) | DreamValue::Float(_) => "num".to_string(),
            DreamValue::String(_) => "text".to_string(),
            DreamValue::Path(_) => "path".to_string(),
            DreamValue::Resource(_) => "resource".to_string(),
            DreamValue::Object(object) => object.definition().ty().to_string(),
            DreamValue::Proc(_) => "proc".to_string(),
        }
    }

    /// DM truthiness: `null`, `0` and `""` are false, deleted objects too.
    pub fn is_truthy(&self) -> bool {
        match self {
            DreamValue::Null => false,
            DreamValue::Integer(value) => *value != 0,
            DreamValue::Float(value) => *value != 0.0,
            DreamValue::String(value) => !value.is_empty(),
            DreamValue::Object(object) => !object.is_deleted(),
            DreamValue::Path(_) | DreamValue::Resource(_) | DreamValue::Proc(_) => true,
        }
    }

    pub fn as_integer(&self) -> RuntimeResult<i32> {
        match self {
            DreamValue::Integer(value) => Ok(*value),
            other => Err(mismatch("integer", other)),
        }
    }

    /// Numeric view; integers widen to floats.
    pub fn as_float(&self) -> RuntimeResult<f32> {
        match self {
            #[expect(
                clippy::cast_precision_loss,
                reason = "DM numbers are single-precision floats"
            )]
            DreamValue::Integer(value) => Ok(*value as f32),
            DreamValue::Float(value) => Ok(*value),
            other => Err(mismatch("num", other)),
        }
    }

    pub fn as_string(&self) -> RuntimeResult<&str> {
        match self {
            DreamValue::String(value) => Ok(value),
            other => Err(mismatch("text", other)),
        }
    }

    pub fn as_object(&self) -> RuntimeResult<&ObjectRef> {
        match self {
            DreamValue::Object(object) => Ok(object),
            other => Err(mismatch("object", other)),
        }
    }

    pub fn as_path(&self) -> RuntimeResult<&DreamPath> {
        match self {
            DreamValue::Path(path) => Ok(path),
            other => Err(mismatch("path", other)),
        }
    }

    /// An integer list index, accepting integral floats.
    pub(crate) fn as_list_index(&self) -> Option<i32> {
        match self {
            DreamValue::Integer(value) => Some(*value),
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_precision_loss,
                reason = "only integral floats within i32 range are accepted"
            )]
            DreamValue::Float(value)
                if value.fract() == 0.0
                    && *value >= i32::MIN as f32
                    && *value < i32::MAX as f32 =>
            {
                Some(*value as i32)
            }
            _ => None,
        }
    }
}

fn mismatch(expected: &'static str, got: &DreamValue) -> RuntimeError {
    RuntimeError::TypeMismatch {
        expected,
        got: got.type_name(),
    }
}

impl PartialEq for DreamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DreamValue::Null, DreamValue::Null) => true,
            (DreamValue::Integer(a), DreamValue::Integer(b)) => a == b,
            (DreamValue::Float(a), DreamValue::Float(b)) => a.to_bits() == b.to_bits(),
            (DreamValue::String(a), DreamValue::String(b)) => a == b,
            (DreamValue::Path(a), DreamValue::Path(b)) => a == b,
            (DreamValue::Resource(a), DreamValue::Resource(b)) => {
                a.resource_path() == b.resource_path()
            }
            (DreamValue::Object(a), DreamValue::Object(b)) => Arc::ptr_eq(a, b),
            (DreamValue::Proc(a), DreamValue::Proc(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for DreamValue {}

impl Hash for DreamValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            DreamValue::Null => {}
            DreamValue::Integer(value) => value.hash(state),
            DreamValue::Float(value) => value.to_bits().hash(state),
            DreamValue::String(value) => value.hash(state),
            DreamValue::Path(path) => path.hash(state),
            DreamValue::Resource(resource) => resource.resource_path().hash(state),
            DreamValue::Object(object) => std::ptr::hash(Arc::as_ptr(object), state),
            DreamValue::Proc(proc) => std::ptr::hash(Arc::as_ptr(proc), state),
        }
    }
}

impl From<i32> for DreamValue {
    fn from(value: i32) -> Self {
        DreamValue::Integer(value)
    }
}

impl From<f32> for DreamValue {
    fn from(value: f32) -> Self {
        DreamValue::Float(value)
    }
}

impl From<&str> for DreamValue {
    fn from(value: &str) -> Self {
        DreamValue::String(value.into())
    }
}

impl From<DreamPath> for DreamValue {
    fn from(path: DreamPath) -> Self {
        DreamValue::Path(path)
    }
}

impl From<ObjectRef> for DreamValue {
    fn from(object: ObjectRef) -> Self {
        DreamValue::Object(object)
    }
}

impl fmt::Display for DreamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DreamValue::Null => write!(f, "null"),
            DreamValue::Integer(value) => write!(f, "{value}"),
            DreamValue::Float(value) => write!(f, "{value}"),
            DreamValue::String(value) => write!(f, "\"{value}\""),
            DreamValue::Path(path) => write!(f, "{path}"),
            DreamValue::Resource(resource) => write!(f, "'{}'", resource.resource_path()),
            DreamValue::Object(object) => write!(f, "{}", object.definition().ty()),
            DreamValue::Proc(proc) => write!(f, "proc {}", proc.name()),
        }
    }
}

#[cfg(test)]
mod tests;
