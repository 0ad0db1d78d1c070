//! Meta-objects: behavior hooks for built-in types.
//!
//! Built-in types such as `/list` do not get their semantics from procs.
//! Instead a `MetaObject` is attached to their tree entries (see
//! `ObjectTree::set_meta_object`) and intercepts object lifecycle, variable
//! access and a fixed set of operators.
//!
//! Every method has a default: lifecycle hooks do nothing, reads pass the
//! value through, operators report that they are unsupported. An
//! implementation overrides only what its type needs.

mod list;

pub use list::ListMetaObject;

use crate::errors::{RuntimeError, RuntimeResult};
use crate::object::{DreamObject, ObjectRef};
use crate::proc::DreamProcArguments;
use crate::value::DreamValue;
use std::fmt;

/// Operators a meta-object can implement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetaOperator {
    /// `<<`
    Output,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `+=`
    Append,
    /// `-=`
    Remove,
    /// `|=`
    Combine,
    /// `&=`
    Mask,
}

impl MetaOperator {
    pub const ALL: [MetaOperator; 7] = [
        MetaOperator::Output,
        MetaOperator::Add,
        MetaOperator::Subtract,
        MetaOperator::Append,
        MetaOperator::Remove,
        MetaOperator::Combine,
        MetaOperator::Mask,
    ];

    pub fn as_symbol(self) -> &'static str {
        match self {
            MetaOperator::Output => "<<",
            MetaOperator::Add => "+",
            MetaOperator::Subtract => "-",
            MetaOperator::Append => "+=",
            MetaOperator::Remove => "-=",
            MetaOperator::Combine => "|=",
            MetaOperator::Mask => "&=",
        }
    }

    /// Call the hook method implementing this operator.
    pub fn dispatch(
        self,
        meta_object: &dyn MetaObject,
        a: &DreamValue,
        b: &DreamValue,
    ) -> RuntimeResult<DreamValue> {
        match self {
            MetaOperator::Output => meta_object.operator_output(a, b),
            MetaOperator::Add => meta_object.operator_add(a, b),
            MetaOperator::Subtract => meta_object.operator_subtract(a, b),
            MetaOperator::Append => meta_object.operator_append(a, b),
            MetaOperator::Remove => meta_object.operator_remove(a, b),
            MetaOperator::Combine => meta_object.operator_combine(a, b),
            MetaOperator::Mask => meta_object.operator_mask(a, b),
        }
    }

    pub(crate) fn unsupported(self, a: &DreamValue) -> RuntimeError {
        RuntimeError::UnsupportedOperator {
            op: self.as_symbol(),
            type_name: a.type_name(),
        }
    }
}

impl fmt::Display for MetaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Behavior hooks attached to a family of tree entries.
#[expect(
    unused_variables,
    reason = "default methods name their parameters for implementors"
)]
pub trait MetaObject: Send + Sync {
    // Lifecycle and variable access

    fn on_object_created(
        &self,
        object: &ObjectRef,
        arguments: &DreamProcArguments,
    ) -> RuntimeResult<()> {
        Ok(())
    }

    fn on_object_deleted(&self, object: &DreamObject) {}

    /// Called after `name` was set, with the value it replaced. An error
    /// puts the replaced value back.
    fn on_variable_set(
        &self,
        object: &DreamObject,
        name: &str,
        value: &DreamValue,
        old_value: &DreamValue,
    ) -> RuntimeResult<()> {
        Ok(())
    }

    /// Called before a read of `name` returns `value`.
    fn on_variable_get(
        &self,
        object: &DreamObject,
        name: &str,
        value: DreamValue,
    ) -> RuntimeResult<DreamValue> {
        Ok(value)
    }

    // Operators

    fn operator_output(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        Err(MetaOperator::Output.unsupported(a))
    }

    fn operator_add(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        Err(MetaOperator::Add.unsupported(a))
    }

    fn operator_subtract(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        Err(MetaOperator::Subtract.unsupported(a))
    }

    fn operator_append(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        Err(MetaOperator::Append.unsupported(a))
    }

    fn operator_remove(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        Err(MetaOperator::Remove.unsupported(a))
    }

    fn operator_combine(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        Err(MetaOperator::Combine.unsupported(a))
    }

    fn operator_mask(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        Err(MetaOperator::Mask.unsupported(a))
    }
}
