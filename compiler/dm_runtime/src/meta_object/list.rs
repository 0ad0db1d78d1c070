//! List semantics.
//!
//! `+` and `-` build a new list. `+=`, `-=`, `|=` and `&=` mutate the
//! receiver and return it. A list operand contributes its elements, any other
//! value contributes itself. `len` is virtual: reading it reports the length,
//! writing it resizes the list.

use super::{MetaObject, MetaOperator};
use crate::errors::RuntimeResult;
use crate::list::DreamList;
use crate::object::{DreamObject, ObjectRef};
use crate::proc::DreamProcArguments;
use crate::value::DreamValue;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default)]
pub struct ListMetaObject;

impl ListMetaObject {
    fn receiver(op: MetaOperator, a: &DreamValue) -> RuntimeResult<&ObjectRef> {
        match a {
            DreamValue::Object(object) if object.is_list() => Ok(object),
            _ => Err(op.unsupported(a)),
        }
    }

    /// Elements `b` contributes as an operand. Collected before the receiver
    /// is locked so `L += L` does not deadlock.
    fn operand_values(b: &DreamValue) -> Vec<DreamValue> {
        match b {
            DreamValue::Object(object) if object.is_list() => object
                .with_list(|list| list.values().to_vec())
                .unwrap_or_default(),
            other => vec![other.clone()],
        }
    }

    fn new_list_like(receiver: &ObjectRef, list: DreamList) -> DreamValue {
        DreamValue::Object(DreamObject::from_list(
            Arc::clone(receiver.definition()),
            list,
        ))
    }
}

impl MetaObject for ListMetaObject {
    /// `new /list(n)` creates `n` null entries.
    fn on_object_created(
        &self,
        object: &ObjectRef,
        arguments: &DreamProcArguments,
    ) -> RuntimeResult<()> {
        if let ([DreamValue::Integer(size)], true) =
            (arguments.ordered.as_slice(), arguments.named.is_empty())
        {
            let size = usize::try_from(*size).unwrap_or(0);
            object.with_list_mut(|list| list.resize(size))?;
        }
        Ok(())
    }

    fn on_variable_set(
        &self,
        object: &DreamObject,
        name: &str,
        value: &DreamValue,
        _old_value: &DreamValue,
    ) -> RuntimeResult<()> {
        if name == "len" {
            let len = usize::try_from(value.as_integer()?).unwrap_or(0);
            object.with_list_mut(|list| list.resize(len))?;
        }
        Ok(())
    }

    fn on_variable_get(
        &self,
        object: &DreamObject,
        name: &str,
        value: DreamValue,
    ) -> RuntimeResult<DreamValue> {
        if name != "len" {
            return Ok(value);
        }
        let len = object.with_list(DreamList::len)?;
        Ok(DreamValue::Integer(i32::try_from(len).unwrap_or(i32::MAX)))
    }

    fn operator_add(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        let receiver = Self::receiver(MetaOperator::Add, a)?;
        let additions = Self::operand_values(b);
        let mut list = receiver.with_list(DreamList::copy)?;
        for value in additions {
            list.add_value(value);
        }
        Ok(Self::new_list_like(receiver, list))
    }

    fn operator_subtract(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        let receiver = Self::receiver(MetaOperator::Subtract, a)?;
        let removals = Self::operand_values(b);
        let mut list = receiver.with_list(DreamList::copy)?;
        for value in &removals {
            list.remove_value(value);
        }
        Ok(Self::new_list_like(receiver, list))
    }

    fn operator_append(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        let receiver = Self::receiver(MetaOperator::Append, a)?;
        let additions = Self::operand_values(b);
        receiver.with_list_mut(|list| {
            for value in additions {
                list.add_value(value);
            }
        })?;
        Ok(a.clone())
    }

    fn operator_remove(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        let receiver = Self::receiver(MetaOperator::Remove, a)?;
        let removals = Self::operand_values(b);
        receiver.with_list_mut(|list| {
            for value in &removals {
                list.remove_value(value);
            }
        })?;
        Ok(a.clone())
    }

    /// Union: add the operand's elements not already present.
    fn operator_combine(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        let receiver = Self::receiver(MetaOperator::Combine, a)?;
        let additions = Self::operand_values(b);
        receiver.with_list_mut(|list| {
            for value in additions {
                if !list.contains(&value) {
                    list.add_value(value);
                }
            }
        })?;
        Ok(a.clone())
    }

    /// Intersection: keep only elements the operand also has.
    fn operator_mask(&self, a: &DreamValue, b: &DreamValue) -> RuntimeResult<DreamValue> {
        let receiver = Self::receiver(MetaOperator::Mask, a)?;
        let keep = Self::operand_values(b);
        receiver.with_list_mut(|list| {
            let dropped: Vec<DreamValue> = list
                .values()
                .iter()
                .filter(|value| !keep.contains(*value))
                .cloned()
                .collect();
            for value in &dropped {
                list.remove_value(value);
            }
        })?;
        Ok(a.clone())
    }
}
