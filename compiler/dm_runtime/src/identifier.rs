//! Identifier resolution.
//!
//! Every operand the interpreter reads or writes resolves to a
//! `ProcIdentifier`: an instance variable (falling back to a global cell), a
//! local slot, a proc reference, a list entry, or the implicit `.` return
//! value. Each supports `get` and `assign` against the executing frame.

use crate::errors::{RuntimeError, RuntimeResult};
use crate::object::ObjectRef;
use crate::proc::DreamProc;
use crate::value::DreamValue;
use dm_ir::DreamPath;
use std::sync::Arc;

/// The interpreter state identifiers operate on.
#[derive(Debug)]
pub struct ProcFrame {
    proc: Arc<DreamProc>,
    instance: Option<ObjectRef>,
    local_variables: Vec<DreamValue>,
    default_return_value: DreamValue,
}

impl ProcFrame {
    pub fn new(proc: Arc<DreamProc>, instance: Option<ObjectRef>, local_count: usize) -> Self {
        ProcFrame {
            proc,
            instance,
            local_variables: vec![DreamValue::Null; local_count],
            default_return_value: DreamValue::Null,
        }
    }

    pub fn proc(&self) -> &Arc<DreamProc> {
        &self.proc
    }

    /// `src`, if the proc runs on an object.
    pub fn instance(&self) -> Option<&ObjectRef> {
        self.instance.as_ref()
    }

    pub fn local_variables(&self) -> &[DreamValue] {
        &self.local_variables
    }

    pub fn default_return_value(&self) -> &DreamValue {
        &self.default_return_value
    }

    /// End the frame, yielding `.`.
    pub fn into_return_value(self) -> DreamValue {
        self.default_return_value
    }
}

/// A list receiver and the index into it.
///
/// Only constructible over list objects.
#[derive(Clone, Debug)]
pub struct ListIndexTarget {
    list: ObjectRef,
    index: DreamValue,
}

impl ListIndexTarget {
    pub fn new(list: ObjectRef, index: DreamValue) -> RuntimeResult<Self> {
        if !list.is_subtype_of(&DreamPath::list()) || !list.is_list() {
            return Err(RuntimeError::NotAList {
                ty: list.ty().to_string(),
            });
        }
        Ok(ListIndexTarget { list, index })
    }

    pub fn list(&self) -> &ObjectRef {
        &self.list
    }

    pub fn index(&self) -> &DreamValue {
        &self.index
    }
}

#[derive(Clone, Debug)]
pub enum ProcIdentifier {
    /// A variable of `instance`, or a global visible from its definition.
    Variable { instance: ObjectRef, name: String },
    /// Slot `index` of the frame's locals.
    Local { index: usize },
    /// A proc bound to the instance it was looked up on.
    Proc {
        proc: Arc<DreamProc>,
        instance: Option<ObjectRef>,
        name: String,
    },
    ListIndex(ListIndexTarget),
    /// `.`, the value returned when the proc ends without `return`.
    SelfProc,
}

impl ProcIdentifier {
    pub fn variable(instance: &ObjectRef, name: impl Into<String>) -> Self {
        ProcIdentifier::Variable {
            instance: Arc::clone(instance),
            name: name.into(),
        }
    }

    /// Look up proc `name` on `instance`.
    pub fn proc_of(instance: &ObjectRef, name: &str) -> RuntimeResult<Self> {
        Ok(ProcIdentifier::Proc {
            proc: instance.get_proc(name)?,
            instance: Some(Arc::clone(instance)),
            name: name.to_string(),
        })
    }

    pub fn list_index(list: ObjectRef, index: DreamValue) -> RuntimeResult<Self> {
        ListIndexTarget::new(list, index).map(ProcIdentifier::ListIndex)
    }

    pub fn get(&self, frame: &ProcFrame) -> RuntimeResult<DreamValue> {
        match self {
            ProcIdentifier::Variable { instance, name } => {
                ensure_live(instance)?;
                if let Some(value) = instance.try_get_variable(name)? {
                    return Ok(value);
                }
                instance
                    .definition()
                    .global_variable(name)
                    .map(|global| global.get())
                    .ok_or_else(|| RuntimeError::undefined_variable(name))
            }
            ProcIdentifier::Local { index } => frame
                .local_variables
                .get(*index)
                .cloned()
                .ok_or(RuntimeError::LocalOutOfRange {
                    index: *index,
                    count: frame.local_variables.len(),
                }),
            ProcIdentifier::Proc { proc, .. } => Ok(DreamValue::Proc(Arc::clone(proc))),
            ProcIdentifier::ListIndex(target) => target
                .list
                .with_list(|list| list.get_value(&target.index))?,
            ProcIdentifier::SelfProc => Ok(frame.default_return_value.clone()),
        }
    }

    pub fn assign(&self, frame: &mut ProcFrame, value: DreamValue) -> RuntimeResult<()> {
        match self {
            ProcIdentifier::Variable { instance, name } => {
                ensure_live(instance)?;
                if instance.has_variable(name) {
                    instance.set_variable(name, value)?;
                    return Ok(());
                }
                let global = instance
                    .definition()
                    .global_variable(name)
                    .ok_or_else(|| RuntimeError::undefined_variable(name))?;
                global.set(value);
                Ok(())
            }
            ProcIdentifier::Local { index } => {
                let count = frame.local_variables.len();
                let slot = frame
                    .local_variables
                    .get_mut(*index)
                    .ok_or(RuntimeError::LocalOutOfRange {
                        index: *index,
                        count,
                    })?;
                *slot = value;
                Ok(())
            }
            ProcIdentifier::Proc { name, .. } => {
                Err(RuntimeError::CannotAssignProc { name: name.clone() })
            }
            ProcIdentifier::ListIndex(target) => target
                .list
                .with_list_mut(|list| list.set_value(&target.index, value))?,
            ProcIdentifier::SelfProc => {
                frame.default_return_value = value;
                Ok(())
            }
        }
    }
}

/// Variables of a deleted object can no longer be read or written.
fn ensure_live(instance: &ObjectRef) -> RuntimeResult<()> {
    if instance.is_deleted() {
        return Err(RuntimeError::ObjectDeleted {
            ty: instance.ty().clone(),
        });
    }
    Ok(())
}
