//! Runtime objects.
//!
//! A `DreamObject` is an instance of an `ObjectDefinition`: a reference to the
//! definition (its dynamic type) plus its own variable slots, seeded from the
//! definition's defaults. Instances of `/list` and its subtypes also carry
//! list storage.
//!
//! Variable access goes through the definition's meta-object: reads may be
//! rewritten by `on_variable_get` and writes are reported to
//! `on_variable_set` with the old and new value.

use crate::definition::ObjectDefinition;
use crate::errors::{RuntimeError, RuntimeResult};
use crate::list::DreamList;
use crate::proc::{DreamProc, DreamProcArguments};
use crate::value::DreamValue;
use dm_ir::DreamPath;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle to a runtime object.
pub type ObjectRef = Arc<DreamObject>;

pub struct DreamObject {
    definition: Arc<ObjectDefinition>,
    variables: RwLock<FxHashMap<String, DreamValue>>,
    list: Option<RwLock<DreamList>>,
    deleted: AtomicBool,
}

impl DreamObject {
    /// Instantiate `definition` and run its meta-object's creation hook.
    pub fn create(
        definition: Arc<ObjectDefinition>,
        arguments: &DreamProcArguments,
    ) -> RuntimeResult<ObjectRef> {
        let list = definition
            .is_subtype_of(&DreamPath::list())
            .then(DreamList::new);
        let object = Self::with_storage(definition, list);

        if let Some(meta_object) = object.definition.meta_object() {
            meta_object.on_object_created(&object, arguments)?;
        }
        Ok(object)
    }

    /// A list-kind instance holding `list`, bypassing the creation hook.
    pub(crate) fn from_list(definition: Arc<ObjectDefinition>, list: DreamList) -> ObjectRef {
        Self::with_storage(definition, Some(list))
    }

    fn with_storage(definition: Arc<ObjectDefinition>, list: Option<DreamList>) -> ObjectRef {
        let mut variables = definition.variable_defaults();
        if list.is_some() {
            variables
                .entry("len".to_string())
                .or_insert(DreamValue::Integer(0));
        }
        Arc::new(DreamObject {
            definition,
            variables: RwLock::new(variables),
            list: list.map(RwLock::new),
            deleted: AtomicBool::new(false),
        })
    }

    pub fn definition(&self) -> &Arc<ObjectDefinition> {
        &self.definition
    }

    pub fn ty(&self) -> &DreamPath {
        self.definition.ty()
    }

    pub fn is_subtype_of(&self, path: &DreamPath) -> bool {
        self.definition.is_subtype_of(path)
    }

    // Variables

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.read().contains_key(name)
    }

    /// The value of `name`, or `None` if the object has no such variable.
    pub fn try_get_variable(&self, name: &str) -> RuntimeResult<Option<DreamValue>> {
        let Some(value) = self.variables.read().get(name).cloned() else {
            return Ok(None);
        };
        match self.definition.meta_object() {
            Some(meta_object) => meta_object.on_variable_get(self, name, value).map(Some),
            None => Ok(Some(value)),
        }
    }

    pub fn get_variable(&self, name: &str) -> RuntimeResult<DreamValue> {
        self.try_get_variable(name)?
            .ok_or_else(|| RuntimeError::undefined_variable(name))
    }

    /// Set `name`, creating the slot if needed. Returns the previous value.
    ///
    /// If the set hook rejects the value, the slot is restored.
    pub fn set_variable(&self, name: &str, value: DreamValue) -> RuntimeResult<DreamValue> {
        let previous = self.variables.write().insert(name.to_string(), value.clone());
        let old = previous.clone().unwrap_or_default();
        if let Some(meta_object) = self.definition.meta_object() {
            if let Err(error) = meta_object.on_variable_set(self, name, &value, &old) {
                let mut variables = self.variables.write();
                match previous {
                    Some(previous) => variables.insert(name.to_string(), previous),
                    None => variables.remove(name),
                };
                return Err(error);
            }
        }
        Ok(old)
    }

    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    // Procs

    pub fn get_proc(&self, name: &str) -> RuntimeResult<Arc<DreamProc>> {
        self.definition
            .proc(name)
            .ok_or_else(|| RuntimeError::UndefinedProc {
                name: name.to_string(),
                ty: self.ty().clone(),
            })
    }

    // Lifetime

    /// Mark the object deleted and run the deletion hook once.
    pub fn delete(&self) {
        if self.deleted.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(meta_object) = self.definition.meta_object() {
            meta_object.on_object_deleted(self);
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.load(Ordering::Acquire)
    }

    // Lists

    pub fn is_list(&self) -> bool {
        self.list.is_some()
    }

    pub fn with_list<R>(&self, f: impl FnOnce(&DreamList) -> R) -> RuntimeResult<R> {
        let list = self.list.as_ref().ok_or_else(|| self.not_a_list())?;
        Ok(f(&list.read()))
    }

    pub fn with_list_mut<R>(&self, f: impl FnOnce(&mut DreamList) -> R) -> RuntimeResult<R> {
        let list = self.list.as_ref().ok_or_else(|| self.not_a_list())?;
        Ok(f(&mut list.write()))
    }

    fn not_a_list(&self) -> RuntimeError {
        RuntimeError::NotAList {
            ty: self.ty().to_string(),
        }
    }
}

impl fmt::Debug for DreamObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variables are omitted: objects can reference themselves.
        f.debug_struct("DreamObject")
            .field("ty", self.ty())
            .field("deleted", &self.is_deleted())
            .finish_non_exhaustive()
    }
}
