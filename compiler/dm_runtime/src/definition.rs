//! Object definitions: the compiled template of a class.
//!
//! A definition holds variable defaults, global variable cells, procs and an
//! optional init proc. Lookups that miss locally continue in the declared
//! parent's definition, which may differ from the parent in the path when
//! the class was declared with an explicit `parent_type`.
//!
//! Definitions are filled in while the tree loads and shared behind an `Arc`
//! afterwards. Only global cell contents and the attached meta-object change
//! once loading is done.

use crate::meta_object::MetaObject;
use crate::proc::DreamProc;
use crate::value::DreamValue;
use dm_ir::DreamPath;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// A class-shared variable cell.
///
/// Lookups return a handle to the same cell, so a write through any
/// descendant is visible to every class that does not shadow the name.
#[derive(Clone, Debug, Default)]
pub struct GlobalVariable(Arc<RwLock<DreamValue>>);

impl GlobalVariable {
    pub fn new(value: DreamValue) -> Self {
        GlobalVariable(Arc::new(RwLock::new(value)))
    }

    pub fn get(&self) -> DreamValue {
        self.0.read().clone()
    }

    pub fn set(&self, value: DreamValue) -> DreamValue {
        std::mem::replace(&mut *self.0.write(), value)
    }

    /// Whether both handles refer to the same cell.
    pub fn ptr_eq(&self, other: &GlobalVariable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

pub struct ObjectDefinition {
    ty: DreamPath,
    parent: Option<Arc<ObjectDefinition>>,
    variables: FxHashMap<String, DreamValue>,
    global_variables: FxHashMap<String, GlobalVariable>,
    procs: FxHashMap<String, Arc<DreamProc>>,
    init_proc: Option<Arc<DreamProc>>,
    meta_object: RwLock<Option<Arc<dyn MetaObject>>>,
}

impl ObjectDefinition {
    /// A definition with no parent (the root).
    pub fn new(ty: DreamPath) -> Self {
        ObjectDefinition {
            ty,
            parent: None,
            variables: FxHashMap::default(),
            global_variables: FxHashMap::default(),
            procs: FxHashMap::default(),
            init_proc: None,
            meta_object: RwLock::new(None),
        }
    }

    pub fn with_parent(ty: DreamPath, parent: Arc<ObjectDefinition>) -> Self {
        ObjectDefinition {
            parent: Some(parent),
            ..ObjectDefinition::new(ty)
        }
    }

    pub fn ty(&self) -> &DreamPath {
        &self.ty
    }

    pub fn parent(&self) -> Option<&Arc<ObjectDefinition>> {
        self.parent.as_ref()
    }

    /// This definition followed by its declared ancestors.
    pub fn ancestry(&self) -> impl Iterator<Item = &ObjectDefinition> {
        std::iter::successors(Some(self), |definition| definition.parent.as_deref())
    }

    pub fn is_subtype_of(&self, path: &DreamPath) -> bool {
        self.ancestry().any(|definition| definition.ty == *path)
    }

    // Variables

    pub fn set_variable_definition(&mut self, name: impl Into<String>, value: DreamValue) {
        self.variables.insert(name.into(), value);
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable_default(name).is_some()
    }

    pub fn variable_default(&self, name: &str) -> Option<&DreamValue> {
        self.ancestry()
            .find_map(|definition| definition.variables.get(name))
    }

    /// Defaults along the whole chain; a descendant's default wins.
    pub fn variable_defaults(&self) -> FxHashMap<String, DreamValue> {
        let chain: Vec<&ObjectDefinition> = self.ancestry().collect();
        let mut defaults = FxHashMap::default();
        for definition in chain.into_iter().rev() {
            for (name, value) in &definition.variables {
                defaults.insert(name.clone(), value.clone());
            }
        }
        defaults
    }

    // Globals

    pub fn add_global_variable(&mut self, name: impl Into<String>, value: DreamValue) {
        self.global_variables
            .insert(name.into(), GlobalVariable::new(value));
    }

    pub fn has_global_variable(&self, name: &str) -> bool {
        self.global_variable(name).is_some()
    }

    pub fn global_variable(&self, name: &str) -> Option<GlobalVariable> {
        self.ancestry()
            .find_map(|definition| definition.global_variables.get(name))
            .cloned()
    }

    // Procs

    /// Add `proc` under `name`. If a proc of that name already resolves on
    /// this definition (locally or inherited), it becomes the new proc's super.
    pub fn set_proc_definition(&mut self, name: impl Into<String>, mut proc: DreamProc) {
        let name = name.into();
        proc.super_proc = self.proc(&name);
        self.procs.insert(name, Arc::new(proc));
    }

    pub fn has_proc(&self, name: &str) -> bool {
        self.proc(name).is_some()
    }

    pub fn proc(&self, name: &str) -> Option<Arc<DreamProc>> {
        self.ancestry()
            .find_map(|definition| definition.procs.get(name))
            .cloned()
    }

    /// Names of procs declared on this definition itself.
    pub fn local_proc_names(&self) -> impl Iterator<Item = &str> {
        self.procs.keys().map(String::as_str)
    }

    /// The init proc, inherited when not set locally.
    pub fn init_proc(&self) -> Option<Arc<DreamProc>> {
        self.ancestry()
            .find_map(|definition| definition.init_proc.as_ref())
            .cloned()
    }

    /// Set the init proc, chaining to the one currently in effect.
    pub fn set_init_proc(&mut self, mut proc: DreamProc) {
        proc.super_proc = self.init_proc();
        self.init_proc = Some(Arc::new(proc));
    }

    // Meta-object

    pub fn meta_object(&self) -> Option<Arc<dyn MetaObject>> {
        self.meta_object.read().clone()
    }

    pub fn set_meta_object(&self, meta_object: Option<Arc<dyn MetaObject>>) {
        *self.meta_object.write() = meta_object;
    }
}

impl fmt::Debug for ObjectDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDefinition")
            .field("ty", &self.ty)
            .field("parent", &self.parent.as_ref().map(|parent| parent.ty()))
            .field("variables", &self.variables.len())
            .field("global_variables", &self.global_variables.len())
            .field("procs", &self.procs.len())
            .field("meta_object", &self.meta_object.read().is_some())
            .finish_non_exhaustive()
    }
}
