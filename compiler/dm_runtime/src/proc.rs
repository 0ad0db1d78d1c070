//! Compiled procs and call arguments.

use crate::value::DreamValue;
use dm_ir::DMValueType;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A compiled proc: bytecode plus its argument signature.
///
/// Overriding a proc that already resolves on a definition links the new
/// implementation to the previous one through `super_proc`, which is what
/// `..()` calls.
#[derive(Clone, Debug)]
pub struct DreamProc {
    name: String,
    bytecode: Vec<u8>,
    argument_names: Vec<String>,
    argument_types: Vec<DMValueType>,
    pub(crate) super_proc: Option<Arc<DreamProc>>,
}

impl DreamProc {
    pub fn new(
        name: impl Into<String>,
        bytecode: Vec<u8>,
        argument_names: Vec<String>,
        argument_types: Vec<DMValueType>,
    ) -> Self {
        DreamProc {
            name: name.into(),
            bytecode,
            argument_names,
            argument_types,
            super_proc: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    pub fn argument_names(&self) -> &[String] {
        &self.argument_names
    }

    /// Declared `as` type of argument `index`; untyped arguments accept anything.
    pub fn argument_type(&self, index: usize) -> DMValueType {
        self.argument_types
            .get(index)
            .copied()
            .unwrap_or(DMValueType::ANYTHING)
    }

    pub fn super_proc(&self) -> Option<&Arc<DreamProc>> {
        self.super_proc.as_ref()
    }

    /// This proc followed by every implementation it overrides.
    pub fn super_chain(&self) -> impl Iterator<Item = &DreamProc> {
        std::iter::successors(Some(self), |proc| proc.super_proc.as_deref())
    }
}

/// Arguments passed to a proc call or to `new`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DreamProcArguments {
    pub ordered: Vec<DreamValue>,
    pub named: FxHashMap<String, DreamValue>,
}

impl DreamProcArguments {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(ordered: Vec<DreamValue>) -> Self {
        DreamProcArguments {
            ordered,
            named: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: DreamValue) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.ordered.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty() && self.named.is_empty()
    }

    /// The argument bound to parameter `index`/`name`: a named argument wins
    /// over a positional one. Missing arguments are null.
    pub fn argument(&self, index: usize, name: &str) -> DreamValue {
        self.named
            .get(name)
            .or_else(|| self.ordered.get(index))
            .cloned()
            .unwrap_or_default()
    }
}
