//! The object tree.
//!
//! Every class is an entry in an arena addressed by `TreeEntryId`. Two
//! relations connect entries:
//!
//! - **path children**: `/obj/item` is a path child of `/obj`. Resolving a
//!   path walks these.
//! - **declared parent**: the definition a class inherits from. Usually the
//!   path parent, but a class declared with an explicit parent (`/obj` with
//!   `parent_type = /atom/movable`) is a *branch-breaking* child of that
//!   declared parent instead.
//!
//! A branch-breaking child is still a path child of its lexical parent, so
//! it can be resolved by path; it is listed separately under its declared
//! parent. `derived_children` gives the inheritance relation.
//!
//! Loading replaces the whole tree; there is no incremental reload.

use crate::definition::ObjectDefinition;
use crate::errors::{LoadError, RuntimeError, RuntimeResult};
use crate::json::{self, DreamObjectJson};
use crate::meta_object::{ListMetaObject, MetaObject};
use crate::object::{DreamObject, ObjectRef};
use crate::proc::DreamProcArguments;
use crate::resource::ResourceLoader;
use dm_ir::DreamPath;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Index of an entry in an `ObjectTree`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeEntryId(u32);

impl TreeEntryId {
    pub const ROOT: TreeEntryId = TreeEntryId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct TreeEntry {
    definition: Arc<ObjectDefinition>,
    children: FxHashMap<String, TreeEntryId>,
    branch_breaking_children: FxHashMap<String, TreeEntryId>,
    parent: Option<TreeEntryId>,
    explicit_parent: bool,
}

impl TreeEntry {
    fn new(definition: ObjectDefinition, parent: Option<TreeEntryId>, explicit: bool) -> Self {
        TreeEntry {
            definition: Arc::new(definition),
            children: FxHashMap::default(),
            branch_breaking_children: FxHashMap::default(),
            parent,
            explicit_parent: explicit,
        }
    }

    pub fn definition(&self) -> &Arc<ObjectDefinition> {
        &self.definition
    }

    pub fn path(&self) -> &DreamPath {
        self.definition.ty()
    }

    /// Path children, by name.
    pub fn children(&self) -> &FxHashMap<String, TreeEntryId> {
        &self.children
    }

    /// Entries declared with this entry as their explicit parent.
    pub fn branch_breaking_children(&self) -> &FxHashMap<String, TreeEntryId> {
        &self.branch_breaking_children
    }

    /// The declared parent (`None` for the root).
    pub fn parent(&self) -> Option<TreeEntryId> {
        self.parent
    }

    /// Whether the declared parent was given explicitly.
    pub fn has_explicit_parent(&self) -> bool {
        self.explicit_parent
    }
}

pub struct ObjectTree {
    entries: Vec<TreeEntry>,
}

impl Default for ObjectTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectTree {
    /// A tree holding only the root.
    pub fn new() -> Self {
        ObjectTree {
            entries: vec![TreeEntry::new(
                ObjectDefinition::new(DreamPath::root()),
                None,
                false,
            )],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the root exists.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn root(&self) -> &TreeEntry {
        self.node(TreeEntryId::ROOT)
    }

    /// The entry for `id`, or `None` for an id from an earlier load.
    pub fn entry(&self, id: TreeEntryId) -> Option<&TreeEntry> {
        self.entries.get(id.index())
    }

    /// Ids produced by this tree's own walks and loads are always in range.
    fn node(&self, id: TreeEntryId) -> &TreeEntry {
        &self.entries[id.index()]
    }

    /// All entries in load order, root first.
    pub fn entries(&self) -> impl Iterator<Item = (TreeEntryId, &TreeEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (Self::id_at(index), entry))
    }

    fn id_at(index: usize) -> TreeEntryId {
        TreeEntryId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    // Resolution

    pub fn has_entry(&self, path: &DreamPath) -> bool {
        path.is_absolute() && self.walk(path).is_some()
    }

    pub fn entry_id(&self, path: &DreamPath) -> RuntimeResult<TreeEntryId> {
        if !path.is_absolute() {
            return Err(RuntimeError::PathNotAbsolute { path: path.clone() });
        }
        self.walk(path)
            .ok_or_else(|| RuntimeError::object_does_not_exist(path))
    }

    pub fn get_tree_entry(&self, path: &DreamPath) -> RuntimeResult<&TreeEntry> {
        self.entry_id(path).map(|id| self.node(id))
    }

    pub fn get_object_definition(&self, path: &DreamPath) -> RuntimeResult<Arc<ObjectDefinition>> {
        self.get_tree_entry(path)
            .map(|entry| Arc::clone(&entry.definition))
    }

    fn walk(&self, path: &DreamPath) -> Option<TreeEntryId> {
        path.elements()
            .iter()
            .try_fold(TreeEntryId::ROOT, |id, element| {
                self.node(id).children.get(element).copied()
            })
    }

    // Relations

    /// Entries that inherit directly from `id`: path children without an
    /// explicit parent, then branch-breaking children. Empty for a stale id.
    pub fn derived_children(&self, id: TreeEntryId) -> Vec<TreeEntryId> {
        let Some(entry) = self.entry(id) else {
            return Vec::new();
        };
        let mut derived: Vec<TreeEntryId> = entry
            .children
            .values()
            .copied()
            .filter(|child| !self.node(*child).explicit_parent)
            .collect();
        derived.extend(entry.branch_breaking_children.values().copied());
        derived.sort_unstable();
        derived
    }

    /// Entries below `id` through path children and, if requested,
    /// branch-breaking children. Each entry is listed once.
    pub fn descendants(
        &self,
        id: TreeEntryId,
        include_branch_breaking: bool,
        inclusive: bool,
    ) -> Vec<TreeEntryId> {
        let mut seen = FxHashSet::default();
        let mut descendants = Vec::new();
        let mut stack = vec![id];
        seen.insert(id);

        while let Some(current) = stack.pop() {
            let Some(entry) = self.entry(current) else {
                continue;
            };
            if current != id || inclusive {
                descendants.push(current);
            }
            let branch_breaking = include_branch_breaking
                .then_some(&entry.branch_breaking_children)
                .into_iter()
                .flat_map(FxHashMap::values);
            for child in entry.children.values().chain(branch_breaking) {
                if seen.insert(*child) {
                    stack.push(*child);
                }
            }
        }
        descendants.sort_unstable();
        descendants
    }

    // Objects and hooks

    /// Instantiate the type at `path`. List types get list storage.
    ///
    /// `/list` is always creatable: when the loaded tree does not declare it,
    /// the instance uses a bare `/list` definition with list hooks.
    pub fn create_object(
        &self,
        path: &DreamPath,
        arguments: &DreamProcArguments,
    ) -> RuntimeResult<ObjectRef> {
        let definition = match self.get_object_definition(path) {
            Ok(definition) => definition,
            Err(RuntimeError::ObjectDoesNotExist { .. }) if *path == DreamPath::list() => {
                let definition = ObjectDefinition::new(DreamPath::list());
                definition.set_meta_object(Some(Arc::new(ListMetaObject)));
                Arc::new(definition)
            }
            Err(error) => return Err(error),
        };
        DreamObject::create(definition, arguments).inspect_err(|error| {
            tracing::warn!(%path, %error, "object creation rejected");
        })
    }

    /// Attach `meta_object` to the entry at `path` and everything below it
    /// by either child relation. Returns the number of entries updated.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path))]
    pub fn set_meta_object(
        &self,
        path: &DreamPath,
        meta_object: Arc<dyn MetaObject>,
    ) -> RuntimeResult<usize> {
        let id = self.entry_id(path)?;
        let entries = self.descendants(id, true, true);
        for entry in &entries {
            self.node(*entry)
                .definition
                .set_meta_object(Some(Arc::clone(&meta_object)));
        }
        tracing::debug!(entries = entries.len(), "attached meta-object");
        Ok(entries.len())
    }

    // Loading

    /// Replace the tree with the one described by `text`.
    pub fn load_from_str(
        &mut self,
        text: &str,
        resources: &dyn ResourceLoader,
    ) -> Result<(), LoadError> {
        let root = json::parse(text)?;
        self.load(&root, resources)
    }

    /// Replace the tree with the one described by `root`.
    ///
    /// The new tree is built separately; on error `self` is unchanged.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load(
        &mut self,
        root: &DreamObjectJson,
        resources: &dyn ResourceLoader,
    ) -> Result<(), LoadError> {
        if !root.name.is_empty() {
            return Err(LoadError::InvalidRootName {
                name: root.name.clone(),
            });
        }

        let mut definition = ObjectDefinition::new(DreamPath::root());
        load_members(&mut definition, root, resources)?;
        let mut tree = ObjectTree {
            entries: vec![TreeEntry::new(definition, None, false)],
        };
        tree.load_children(TreeEntryId::ROOT, root, resources)?;

        tracing::debug!(entries = tree.len(), "loaded object tree");
        *self = tree;
        Ok(())
    }

    fn load_children(
        &mut self,
        id: TreeEntryId,
        json: &DreamObjectJson,
        resources: &dyn ResourceLoader,
    ) -> Result<(), LoadError> {
        for child in json.children() {
            let path = self.node(id).path().add_to_path(&child.name);
            if self.node(id).children.contains_key(&child.name) {
                return Err(LoadError::DuplicateEntry { path });
            }

            let declared_parent = match &child.parent {
                Some(parent) => self.entry_id(&DreamPath::new(parent))?,
                None => id,
            };
            let explicit = child.parent.is_some();

            let mut definition = ObjectDefinition::with_parent(
                path.clone(),
                Arc::clone(&self.node(declared_parent).definition),
            );
            load_members(&mut definition, child, resources)?;

            let child_id = Self::id_at(self.entries.len());
            self.entries
                .push(TreeEntry::new(definition, Some(declared_parent), explicit));
            self.entries[id.index()]
                .children
                .insert(child.name.clone(), child_id);
            if explicit {
                let previous = self.entries[declared_parent.index()]
                    .branch_breaking_children
                    .insert(child.name.clone(), child_id);
                if previous.is_some() {
                    return Err(LoadError::DuplicateEntry { path });
                }
            }
            tracing::trace!(%path, explicit, "loaded entry");

            dm_ir::ensure_sufficient_stack(|| self.load_children(child_id, child, resources))?;
        }
        Ok(())
    }
}

/// Load an entry's own variables, globals, init proc and procs.
fn load_members(
    definition: &mut ObjectDefinition,
    json: &DreamObjectJson,
    resources: &dyn ResourceLoader,
) -> Result<(), LoadError> {
    for (name, value) in json.variables.iter().flatten() {
        definition.set_variable_definition(name.as_str(), json::decode_value(value, resources)?);
    }
    for (name, value) in json.global_variables.iter().flatten() {
        definition.add_global_variable(name.as_str(), json::decode_value(value, resources)?);
    }
    if let Some(init_proc) = &json.init_proc {
        definition.set_init_proc(init_proc.to_proc("<init>"));
    }
    for (name, overloads) in json.procs.iter().flatten() {
        for proc in overloads {
            definition.set_proc_definition(name.as_str(), proc.to_proc(name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
