//! Object-level declarations.
//!
//! A DM file is a list of declarations against class paths. Declaration
//! paths carry marker elements (`proc`, `verb`, `var`, `global`) that the
//! constructors here strip and record, so later passes see the declaring
//! object path and the declared name separately.
//!
//! ```text
//! /mob/proc/attack(target)       -> object /mob, proc `attack`
//! /mob/verb/say(msg as text)     -> object /mob, verb `say`
//! /obj/var/global/count = 0      -> object /obj, global var `count`
//! /obj/item/var/list/contents    -> object /obj/item, var `contents` of type list
//! /proc/helper()                 -> no object: a root-level proc
//! ```

use super::expr::Expr;
use super::stmt::ProcBlockInner;
use crate::{DMValueType, DreamPath};

/// A parsed source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct File {
    pub block: BlockInner,
}

/// The statements of a file or object block.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct BlockInner {
    pub statements: Vec<Statement>,
}

impl BlockInner {
    pub fn new(statements: Vec<Statement>) -> Self {
        BlockInner { statements }
    }
}

/// Object-level statements.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Statement {
    ObjectDefinition(ObjectDefinition),
    ProcDefinition(ProcDefinition),
    ObjectVarDefinition(ObjectVarDefinition),
    ObjectVarOverride(ObjectVarOverride),
}

/// `/obj/item` with an optional indented block of nested declarations.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ObjectDefinition {
    pub path: DreamPath,
    pub block: Option<BlockInner>,
}

/// A proc or verb declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ProcDefinition {
    /// Declaring object; `None` for a root-level proc.
    pub object_path: Option<DreamPath>,
    pub name: String,
    pub is_verb: bool,
    pub parameters: Vec<DefinitionParameter>,
    pub body: ProcBlockInner,
}

impl ProcDefinition {
    /// Build from the full declaration path.
    ///
    /// The first `proc` marker is removed; if there is none, the first
    /// `verb` marker is removed and the definition is a verb. The last
    /// remaining element is the name, the elements before it the object.
    pub fn new(
        path: &DreamPath,
        parameters: Vec<DefinitionParameter>,
        body: ProcBlockInner,
    ) -> Self {
        let (path, is_verb) = if let Some(index) = path.find_element("proc") {
            (path.remove_element(index), false)
        } else if let Some(index) = path.find_element("verb") {
            (path.remove_element(index), true)
        } else {
            (path.clone(), false)
        };

        ProcDefinition {
            object_path: (path.len() > 1).then(|| path.from_elements(0, -2)),
            name: path.last_element().unwrap_or_default().to_owned(),
            is_verb,
            parameters,
            body,
        }
    }
}

/// A `var` declaration on an object.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ObjectVarDefinition {
    /// Declaring object; `None` for a root-level var.
    pub object_path: Option<DreamPath>,
    /// Declared type: `list` in `/obj/var/list/contents`.
    pub ty: Option<DreamPath>,
    pub name: String,
    pub value: Expr,
    pub is_global: bool,
}

impl ObjectVarDefinition {
    /// Build from the full declaration path.
    ///
    /// A `global` marker anywhere in the path makes the var class-shared.
    /// The object path ends before the `var` marker; the type runs from
    /// after the marker to before the name.
    pub fn new(path: &DreamPath, value: Expr) -> Self {
        let (path, is_global) = match path.find_element("global") {
            Some(index) => (path.remove_element(index), true),
            None => (path.clone(), false),
        };

        let var_index = path.find_element("var");
        let var_path = path.from_elements(var_index.map_or(0, |index| index + 1), -1);

        ObjectVarDefinition {
            object_path: var_index
                .filter(|&index| index > 0)
                .map(|index| path.slice(0, index)),
            ty: (var_path.len() > 1).then(|| var_path.from_elements(0, -2)),
            name: var_path.last_element().unwrap_or_default().to_owned(),
            value,
            is_global,
        }
    }
}

/// A default-value override for an inherited var: `/obj/item/name = "sword"`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ObjectVarOverride {
    pub object_path: Option<DreamPath>,
    pub var_name: String,
    pub value: Expr,
}

impl ObjectVarOverride {
    pub fn new(path: &DreamPath, value: Expr) -> Self {
        ObjectVarOverride {
            object_path: (path.len() > 1).then(|| path.from_elements(0, -2)),
            var_name: path.last_element().unwrap_or_default().to_owned(),
            value,
        }
    }
}

/// A parameter in a proc signature: `obj/item/I = null as obj|null in L`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DefinitionParameter {
    /// Declared object type: `/obj/item` above.
    pub object_type: Option<DreamPath>,
    pub name: String,
    /// Default value.
    pub value: Option<Expr>,
    /// Accepted value kinds from the `as` clause.
    pub ty: DMValueType,
    /// The `in` clause.
    pub possible_values: Option<Expr>,
}

impl DefinitionParameter {
    /// Build from the parameter path. A `var` marker is optional and dropped.
    pub fn new(
        path: &DreamPath,
        value: Option<Expr>,
        ty: DMValueType,
        possible_values: Option<Expr>,
    ) -> Self {
        let path = match path.find_element("var") {
            Some(index) => path.remove_element(index),
            None => path.clone(),
        };

        DefinitionParameter {
            object_type: (path.len() > 1).then(|| path.from_elements(0, -2)),
            name: path.last_element().unwrap_or_default().to_owned(),
            value,
            ty,
            possible_values,
        }
    }
}
