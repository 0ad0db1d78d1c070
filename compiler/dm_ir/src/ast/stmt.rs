//! Proc-body statements.
//!
//! Everything that may appear inside a proc: expressions, local `var`
//! declarations and control flow.

use super::expr::Expr;
use crate::DreamPath;

/// The statements of a proc body or nested block.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ProcBlockInner {
    pub statements: Vec<ProcStatement>,
}

impl ProcBlockInner {
    pub fn new(statements: Vec<ProcStatement>) -> Self {
        ProcBlockInner { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A local `var` declaration: `var/obj/item/I = new`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ProcVarDeclaration {
    /// Declared type, if any: `/obj/item` above.
    pub ty: Option<DreamPath>,
    pub name: String,
    pub value: Option<Expr>,
}

impl ProcVarDeclaration {
    /// Build from the full declaration path (`var/obj/item/I`).
    ///
    /// Everything between the `var` marker and the name is the type.
    pub fn new(path: &DreamPath, value: Option<Expr>) -> Self {
        let type_start = path.find_element("var").map_or(0, |index| index + 1);
        let type_path = path.from_elements(type_start, -2);
        ProcVarDeclaration {
            ty: (!type_path.is_empty()).then_some(type_path),
            name: path.last_element().unwrap_or_default().to_owned(),
            value,
        }
    }
}

/// One arm of a `switch`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SwitchCase {
    /// `else`
    Default(ProcBlockInner),
    /// `if(1, 2, "three")`; the values are constants.
    Values {
        values: Vec<Expr>,
        body: ProcBlockInner,
    },
}

impl SwitchCase {
    pub fn body(&self) -> &ProcBlockInner {
        match self {
            SwitchCase::Default(body) | SwitchCase::Values { body, .. } => body,
        }
    }
}

/// Statements that may appear in a proc body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ProcStatement {
    /// An expression evaluated for its effect.
    Expression(Expr),

    VarDeclaration(ProcVarDeclaration),

    /// `return` or `return value`
    Return(Option<Expr>),

    Break,
    Continue,

    /// `goto label`
    Goto(String),

    /// `label:`
    Label(String),

    /// `del value`
    Del(Expr),

    /// `set name = value` (verb attributes such as `src` or `hidden`)
    Set { attribute: String, value: Expr },

    /// `spawn(time) body`: resume `body` after `time` ticks.
    Spawn {
        time: Option<Expr>,
        body: ProcBlockInner,
    },

    If {
        condition: Expr,
        body: ProcBlockInner,
        else_body: Option<ProcBlockInner>,
    },

    /// `for(init; comparator; incrementor)`
    ForStandard {
        initializer: Option<Box<ProcStatement>>,
        comparator: Option<Expr>,
        incrementor: Option<Expr>,
        body: ProcBlockInner,
    },

    /// `for(var/item in list)`
    ForList {
        initializer: Option<Box<ProcStatement>>,
        variable: String,
        list: Expr,
        body: ProcBlockInner,
    },

    /// `for(var/i = 1 to 10 step 2)`
    ForRange {
        initializer: Option<Box<ProcStatement>>,
        variable: String,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: ProcBlockInner,
    },

    /// `for(var/x = 0, x < 10, x++)`: the comma-separated form.
    ForLoop {
        declaration: Option<ProcVarDeclaration>,
        variable: Option<Expr>,
        condition: Option<Expr>,
        incrementer: Option<Expr>,
        body: ProcBlockInner,
    },

    While {
        condition: Expr,
        body: ProcBlockInner,
    },

    DoWhile {
        condition: Expr,
        body: ProcBlockInner,
    },

    Switch {
        value: Expr,
        cases: Vec<SwitchCase>,
    },

    /// `receiver << browse(body, options)`
    Browse {
        receiver: Expr,
        body: Expr,
        options: Expr,
    },

    /// `receiver << browse_rsc(file, filename)`
    BrowseResource {
        receiver: Expr,
        file: Expr,
        filename: Expr,
    },

    /// `receiver << output(message, control)`
    OutputControl {
        receiver: Expr,
        message: Expr,
        control: Expr,
    },
}
