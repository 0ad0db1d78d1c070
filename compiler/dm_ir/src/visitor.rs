//! Syntax Tree Visitor
//!
//! Generic traversal so that independent passes (name resolution, constant
//! folding, code generation) can be added without touching node types.
//!
//! # Design
//!
//! `Visitor` has one `visit_*` method per node category. Each default calls
//! the matching `walk_*` function, which visits every child in source order.
//! A pass overrides only the methods it cares about and calls `walk_*` to
//! keep descending.
//!
//! The `walk_*` functions match exhaustively on the node enums, so adding a
//! node variant fails to compile here until traversal handles it, rather than
//! failing when a pass first meets the node at runtime.
//!
//! # Example
//!
//! ```text
//! struct CountIdentifiers {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountIdentifiers {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if let Expr::Identifier(_) = expr {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{
    BlockInner, CallParameter, Callable, DefinitionParameter, Dereference, Expr, File, NewTarget,
    ObjectDefinition, ObjectVarDefinition, ObjectVarOverride, ProcBlockInner, ProcDefinition,
    ProcStatement, ProcVarDeclaration, Statement, SwitchCase,
};
use crate::{ensure_sufficient_stack, DreamPath};

// Visitor Trait

/// Syntax tree visitor.
///
/// The visitor may mutate its own state; the tree itself is immutable.
pub trait Visitor<'ast> {
    fn visit_file(&mut self, file: &'ast File) {
        walk_file(self, file);
    }

    fn visit_block(&mut self, block: &'ast BlockInner) {
        walk_block(self, block);
    }

    fn visit_statement(&mut self, statement: &'ast Statement) {
        walk_statement(self, statement);
    }

    fn visit_object_definition(&mut self, definition: &'ast ObjectDefinition) {
        walk_object_definition(self, definition);
    }

    fn visit_proc_definition(&mut self, definition: &'ast ProcDefinition) {
        walk_proc_definition(self, definition);
    }

    fn visit_object_var_definition(&mut self, definition: &'ast ObjectVarDefinition) {
        self.visit_expr(&definition.value);
    }

    fn visit_object_var_override(&mut self, var_override: &'ast ObjectVarOverride) {
        self.visit_expr(&var_override.value);
    }

    /// Visit a class path wherever one appears as a node.
    fn visit_path(&mut self, path: &'ast DreamPath) {
        let _ = path;
    }

    fn visit_definition_parameter(&mut self, parameter: &'ast DefinitionParameter) {
        walk_definition_parameter(self, parameter);
    }

    fn visit_proc_block(&mut self, block: &'ast ProcBlockInner) {
        walk_proc_block(self, block);
    }

    fn visit_proc_statement(&mut self, statement: &'ast ProcStatement) {
        walk_proc_statement(self, statement);
    }

    fn visit_var_declaration(&mut self, declaration: &'ast ProcVarDeclaration) {
        if let Some(value) = &declaration.value {
            self.visit_expr(value);
        }
    }

    fn visit_switch_case(&mut self, case: &'ast SwitchCase) {
        walk_switch_case(self, case);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_call_parameter(&mut self, parameter: &'ast CallParameter) {
        self.visit_expr(&parameter.value);
    }

    fn visit_dereference(&mut self, dereference: &'ast Dereference) {
        self.visit_expr(&dereference.expression);
    }

    fn visit_callable(&mut self, callable: &'ast Callable) {
        walk_callable(self, callable);
    }
}

// Accept

/// Double dispatch: a node hands itself to the visitor method named for it.
pub trait Accept<'ast> {
    fn accept<V: Visitor<'ast> + ?Sized>(&'ast self, visitor: &mut V);
}

macro_rules! impl_accept {
    ($($node:ty => $method:ident),* $(,)?) => {
        $(
            impl<'ast> Accept<'ast> for $node {
                #[inline]
                fn accept<V: Visitor<'ast> + ?Sized>(&'ast self, visitor: &mut V) {
                    visitor.$method(self);
                }
            }
        )*
    };
}

impl_accept! {
    File => visit_file,
    BlockInner => visit_block,
    Statement => visit_statement,
    ObjectDefinition => visit_object_definition,
    ProcDefinition => visit_proc_definition,
    ObjectVarDefinition => visit_object_var_definition,
    ObjectVarOverride => visit_object_var_override,
    DreamPath => visit_path,
    DefinitionParameter => visit_definition_parameter,
    ProcBlockInner => visit_proc_block,
    ProcStatement => visit_proc_statement,
    ProcVarDeclaration => visit_var_declaration,
    SwitchCase => visit_switch_case,
    Expr => visit_expr,
    CallParameter => visit_call_parameter,
    Dereference => visit_dereference,
    Callable => visit_callable,
}

// Walk Functions
//
// All walk functions traverse children depth-first, left to right, in the
// order they appear in source.

pub fn walk_file<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, file: &'ast File) {
    visitor.visit_block(&file.block);
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast BlockInner) {
    for statement in &block.statements {
        visitor.visit_statement(statement);
    }
}

pub fn walk_statement<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    statement: &'ast Statement,
) {
    match statement {
        Statement::ObjectDefinition(definition) => visitor.visit_object_definition(definition),
        Statement::ProcDefinition(definition) => visitor.visit_proc_definition(definition),
        Statement::ObjectVarDefinition(definition) => {
            visitor.visit_object_var_definition(definition);
        }
        Statement::ObjectVarOverride(var_override) => {
            visitor.visit_object_var_override(var_override);
        }
    }
}

pub fn walk_object_definition<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    definition: &'ast ObjectDefinition,
) {
    visitor.visit_path(&definition.path);
    if let Some(block) = &definition.block {
        ensure_sufficient_stack(|| visitor.visit_block(block));
    }
}

pub fn walk_proc_definition<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    definition: &'ast ProcDefinition,
) {
    for parameter in &definition.parameters {
        visitor.visit_definition_parameter(parameter);
    }
    visitor.visit_proc_block(&definition.body);
}

pub fn walk_definition_parameter<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    parameter: &'ast DefinitionParameter,
) {
    if let Some(value) = &parameter.value {
        visitor.visit_expr(value);
    }
    if let Some(possible_values) = &parameter.possible_values {
        visitor.visit_expr(possible_values);
    }
}

pub fn walk_proc_block<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    block: &'ast ProcBlockInner,
) {
    for statement in &block.statements {
        visitor.visit_proc_statement(statement);
    }
}

pub fn walk_switch_case<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, case: &'ast SwitchCase) {
    match case {
        SwitchCase::Default(body) => visitor.visit_proc_block(body),
        SwitchCase::Values { values, body } => {
            for value in values {
                visitor.visit_expr(value);
            }
            visitor.visit_proc_block(body);
        }
    }
}

/// Walk a proc statement's children.
pub fn walk_proc_statement<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    statement: &'ast ProcStatement,
) {
    ensure_sufficient_stack(|| match statement {
        ProcStatement::Expression(expr) | ProcStatement::Del(expr) => visitor.visit_expr(expr),
        ProcStatement::VarDeclaration(declaration) => visitor.visit_var_declaration(declaration),
        ProcStatement::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        ProcStatement::Break
        | ProcStatement::Continue
        | ProcStatement::Goto(_)
        | ProcStatement::Label(_) => {}
        ProcStatement::Set { value, .. } => visitor.visit_expr(value),
        ProcStatement::Spawn { time, body } => {
            if let Some(time) = time {
                visitor.visit_expr(time);
            }
            visitor.visit_proc_block(body);
        }
        ProcStatement::If {
            condition,
            body,
            else_body,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_proc_block(body);
            if let Some(else_body) = else_body {
                visitor.visit_proc_block(else_body);
            }
        }
        ProcStatement::ForStandard {
            initializer,
            comparator,
            incrementor,
            body,
        } => {
            if let Some(initializer) = initializer {
                visitor.visit_proc_statement(initializer);
            }
            if let Some(comparator) = comparator {
                visitor.visit_expr(comparator);
            }
            if let Some(incrementor) = incrementor {
                visitor.visit_expr(incrementor);
            }
            visitor.visit_proc_block(body);
        }
        ProcStatement::ForList {
            initializer,
            list,
            body,
            ..
        } => {
            if let Some(initializer) = initializer {
                visitor.visit_proc_statement(initializer);
            }
            visitor.visit_expr(list);
            visitor.visit_proc_block(body);
        }
        ProcStatement::ForRange {
            initializer,
            start,
            end,
            step,
            body,
            ..
        } => {
            if let Some(initializer) = initializer {
                visitor.visit_proc_statement(initializer);
            }
            visitor.visit_expr(start);
            visitor.visit_expr(end);
            if let Some(step) = step {
                visitor.visit_expr(step);
            }
            visitor.visit_proc_block(body);
        }
        ProcStatement::ForLoop {
            declaration,
            variable,
            condition,
            incrementer,
            body,
        } => {
            if let Some(declaration) = declaration {
                visitor.visit_var_declaration(declaration);
            }
            for expr in [variable, condition, incrementer].into_iter().flatten() {
                visitor.visit_expr(expr);
            }
            visitor.visit_proc_block(body);
        }
        ProcStatement::While { condition, body } | ProcStatement::DoWhile { condition, body } => {
            visitor.visit_expr(condition);
            visitor.visit_proc_block(body);
        }
        ProcStatement::Switch { value, cases } => {
            visitor.visit_expr(value);
            for case in cases {
                visitor.visit_switch_case(case);
            }
        }
        ProcStatement::Browse {
            receiver,
            body: first,
            options: second,
        }
        | ProcStatement::BrowseResource {
            receiver,
            file: first,
            filename: second,
        }
        | ProcStatement::OutputControl {
            receiver,
            message: first,
            control: second,
        } => {
            visitor.visit_expr(receiver);
            visitor.visit_expr(first);
            visitor.visit_expr(second);
        }
    });
}

fn walk_call_parameters<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    parameters: &'ast [CallParameter],
) {
    for parameter in parameters {
        visitor.visit_call_parameter(parameter);
    }
}

/// Walk an expression's children.
pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    ensure_sufficient_stack(|| match expr {
        Expr::Integer(_)
        | Expr::Float(_)
        | Expr::String(_)
        | Expr::Resource(_)
        | Expr::Null
        | Expr::Identifier(_) => {}
        Expr::Path(path) => visitor.visit_path(path),
        Expr::StringFormat { interpolated, .. } => {
            for value in interpolated {
                visitor.visit_expr(value);
            }
        }
        Expr::List(parameters) => walk_call_parameters(visitor, parameters),
        Expr::Input {
            parameters, list, ..
        } => {
            walk_call_parameters(visitor, parameters);
            if let Some(list) = list {
                visitor.visit_expr(list);
            }
        }
        Expr::Initial(inner) | Expr::ImplicitIsType(inner) => visitor.visit_expr(inner),
        Expr::IsType { value, ty } => {
            visitor.visit_expr(value);
            visitor.visit_expr(ty);
        }
        Expr::LocateCoordinates { x, y, z } => {
            visitor.visit_expr(x);
            visitor.visit_expr(y);
            visitor.visit_expr(z);
        }
        Expr::Locate {
            expression,
            container,
        } => {
            for expr in [expression, container].into_iter().flatten() {
                visitor.visit_expr(expr);
            }
        }
        Expr::Call {
            call_parameters,
            proc_parameters,
        } => {
            walk_call_parameters(visitor, call_parameters);
            walk_call_parameters(visitor, proc_parameters);
        }
        Expr::Assign { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        Expr::New { target, parameters } => {
            match target {
                NewTarget::Path(path) => visitor.visit_path(path),
                NewTarget::Dereference(dereference) => visitor.visit_dereference(dereference),
                NewTarget::Identifier(_) | NewTarget::Inferred => {}
            }
            walk_call_parameters(visitor, parameters);
        }
        Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Ternary {
            condition,
            if_true,
            if_false,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(if_true);
            visitor.visit_expr(if_false);
        }
        Expr::In { value, list } => {
            visitor.visit_expr(value);
            visitor.visit_expr(list);
        }
        Expr::ListIndex { expression, index } => {
            visitor.visit_expr(expression);
            visitor.visit_expr(index);
        }
        Expr::ProcCall {
            callable,
            parameters,
        } => {
            visitor.visit_callable(callable);
            walk_call_parameters(visitor, parameters);
        }
        Expr::Dereference(dereference) => visitor.visit_dereference(dereference),
        Expr::Callable(callable) => visitor.visit_callable(callable),
    });
}

pub fn walk_callable<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, callable: &'ast Callable) {
    match callable {
        Callable::Dereference(dereference) => visitor.visit_dereference(dereference),
        Callable::ProcIdentifier(_) | Callable::Super | Callable::SelfProc => {}
    }
}

#[cfg(test)]
mod tests;
