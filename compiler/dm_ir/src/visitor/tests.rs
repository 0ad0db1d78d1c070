use super::*;
use crate::ast::{AssignOp, BinaryOp, DereferenceStep, UnaryOp};
use crate::DMValueType;
use pretty_assertions::assert_eq;

/// Records identifiers and paths in visit order.
#[derive(Default)]
struct Collector {
    identifiers: Vec<String>,
    paths: Vec<String>,
    procs: Vec<String>,
}

impl<'ast> Visitor<'ast> for Collector {
    fn visit_proc_definition(&mut self, definition: &'ast ProcDefinition) {
        self.procs.push(definition.name.clone());
        walk_proc_definition(self, definition);
    }

    fn visit_path(&mut self, path: &'ast DreamPath) {
        self.paths.push(path.to_string());
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let Expr::Identifier(name) = expr {
            self.identifiers.push(name.clone());
        }
        walk_expr(self, expr);
    }
}

/// Counts statements without descending into expressions.
#[derive(Default)]
struct StatementCounter {
    count: usize,
}

impl<'ast> Visitor<'ast> for StatementCounter {
    fn visit_proc_statement(&mut self, statement: &'ast ProcStatement) {
        self.count += 1;
        walk_proc_statement(self, statement);
    }

    fn visit_expr(&mut self, _expr: &'ast Expr) {}
}

fn ident(name: &str) -> Expr {
    Expr::identifier(name)
}

fn sample_file() -> File {
    // /mob
    //     var/health = 10
    //     proc/hurt(amount)
    //         health -= amount
    //         if (health <= 0)
    //             del src
    //         for (var/obj/O in contents)
    //             O.owner = new /obj/token(src)
    let body = ProcBlockInner::new(vec![
        ProcStatement::Expression(Expr::assign(
            AssignOp::Remove,
            ident("health"),
            ident("amount"),
        )),
        ProcStatement::If {
            condition: Expr::binary(BinaryOp::LessThanOrEqual, ident("health"), Expr::Integer(0)),
            body: ProcBlockInner::new(vec![ProcStatement::Del(ident("src"))]),
            else_body: None,
        },
        ProcStatement::ForList {
            initializer: Some(Box::new(ProcStatement::VarDeclaration(
                ProcVarDeclaration::new(&DreamPath::new("var/obj/O"), None),
            ))),
            variable: "O".into(),
            list: ident("contents"),
            body: ProcBlockInner::new(vec![ProcStatement::Expression(Expr::assign(
                AssignOp::Assign,
                Expr::Dereference(Dereference::new(
                    ident("O"),
                    vec![DereferenceStep::direct("owner")],
                )),
                Expr::New {
                    target: NewTarget::Path(DreamPath::new("/obj/token")),
                    parameters: vec![CallParameter::positional(ident("src"))],
                },
            ))]),
        },
    ]);

    let mob_block = BlockInner::new(vec![
        Statement::ObjectVarDefinition(ObjectVarDefinition::new(
            &DreamPath::new("var/health"),
            Expr::Integer(10),
        )),
        Statement::ProcDefinition(ProcDefinition::new(
            &DreamPath::new("proc/hurt"),
            vec![DefinitionParameter::new(
                &DreamPath::new("amount"),
                None,
                DMValueType::NUM,
                None,
            )],
            body,
        )),
    ]);

    File {
        block: BlockInner::new(vec![Statement::ObjectDefinition(ObjectDefinition {
            path: DreamPath::new("/mob"),
            block: Some(mob_block),
        })]),
    }
}

#[test]
fn test_walk_visits_in_source_order() {
    let file = sample_file();
    let mut collector = Collector::default();
    file.accept(&mut collector);

    assert_eq!(collector.procs, vec!["hurt"]);
    assert_eq!(collector.paths, vec!["/mob", "/obj/token"]);
    assert_eq!(
        collector.identifiers,
        vec!["health", "amount", "health", "src", "contents", "O", "src"]
    );
}

#[test]
fn test_override_stops_descent() {
    let file = sample_file();
    let mut counter = StatementCounter::default();
    counter.visit_file(&file);

    // Expression, If, Del, ForList, its initializer, and the loop body statement.
    assert_eq!(counter.count, 6);
}

#[test]
fn test_accept_dispatches_by_node_type() {
    let expr = Expr::Ternary {
        condition: Box::new(ident("a")),
        if_true: Box::new(Expr::unary(UnaryOp::Negate, ident("b"))),
        if_false: Box::new(Expr::ProcCall {
            callable: Callable::Dereference(Dereference::new(
                ident("c"),
                vec![DereferenceStep::search("attack")],
            )),
            parameters: vec![CallParameter::named("target", ident("d"))],
        }),
    };

    let mut collector = Collector::default();
    expr.accept(&mut collector);
    assert_eq!(collector.identifiers, vec!["a", "b", "c", "d"]);

    let mut path_only = Collector::default();
    DreamPath::new("/turf").accept(&mut path_only);
    assert_eq!(path_only.paths, vec!["/turf"]);
    assert!(path_only.identifiers.is_empty());
}

#[test]
fn test_switch_and_spawn_children() {
    let statement = ProcStatement::Switch {
        value: ident("x"),
        cases: vec![
            SwitchCase::Values {
                values: vec![Expr::Integer(1), Expr::Integer(2)],
                body: ProcBlockInner::new(vec![ProcStatement::Spawn {
                    time: Some(ident("delay")),
                    body: ProcBlockInner::new(vec![ProcStatement::Return(Some(ident("y")))]),
                }]),
            },
            SwitchCase::Default(ProcBlockInner::new(vec![ProcStatement::Goto("done".into())])),
        ],
    };

    let mut collector = Collector::default();
    statement.accept(&mut collector);
    assert_eq!(collector.identifiers, vec!["x", "delay", "y"]);
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let mut expr = Expr::Integer(1);
    for _ in 0..50_000 {
        expr = Expr::unary(UnaryOp::Not, expr);
    }

    let mut collector = Collector::default();
    expr.accept(&mut collector);
    assert!(collector.identifiers.is_empty());

    // Drop iteratively; the default recursive drop of a 50k-deep box chain
    // would itself overflow the test thread's stack.
    while let Expr::Unary { operand, .. } = expr {
        expr = *operand;
    }
}
