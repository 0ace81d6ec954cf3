use brickwork_core::ast::{ElementType, Expr, Stmt, StmtKind};
use brickwork_core::blocks::{render_ops, BlockOp, Operand, Value};
use brickwork_core::diagnostics::{Diagnostic, ErrorKind};
use brickwork_core::location::Location;
use brickwork_core::lower::{compile_routine, lower_routine, CompileSession};
use brickwork_core::program::{Program, Target};

fn decl_num(name: &str, value: f64) -> Stmt {
    Stmt::new(StmtKind::DeclareVariable {
        name: name.to_string(),
        ty: ElementType::Number,
        unchecked: false,
        init: Expr::number(value),
    })
}

#[test]
fn one_pass_surfaces_every_independent_error() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();

    let body = vec![
        decl_num("x", 1.0),
        decl_num("x", 2.0),
        Stmt::new(StmtKind::Assign {
            target: "y".to_string(),
            value: Expr::number(3.0),
        }),
        Stmt::new(StmtKind::Foreach {
            item: "v".to_string(),
            ty: ElementType::Number,
            source: "missing".to_string(),
            body: vec![],
        }),
    ];
    lower_routine(&mut session, &program, &target, "main.bw", &body);

    // No short-circuiting: the duplicate and both unresolved references are
    // all reported from the same pass.
    assert_eq!(session.diagnostics.len(), 3);
    assert_eq!(
        session.diagnostics.count_of(ErrorKind::DuplicateDeclaration),
        1
    );
    assert_eq!(session.diagnostics.count_of(ErrorKind::NotDefined), 2);
    assert!(session.diagnostics.has_errors());
    assert_eq!(session.diagnostics.exit_code(), 2);
}

#[test]
fn clean_routines_emit_ops_with_root_cleanup() {
    let program = Program::new();
    let target = Target::new("stage");

    let ops = compile_routine(&program, &target, "main.bw", &[decl_num("x", 1.0)])
        .expect("clean routine must compile");

    assert_eq!(
        ops,
        vec![
            BlockOp::SetVariable {
                slot: "x@0".to_string(),
                value: Operand::Literal(Value::Number(1.0)),
            },
            BlockOp::SetVariable {
                slot: "x@0".to_string(),
                value: Operand::Literal(Value::Number(0.0)),
            },
        ],
        "ops:\n{}",
        render_ops(&ops)
    );
}

#[test]
fn failed_routines_yield_the_sink_instead_of_partial_output() {
    let program = Program::new();
    let target = Target::new("stage");

    let body = vec![Stmt::new(StmtKind::Assign {
        target: "ghost".to_string(),
        value: Expr::number(1.0),
    })];
    let sink = compile_routine(&program, &target, "main.bw", &body)
        .expect_err("unresolved reference must fail the build");

    assert!(sink.has_errors());
    assert_eq!(sink.count_of(ErrorKind::NotDefined), 1);
    assert_eq!(sink.exit_code(), 2);
}

#[test]
fn diagnostics_render_the_pipe_delimited_line() {
    let diag = Diagnostic::not_defined(
        "`y` is not defined".to_string(),
        "brickwork.lower.stmt.lower_assign",
        Some(Location::new("main.bw", 3, 7)),
        None,
    );

    assert_eq!(
        diag.to_string(),
        "BRICKWORK | ERROR | NotDefined | main.bw:3:7 | \
         brickwork.lower.stmt.lower_assign | `y` is not defined"
    );
}

#[test]
fn sink_serializes_to_json_for_tooling() {
    let program = Program::new();
    let target = Target::new("stage");

    let sink = compile_routine(
        &program,
        &target,
        "main.bw",
        &[decl_num("x", 1.0), decl_num("x", 2.0)],
    )
    .expect_err("duplicate must fail the build");

    let json = sink.to_json().expect("sink serializes");
    assert!(json.contains("DuplicateDeclaration"));
    assert!(json.contains("main.bw"));
}
