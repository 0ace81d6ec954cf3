use brickwork_core::ast::{ElementType, Expr, ListDecl, Stmt, StmtKind};
use brickwork_core::blocks::{render_ops, BlockOp, Operand, Value};
use brickwork_core::diagnostics::{DiagnosticSink, ErrorKind};
use brickwork_core::lower::{declare_list, lower_body, lower_stmt, CompileSession, ListOwner, LowerContext};
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
fn scalar_declaration_allocates_unique_slot() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    let ops = lower_stmt(&mut ctx, &decl_num("x", 5.0));

    assert_eq!(
        ops,
        vec![BlockOp::SetVariable {
            slot: "x@0".to_string(),
            value: Operand::Literal(Value::Number(5.0)),
        }]
    );
    assert!(session.diagnostics.is_empty());
}

#[test]
fn duplicate_declaration_reports_once_and_emits_nothing() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    let stmts = vec![decl_num("x", 1.0), decl_num("x", 2.0), decl_num("y", 3.0)];
    let ops = lower_body(&mut ctx, &stmts);

    // The colliding declaration contributes no operations; siblings still
    // lower normally.
    assert_eq!(ops.len(), 2, "ops:\n{}", render_ops(&ops));
    assert_eq!(
        ops[0],
        BlockOp::SetVariable {
            slot: "x@0".to_string(),
            value: Operand::Literal(Value::Number(1.0)),
        }
    );
    assert_eq!(
        ops[1],
        BlockOp::SetVariable {
            slot: "y@1".to_string(),
            value: Operand::Literal(Value::Number(3.0)),
        }
    );
    assert_eq!(session.diagnostics.len(), 1);
    assert_eq!(
        session.diagnostics.count_of(ErrorKind::DuplicateDeclaration),
        1
    );
}

#[test]
fn array_declaration_pads_short_initializers_with_zero_values() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    let stmt = Stmt::new(StmtKind::DeclareArray {
        name: "xs".to_string(),
        ty: ElementType::Number,
        unchecked: false,
        length: 3,
        init: vec![Expr::number(7.0)],
    });
    let ops = lower_stmt(&mut ctx, &stmt);

    assert_eq!(
        ops,
        vec![
            BlockOp::ClearList {
                list: "xs@0".to_string(),
            },
            BlockOp::AppendToList {
                list: "xs@0".to_string(),
                value: Operand::Literal(Value::Number(7.0)),
            },
            BlockOp::AppendToList {
                list: "xs@0".to_string(),
                value: Operand::Literal(Value::Number(0.0)),
            },
            BlockOp::AppendToList {
                list: "xs@0".to_string(),
                value: Operand::Literal(Value::Number(0.0)),
            },
        ]
    );
    assert!(session.diagnostics.is_empty());
}

#[test]
fn allocation_ops_recover_declaration_attributes() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    let stmt = Stmt::new(StmtKind::DeclareArray {
        name: "grid".to_string(),
        ty: ElementType::Text,
        unchecked: false,
        length: 4,
        init: vec![Expr::text("a"), Expr::text("b")],
    });
    let ops = lower_stmt(&mut ctx, &stmt);

    // The emitted allocation carries everything needed to re-derive the
    // declaration: source name from the slot prefix, length from the
    // append count, element type from the padding zero value.
    let slot = match &ops[0] {
        BlockOp::ClearList { list } => list.clone(),
        other => panic!("expected ClearList first, got {}", other),
    };
    assert_eq!(slot.split('@').next(), Some("grid"));
    let appends: Vec<_> = ops[1..]
        .iter()
        .map(|op| match op {
            BlockOp::AppendToList { value, .. } => value.clone(),
            other => panic!("expected AppendToList, got {}", other),
        })
        .collect();
    assert_eq!(appends.len(), 4);
    assert_eq!(appends[3], Operand::Literal(Value::Text(String::new())));
}

#[test]
fn excess_array_initializers_are_truncated() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    let stmt = Stmt::new(StmtKind::DeclareArray {
        name: "xs".to_string(),
        ty: ElementType::Number,
        unchecked: false,
        length: 1,
        init: vec![Expr::number(1.0), Expr::number(2.0)],
    });
    let ops = lower_stmt(&mut ctx, &stmt);

    assert_eq!(ops.len(), 2, "ops:\n{}", render_ops(&ops));
    assert_eq!(
        ops[1],
        BlockOp::AppendToList {
            list: "xs@0".to_string(),
            value: Operand::Literal(Value::Number(1.0)),
        }
    );
}

#[test]
fn initializer_cannot_reference_its_own_declaration() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    let stmt = Stmt::new(StmtKind::DeclareVariable {
        name: "x".to_string(),
        ty: ElementType::Number,
        unchecked: false,
        init: Expr::ident("x"),
    });
    let ops = lower_stmt(&mut ctx, &stmt);

    // The initializer is compiled before the entry is registered, so the
    // self-reference is not defined and recovers to a zero literal.
    assert_eq!(session.diagnostics.count_of(ErrorKind::NotDefined), 1);
    assert_eq!(
        ops,
        vec![BlockOp::SetVariable {
            slot: "x@0".to_string(),
            value: Operand::Literal(Value::Number(0.0)),
        }]
    );
}

#[test]
fn global_list_names_are_unique_across_both_tables() {
    let mut program = Program::new();
    let mut target = Target::new("sprite");
    let mut sink = DiagnosticSink::new();

    let decl = ListDecl::new("scores", ElementType::Number, false)
        .with_values(vec![Value::Number(1.0), Value::Number(2.0)]);
    declare_list(&decl, ListOwner::Target, &mut program, &mut target, &mut sink);
    assert!(target.find_list("scores").is_some());
    assert!(sink.is_empty());

    // Redeclaring into the other table still collides: lists are visible
    // everywhere, not lexically.
    declare_list(&decl, ListOwner::Program, &mut program, &mut target, &mut sink);
    assert_eq!(sink.count_of(ErrorKind::DuplicateDeclaration), 1);
    assert!(program.find_list("scores").is_none());
}
