use brickwork_core::ast::{ElementType, Expr, Stmt, StmtKind};
use brickwork_core::blocks::{render_ops, BlockOp, Operand, Value};
use brickwork_core::lower::{lower_body, CompileSession, LowerContext, ScopeArena, StackEntry};
use brickwork_core::program::{Program, Target};

fn num(n: f64) -> Operand {
    Operand::Literal(Value::Number(n))
}

#[test]
fn inner_scopes_shadow_and_siblings_do_not_see_each_other() {
    let mut arena = ScopeArena::new();
    let root = arena.create_root();
    let inner = arena.create_child(root);
    let sibling = arena.create_child(root);

    let outer_x = StackEntry::scalar("x", ElementType::Number, false, 0);
    let inner_x = StackEntry::scalar("x", ElementType::Number, false, 1);
    arena.register(root, outer_x.clone()).unwrap();
    arena.register(inner, inner_x.clone()).unwrap();

    assert_eq!(arena.search(inner, "x"), Some(&inner_x));
    assert_eq!(arena.search(sibling, "x"), Some(&outer_x));
    assert_eq!(arena.search(root, "x"), Some(&outer_x));
    assert_eq!(arena.search(inner, "y"), None);
}

#[test]
fn registering_a_name_twice_in_one_scope_fails() {
    let mut arena = ScopeArena::new();
    let root = arena.create_root();
    let child = arena.create_child(root);

    arena
        .register(root, StackEntry::scalar("x", ElementType::Number, false, 0))
        .unwrap();
    let rejected = StackEntry::scalar("x", ElementType::Text, false, 1);
    assert_eq!(arena.register(root, rejected.clone()), Err(rejected));
    // Shadowing from a child scope is not a collision.
    assert!(arena
        .register(child, StackEntry::scalar("x", ElementType::Number, false, 2))
        .is_ok());
}

#[test]
fn cleanup_releases_in_registration_order() {
    let mut arena = ScopeArena::new();
    let root = arena.create_root();
    arena
        .register(root, StackEntry::scalar("a", ElementType::Number, false, 0))
        .unwrap();
    arena
        .register(root, StackEntry::array("b", ElementType::Text, false, 4, 1))
        .unwrap();
    arena
        .register(root, StackEntry::scalar("c", ElementType::Flag, false, 2))
        .unwrap();

    assert_eq!(
        arena.cleanup(root),
        vec![
            BlockOp::SetVariable {
                slot: "a@0".to_string(),
                value: num(0.0),
            },
            BlockOp::ClearList {
                list: "b@1".to_string(),
            },
            BlockOp::SetVariable {
                slot: "c@2".to_string(),
                value: Operand::Literal(Value::Flag(false)),
            },
        ]
    );
}

#[test]
fn internal_entries_never_collide_with_user_names() {
    let mut arena = ScopeArena::new();
    let root = arena.create_root();

    let internal = StackEntry::internal("idx", ElementType::Number, 0);
    assert!(internal.name().starts_with('%'));
    arena.register(root, internal).unwrap();
    // A user variable that spells the same purpose word lives in a
    // different namespace.
    assert!(arena
        .register(root, StackEntry::scalar("idx", ElementType::Number, false, 1))
        .is_ok());
}

#[test]
fn assignments_resolve_through_the_innermost_declaration() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    // x declared at the root, shadowed inside the branch, assigned again
    // after the branch closed.
    let stmts = vec![
        Stmt::new(StmtKind::DeclareVariable {
            name: "x".to_string(),
            ty: ElementType::Number,
            unchecked: false,
            init: Expr::number(1.0),
        }),
        Stmt::new(StmtKind::If {
            condition: Expr::flag(true),
            body: vec![Stmt::new(StmtKind::DeclareVariable {
                name: "x".to_string(),
                ty: ElementType::Number,
                unchecked: false,
                init: Expr::number(2.0),
            })],
        }),
        Stmt::new(StmtKind::Assign {
            target: "x".to_string(),
            value: Expr::number(9.0),
        }),
    ];
    let ops = lower_body(&mut ctx, &stmts);

    assert_eq!(
        ops,
        vec![
            BlockOp::SetVariable {
                slot: "x@0".to_string(),
                value: num(1.0),
            },
            BlockOp::IfThen {
                condition: Operand::Literal(Value::Flag(true)),
                body: vec![
                    BlockOp::SetVariable {
                        slot: "x@1".to_string(),
                        value: num(2.0),
                    },
                    BlockOp::SetVariable {
                        slot: "x@1".to_string(),
                        value: num(0.0),
                    },
                ],
            },
            // After the branch scope closed, x resolves to the root slot
            // again.
            BlockOp::SetVariable {
                slot: "x@0".to_string(),
                value: num(9.0),
            },
        ],
        "ops:\n{}",
        render_ops(&ops)
    );
    assert!(session.diagnostics.is_empty());
}

#[test]
fn sibling_scopes_reuse_source_names_on_distinct_slots() {
    let program = Program::new();
    let target = Target::new("stage");
    let mut session = CompileSession::new();
    let mut ctx = LowerContext::new(&mut session, &program, &target, "main.bw");

    let branch = |value: f64| {
        Stmt::new(StmtKind::If {
            condition: Expr::flag(true),
            body: vec![Stmt::new(StmtKind::DeclareVariable {
                name: "t".to_string(),
                ty: ElementType::Number,
                unchecked: false,
                init: Expr::number(value),
            })],
        })
    };
    let ops = lower_body(&mut ctx, &vec![branch(1.0), branch(2.0)]);

    let slots: Vec<_> = ops
        .iter()
        .map(|op| match op {
            BlockOp::IfThen { body, .. } => match &body[0] {
                BlockOp::SetVariable { slot, .. } => slot.clone(),
                other => panic!("expected SetVariable, got {}", other),
            },
            other => panic!("expected IfThen, got {}", other),
        })
        .collect();
    assert_eq!(slots, vec!["t@0".to_string(), "t@1".to_string()]);
    assert!(session.diagnostics.is_empty());
}
