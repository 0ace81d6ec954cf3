//! file: src/lower/lower_stmt.rs
//! description: statement dispatch and the block-structured constructs.
//!
//! One exhaustive match over the closed statement kind, so every new node
//! kind is handled at every call site at compile time. Branch bodies lower
//! in their own child scopes with cleanup appended inside the branch: the
//! target model has no frame teardown, so every exit path must run the
//! releases itself.

use crate::ast::stmt::{Stmt, StmtKind, SwitchCase};
use crate::ast::ElementType;
use crate::blocks::op::{BlockOp, OperatorKind};
use crate::diagnostics::Diagnostic;

use super::lower_decl;
use super::lower_expr::{combine, lower_expr, one_based};
use super::lower_loop;
use super::lowering_context::LowerContext;

/// Lower a sequence of statements in the given context, concatenating each
/// statement's operation sequence in order.
pub fn lower_body(ctx: &mut LowerContext, stmts: &[Stmt]) -> Vec<BlockOp> {
    let mut ops = Vec::new();
    for stmt in stmts {
        ops.extend(lower_stmt(ctx, stmt));
    }
    ops
}

pub fn lower_stmt(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    match &stmt.kind {
        StmtKind::DeclareVariable { .. } => lower_decl::lower_variable(ctx, stmt),
        StmtKind::DeclareArray { .. } => lower_decl::lower_array(ctx, stmt),
        StmtKind::Assign { .. } => lower_assign(ctx, stmt),
        StmtKind::AssignIndex { .. } => lower_assign_index(ctx, stmt),
        StmtKind::If { .. } => lower_if(ctx, stmt),
        StmtKind::IfElse { .. } => lower_if_else(ctx, stmt),
        StmtKind::Switch { .. } => lower_switch(ctx, stmt),
        StmtKind::For { .. } => lower_loop::lower_for(ctx, stmt),
        StmtKind::Foreach { .. } => lower_loop::lower_foreach(ctx, stmt),
    }
}

fn lower_assign(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::Assign { target, value } = &stmt.kind else {
        return Vec::new();
    };

    let value_op = lower_expr(ctx, value);
    match ctx.lookup(target) {
        Some(entry) if !entry.is_array() => vec![entry.assign(value_op)],
        Some(_) => {
            ctx.report(Diagnostic::not_defined(
                format!("`{}` is an array; assign through an index", target),
                "brickwork.lower.stmt.lower_assign",
                ctx.locate(stmt.location.as_ref()),
                stmt.span.clone(),
            ));
            Vec::new()
        }
        None => {
            ctx.report(Diagnostic::not_defined(
                format!("`{}` is not defined", target),
                "brickwork.lower.stmt.lower_assign",
                ctx.locate(stmt.location.as_ref()),
                stmt.span.clone(),
            ));
            Vec::new()
        }
    }
}

fn lower_assign_index(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::AssignIndex {
        target,
        index,
        value,
    } = &stmt.kind
    else {
        return Vec::new();
    };

    let index_op = one_based(lower_expr(ctx, index));
    let value_op = lower_expr(ctx, value);
    match ctx.lookup(target) {
        Some(entry) if entry.is_array() => vec![entry.array_assign(index_op, value_op)],
        Some(_) => {
            ctx.report(Diagnostic::not_defined(
                format!("`{}` is not an array and cannot be indexed", target),
                "brickwork.lower.stmt.lower_assign_index",
                ctx.locate(stmt.location.as_ref()),
                stmt.span.clone(),
            ));
            Vec::new()
        }
        None => {
            ctx.report(Diagnostic::not_defined(
                format!("`{}` is not defined", target),
                "brickwork.lower.stmt.lower_assign_index",
                ctx.locate(stmt.location.as_ref()),
                stmt.span.clone(),
            ));
            Vec::new()
        }
    }
}

fn lower_if(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::If { condition, body } = &stmt.kind else {
        return Vec::new();
    };

    let condition = lower_expr(ctx, condition);
    let mut inner = ctx.child();
    let mut body_ops = lower_body(&mut inner, body);
    body_ops.extend(inner.cleanup());
    vec![BlockOp::IfThen {
        condition,
        body: body_ops,
    }]
}

fn lower_if_else(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::IfElse {
        condition,
        then_body,
        else_body,
    } = &stmt.kind
    else {
        return Vec::new();
    };

    let condition = lower_expr(ctx, condition);

    let mut then_ctx = ctx.child();
    let mut then_ops = lower_body(&mut then_ctx, then_body);
    then_ops.extend(then_ctx.cleanup());
    drop(then_ctx);

    let mut else_ctx = ctx.child();
    let mut else_ops = lower_body(&mut else_ctx, else_body);
    else_ops.extend(else_ctx.cleanup());

    vec![BlockOp::IfThenElse {
        condition,
        then_body: then_ops,
        else_body: else_ops,
    }]
}

fn lower_switch(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::Switch {
        scrutinee,
        cases,
        default_body,
    } = &stmt.kind
    else {
        return Vec::new();
    };

    let scrutinee_op = lower_expr(ctx, scrutinee);

    // The scrutinee is evaluated once into an anonymous temp owned by a
    // scope wrapping the whole chain.
    let mut outer = ctx.child();
    let temp = outer.anonymous_entry("case", ElementType::Number);
    let mut ops = temp.allocate(scrutinee_op);

    let mut chain: Vec<BlockOp> = match default_body {
        Some(body) => {
            let mut default_ctx = outer.child();
            let mut default_ops = lower_body(&mut default_ctx, body);
            default_ops.extend(default_ctx.cleanup());
            default_ops
        }
        None => Vec::new(),
    };

    for SwitchCase { value, body } in cases.iter().rev() {
        let case_value = lower_expr(&mut outer, value);
        let condition = combine(OperatorKind::Eq, temp.lookup(), case_value);

        let mut case_ctx = outer.child();
        let mut case_ops = lower_body(&mut case_ctx, body);
        case_ops.extend(case_ctx.cleanup());
        drop(case_ctx);

        chain = if chain.is_empty() {
            vec![BlockOp::IfThen {
                condition,
                body: case_ops,
            }]
        } else {
            vec![BlockOp::IfThenElse {
                condition,
                then_body: case_ops,
                else_body: chain,
            }]
        };
    }

    ops.extend(chain);
    ops.extend(outer.cleanup());
    ops
}
