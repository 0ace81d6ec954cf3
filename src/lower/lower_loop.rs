//! file: src/lower/lower_loop.rs
//! description: lowering of `for` and `foreach` onto the bounded-repeat
//! primitive.
//!
//! The target runtime's only loop executes a body a fixed number of times,
//! so both loop forms reduce to: machinery entries in a child scope, an
//! iteration-count operand computed once at loop entry, one repeat block,
//! then the child scope's cleanup.

use crate::ast::stmt::{Stmt, StmtKind};
use crate::ast::ElementType;
use crate::blocks::op::{BlockOp, Operand, OperatorKind, Reporter};
use crate::blocks::value::Value;
use crate::diagnostics::Diagnostic;

use super::lower_expr::{combine, is_simple, lower_expr};
use super::lower_stmt::lower_body;
use super::lowering_context::LowerContext;
use super::stack_entry::StackEntry;

pub fn lower_for(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::For {
        counter,
        ty,
        start,
        end,
        step,
        body,
    } = &stmt.kind
    else {
        return Vec::new();
    };

    // Bounds and step are compiled once, in the outer context, so their
    // values are frozen at loop entry even when they reference mutable
    // state.
    let start_op = lower_expr(ctx, start);
    let end_op = lower_expr(ctx, end);
    let step_op = match step {
        Some(e) => lower_expr(ctx, e),
        None => Operand::Literal(Value::Number(1.0)),
    };

    let mut inner = ctx.child();
    let serial = inner.alloc_serial();
    let entry = StackEntry::scalar(counter, *ty, false, serial);
    if inner.register(entry.clone()).is_err() {
        // A fresh child scope has no entries, so this cannot happen; bail
        // without ops rather than panic if it somehow does.
        return Vec::new();
    }

    // Body first, then exactly one counter advance per iteration.
    let mut repeat_body = lower_body(&mut inner, body);
    repeat_body.push(entry.increment(step_op.clone()));

    // Iteration count: (end - start) / step. When the start expression is
    // not a simple value it cannot be safely re-evaluated after the counter
    // was initialized from it, so the counter's live value stands in as the
    // subtrahend base.
    let base = if is_simple(&start_op) {
        start_op.clone()
    } else {
        entry.lookup()
    };
    let distance = combine(OperatorKind::Sub, end_op, base);
    let count = match &step_op {
        Operand::Literal(Value::Number(n)) if *n == 1.0 => distance,
        _ => combine(OperatorKind::Div, distance, step_op),
    };

    let mut ops = entry.allocate(start_op);
    ops.push(BlockOp::Repeat {
        count,
        body: repeat_body,
    });
    ops.extend(inner.cleanup());
    ops
}

/// What a `foreach` source name resolved to.
enum IterSource {
    /// A global list; its length is re-read by the runtime each loop.
    List(String),
    /// An in-scope array; its length is known at lowering time.
    Array(StackEntry),
}

pub fn lower_foreach(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::Foreach {
        item,
        ty,
        source,
        body,
    } = &stmt.kind
    else {
        return Vec::new();
    };

    // Resolution happens before any machinery entry exists, so a failed
    // foreach leaks nothing into the enclosing scope. Order: target-local
    // list, program-global list, then in-scope array.
    let iter_source = if let Some(list) = ctx.resolve_list(source) {
        IterSource::List(list.name.clone())
    } else {
        match ctx.lookup(source) {
            Some(entry) if entry.is_array() => IterSource::Array(entry),
            Some(_) => {
                ctx.report(Diagnostic::not_defined(
                    format!("`{}` is not a list or array", source),
                    "brickwork.lower.loops.lower_foreach",
                    ctx.locate(stmt.location.as_ref()),
                    stmt.span.clone(),
                ));
                return Vec::new();
            }
            None => {
                ctx.report(Diagnostic::not_defined(
                    format!("`{}` is not defined", source),
                    "brickwork.lower.loops.lower_foreach",
                    ctx.locate(stmt.location.as_ref()),
                    stmt.span.clone(),
                ));
                return Vec::new();
            }
        }
    };

    let mut inner = ctx.child();

    // Machinery: an internal 1-based index counter, and the item variable
    // under its user-facing name, default-valued until the first read.
    let index = inner.anonymous_entry("idx", ElementType::Number);
    let serial = inner.alloc_serial();
    let item_entry = StackEntry::scalar(item, *ty, false, serial);
    if inner.register(item_entry.clone()).is_err() {
        return Vec::new();
    }

    let read = match &iter_source {
        IterSource::List(name) => Operand::reporter(Reporter::ItemOfList {
            list: name.clone(),
            index: index.lookup(),
        }),
        IterSource::Array(entry) => entry.array_lookup(index.lookup()),
    };

    let mut repeat_body = vec![
        item_entry.assign(read),
        index.increment(Operand::Literal(Value::Number(1.0))),
    ];
    repeat_body.extend(lower_body(&mut inner, body));

    let count = match &iter_source {
        IterSource::List(name) => Operand::reporter(Reporter::LengthOfList {
            list: name.clone(),
        }),
        IterSource::Array(entry) => {
            Operand::Literal(Value::Number(entry.length().unwrap_or(0) as f64))
        }
    };

    let mut ops = index.allocate(Operand::Literal(Value::Number(1.0)));
    ops.extend(item_entry.allocate(Operand::Literal(Value::zero(*ty))));
    ops.push(BlockOp::Repeat {
        count,
        body: repeat_body,
    });
    ops.extend(inner.cleanup());
    ops
}
