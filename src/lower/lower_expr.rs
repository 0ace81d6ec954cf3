//! file: src/lower/lower_expr.rs
//! description: the minimal expression compiler.
//!
//! Enough of an expression compiler to serve declaration initializers,
//! loop bounds and indexed reads: literals, scope-resolved reads and
//! operator combination. The full operator surface and bounds-guard
//! synthesis live with the external expression compiler; entries here only
//! supply raw reads.

use crate::ast::expr::{BinaryOperator, Expr, ExprKind, UnaryOperator};
use crate::blocks::op::{Operand, OperatorKind, Reporter};
use crate::blocks::value::Value;
use crate::diagnostics::Diagnostic;

use super::lowering_context::LowerContext;

/// Combine two compiled operands under a runtime operator. This is the
/// primitive the `for`-loop iteration count is built from. Arithmetic on
/// two number literals folds at compile time, so literal loop bounds yield
/// a literal iteration count.
pub fn combine(op: OperatorKind, lhs: Operand, rhs: Operand) -> Operand {
    if let (Operand::Literal(Value::Number(a)), Operand::Literal(Value::Number(b))) = (&lhs, &rhs)
    {
        let folded = match op {
            OperatorKind::Add => Some(a + b),
            OperatorKind::Sub => Some(a - b),
            OperatorKind::Mul => Some(a * b),
            OperatorKind::Div if *b != 0.0 => Some(a / b),
            OperatorKind::Mod if *b != 0.0 => Some(a % b),
            _ => None,
        };
        if let Some(n) = folded {
            return Operand::Literal(Value::Number(n));
        }
    }
    Operand::reporter(Reporter::Operator { op, lhs, rhs })
}

/// Whether an operand is a simple value: a literal or a plain variable
/// read. Anything else may have been materialized through side effects and
/// must not be re-evaluated.
pub fn is_simple(operand: &Operand) -> bool {
    match operand {
        Operand::Literal(_) => true,
        Operand::Reporter(r) => matches!(**r, Reporter::Variable { .. }),
    }
}

/// Convert a 0-based source index operand into the target's 1-based list
/// index, folding when the index is a number literal.
pub(crate) fn one_based(index: Operand) -> Operand {
    match index {
        Operand::Literal(Value::Number(n)) => Operand::Literal(Value::Number(n + 1.0)),
        other => combine(
            OperatorKind::Add,
            other,
            Operand::Literal(Value::Number(1.0)),
        ),
    }
}

/// Compile an expression into a single operand. Unresolvable references
/// record a `NotDefined` diagnostic and recover with a zero literal so the
/// enclosing construct keeps lowering.
pub fn lower_expr(ctx: &mut LowerContext, expr: &Expr) -> Operand {
    match &expr.kind {
        ExprKind::Number(n) => Operand::Literal(Value::Number(*n)),
        ExprKind::Text(s) => Operand::Literal(Value::Text(s.clone())),
        ExprKind::Flag(b) => Operand::Literal(Value::Flag(*b)),
        ExprKind::Ident(name) => lower_ident(ctx, expr, name),
        ExprKind::Index { target, index } => lower_index(ctx, expr, target, index),
        ExprKind::Unary { op, expr: inner } => {
            let operand = lower_expr(ctx, inner);
            match op {
                UnaryOperator::Plus => operand,
                UnaryOperator::Minus => combine(
                    OperatorKind::Sub,
                    Operand::Literal(Value::Number(0.0)),
                    operand,
                ),
                UnaryOperator::Not => Operand::reporter(Reporter::Not { operand }),
            }
        }
        ExprKind::Binary { lhs, op, rhs } => {
            let lhs = lower_expr(ctx, lhs);
            let rhs = lower_expr(ctx, rhs);
            lower_binary(*op, lhs, rhs)
        }
    }
}

fn lower_ident(ctx: &mut LowerContext, expr: &Expr, name: &str) -> Operand {
    match ctx.lookup(name) {
        Some(entry) if !entry.is_array() => entry.lookup(),
        Some(_) => {
            ctx.report(Diagnostic::not_defined(
                format!("`{}` is an array; index it to read a value", name),
                "brickwork.lower.expr.lower_ident",
                ctx.locate(expr.location.as_ref()),
                expr.span.clone(),
            ));
            Operand::Literal(Value::Number(0.0))
        }
        None => {
            ctx.report(Diagnostic::not_defined(
                format!("`{}` is not defined", name),
                "brickwork.lower.expr.lower_ident",
                ctx.locate(expr.location.as_ref()),
                expr.span.clone(),
            ));
            Operand::Literal(Value::Number(0.0))
        }
    }
}

fn lower_index(ctx: &mut LowerContext, expr: &Expr, target: &str, index: &Expr) -> Operand {
    let index_op = one_based(lower_expr(ctx, index));
    // Lexically scoped arrays shadow global lists of the same name.
    if let Some(entry) = ctx.lookup(target) {
        if entry.is_array() {
            return entry.array_lookup(index_op);
        }
        ctx.report(Diagnostic::not_defined(
            format!("`{}` is not an array and cannot be indexed", target),
            "brickwork.lower.expr.lower_index",
            ctx.locate(expr.location.as_ref()),
            expr.span.clone(),
        ));
        return Operand::Literal(Value::Number(0.0));
    }
    if let Some(list) = ctx.resolve_list(target) {
        return Operand::reporter(Reporter::ItemOfList {
            list: list.name.clone(),
            index: index_op,
        });
    }
    ctx.report(Diagnostic::not_defined(
        format!("`{}` is not defined", target),
        "brickwork.lower.expr.lower_index",
        ctx.locate(expr.location.as_ref()),
        expr.span.clone(),
    ));
    Operand::Literal(Value::Number(0.0))
}

fn lower_binary(op: BinaryOperator, lhs: Operand, rhs: Operand) -> Operand {
    match op {
        BinaryOperator::Add => combine(OperatorKind::Add, lhs, rhs),
        BinaryOperator::Sub => combine(OperatorKind::Sub, lhs, rhs),
        BinaryOperator::Mul => combine(OperatorKind::Mul, lhs, rhs),
        BinaryOperator::Div => combine(OperatorKind::Div, lhs, rhs),
        BinaryOperator::Mod => combine(OperatorKind::Mod, lhs, rhs),
        BinaryOperator::Eq => combine(OperatorKind::Eq, lhs, rhs),
        BinaryOperator::Lt => combine(OperatorKind::Lt, lhs, rhs),
        BinaryOperator::Gt => combine(OperatorKind::Gt, lhs, rhs),
        BinaryOperator::And => combine(OperatorKind::And, lhs, rhs),
        BinaryOperator::Or => combine(OperatorKind::Or, lhs, rhs),
        // The target has no !=, <= or >=; build them from Not.
        BinaryOperator::Ne => Operand::reporter(Reporter::Not {
            operand: combine(OperatorKind::Eq, lhs, rhs),
        }),
        BinaryOperator::Le => Operand::reporter(Reporter::Not {
            operand: combine(OperatorKind::Gt, lhs, rhs),
        }),
        BinaryOperator::Ge => Operand::reporter(Reporter::Not {
            operand: combine(OperatorKind::Lt, lhs, rhs),
        }),
    }
}
