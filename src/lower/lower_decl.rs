//! file: src/lower/lower_decl.rs
//! description: lowering of scoped and global declarations.
//!
//! Scoped declarations register a stack entry and emit its allocation
//! sequence. Initializers are compiled *before* registration, so a
//! declaration can never reference its own name; self-reference surfaces
//! as `NotDefined`. A duplicate name in the current scope records one
//! `DuplicateDeclaration` diagnostic, emits nothing, and lets the rest of
//! the enclosing body lower normally.

use crate::ast::stmt::{ListDecl, Stmt, StmtKind};
use crate::blocks::op::BlockOp;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::program::{GlobalList, Program, Target};

use super::lower_expr::lower_expr;
use super::lowering_context::LowerContext;
use super::stack_entry::StackEntry;

pub fn lower_variable(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::DeclareVariable {
        name,
        ty,
        unchecked,
        init,
    } = &stmt.kind
    else {
        return Vec::new();
    };

    if ctx.declared_locally(name) {
        ctx.report(Diagnostic::duplicate_declaration(
            format!("`{}` is already declared in this scope", name),
            "brickwork.lower.decl.lower_variable",
            ctx.locate(stmt.location.as_ref()),
            stmt.span.clone(),
        ));
        return Vec::new();
    }

    // Compiled before the entry is registered: the initializer sees every
    // name visible before this declaration, but not the declaration itself.
    let value = lower_expr(ctx, init);

    let serial = ctx.alloc_serial();
    let entry = StackEntry::scalar(name, *ty, *unchecked, serial);
    if ctx.register(entry.clone()).is_err() {
        return Vec::new();
    }
    entry.allocate(value)
}

pub fn lower_array(ctx: &mut LowerContext, stmt: &Stmt) -> Vec<BlockOp> {
    let StmtKind::DeclareArray {
        name,
        ty,
        unchecked,
        length,
        init,
    } = &stmt.kind
    else {
        return Vec::new();
    };

    if ctx.declared_locally(name) {
        ctx.report(Diagnostic::duplicate_declaration(
            format!("`{}` is already declared in this scope", name),
            "brickwork.lower.decl.lower_array",
            ctx.locate(stmt.location.as_ref()),
            stmt.span.clone(),
        ));
        return Vec::new();
    }

    let values: Vec<_> = init.iter().map(|e| lower_expr(ctx, e)).collect();

    let serial = ctx.alloc_serial();
    let entry = StackEntry::array(name, *ty, *unchecked, *length, serial);
    if ctx.register(entry.clone()).is_err() {
        return Vec::new();
    }
    entry.allocate_array(&values)
}

/// Which table a global list declaration registers into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOwner {
    /// Local to the current target (sprite).
    Target,
    /// Visible to every target in the program.
    Program,
}

/// Register a global list declaration. Uniqueness is checked against both
/// the target-local and program-global tables, since lists are visible
/// everywhere rather than lexically.
pub fn declare_list(
    decl: &ListDecl,
    owner: ListOwner,
    program: &mut Program,
    target: &mut Target,
    diagnostics: &mut DiagnosticSink,
) {
    if target.find_list(&decl.name).is_some() || program.find_list(&decl.name).is_some() {
        diagnostics.push(Diagnostic::duplicate_declaration(
            format!("list `{}` is already declared", decl.name),
            "brickwork.lower.decl.declare_list",
            decl.location.clone(),
            decl.span.clone(),
        ));
        return;
    }

    let mut list = GlobalList::new(decl.name.clone(), decl.ty, decl.array_semantics);
    list.values = decl.values.clone();
    match owner {
        ListOwner::Target => target.lists.push(list),
        ListOwner::Program => program.lists.push(list),
    }
}
