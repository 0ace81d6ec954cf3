//! file: src/lower/mod.rs
//! description: the declaration, scoping and control-flow lowering engine.
//!
//! Translates the source tree into sequences of the target runtime's
//! primitive operations, simulating block-scoped locals on top of a storage
//! model that only offers uniquely named globals. Lowering is
//! single-threaded, synchronous, recursive descent: each construct lowers
//! its children inside a possibly-new child scope, then appends its own
//! setup and teardown.

pub mod lower_decl;
pub mod lower_expr;
pub mod lower_loop;
pub mod lower_stmt;
pub mod lowering_context;
pub mod scope;
pub mod stack_entry;

pub use lower_decl::{declare_list, ListOwner};
pub use lower_expr::{combine, lower_expr};
pub use lower_stmt::{lower_body, lower_stmt};
pub use lowering_context::{CompileSession, LowerContext};
pub use scope::{ScopeArena, ScopeId};
pub use stack_entry::StackEntry;

use log::debug;

use crate::ast::stmt::Stmt;
use crate::blocks::op::BlockOp;
use crate::diagnostics::DiagnosticSink;
use crate::program::{Program, Target};

/// Lower one top-level routine body against a fresh root scope, appending
/// the root scope's cleanup after the body. Diagnostics accumulate in the
/// session's sink; the returned operations are only meaningful when the
/// sink stayed clean.
pub fn lower_routine(
    session: &mut CompileSession,
    program: &Program,
    target: &Target,
    file: &str,
    body: &[Stmt],
) -> Vec<BlockOp> {
    debug!(
        "lowering routine from {} ({} statements)",
        file,
        body.len()
    );
    let mut ctx = LowerContext::new(session, program, target, file);
    let mut ops = lower_body(&mut ctx, body);
    ops.extend(ctx.cleanup());
    ops
}

/// Lower a routine and gate the output: when any error-level diagnostic
/// accumulated, the operations are discarded and the sink is returned
/// instead, so no partial artifact can be emitted from a failed build.
pub fn compile_routine(
    program: &Program,
    target: &Target,
    file: &str,
    body: &[Stmt],
) -> Result<Vec<BlockOp>, DiagnosticSink> {
    let mut session = CompileSession::new();
    let ops = lower_routine(&mut session, program, target, file, body);
    if session.diagnostics.has_errors() {
        Err(session.diagnostics)
    } else {
        Ok(ops)
    }
}
