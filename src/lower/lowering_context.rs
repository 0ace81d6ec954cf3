//! file: src/lower/lowering_context.rs
//! description: shared session state and the per-scope lowering context.
//!
//! `CompileSession` owns everything that must be shared across the whole
//! compilation of one routine: the scope arena, the slot allocation serial
//! and the diagnostic sink. Nothing here is process-global, so compilations
//! stay re-entrant and testable in isolation. `LowerContext` is the view a
//! lowering routine works through: one context always corresponds to one
//! scope, and entering a nested block creates a child context rather than
//! mutating the current one.

use log::warn;

use crate::ast::ElementType;
use crate::blocks::op::BlockOp;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::location::Location;
use crate::program::{GlobalList, Program, Target};

use super::scope::{ScopeArena, ScopeId};
use super::stack_entry::StackEntry;

#[derive(Debug, Default)]
pub struct CompileSession {
    pub scopes: ScopeArena,
    next_serial: usize,
    pub diagnostics: DiagnosticSink,
}

impl CompileSession {
    pub fn new() -> Self {
        CompileSession {
            scopes: ScopeArena::new(),
            next_serial: 0,
            diagnostics: DiagnosticSink::new(),
        }
    }

    /// The next value of the compilation-unit allocation counter. Every
    /// generated slot identity consumes one serial, which is what keeps
    /// storage names unique across sibling scopes that reuse source names.
    pub fn alloc_serial(&mut self) -> usize {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }
}

/// The active view during lowering of one scope's statements.
pub struct LowerContext<'a> {
    pub session: &'a mut CompileSession,
    pub program: &'a Program,
    pub target: &'a Target,
    pub scope: ScopeId,
    /// File attributed to diagnostics for constructs that carry no location.
    pub file: &'a str,
}

impl<'a> LowerContext<'a> {
    /// A root context over a fresh scope.
    pub fn new(
        session: &'a mut CompileSession,
        program: &'a Program,
        target: &'a Target,
        file: &'a str,
    ) -> Self {
        let scope = session.scopes.create_root();
        LowerContext {
            session,
            program,
            target,
            scope,
            file,
        }
    }

    /// A child context over a new scope nested under this one. The child
    /// reborrows the session, so it must be dropped before this context is
    /// used again.
    pub fn child(&mut self) -> LowerContext<'_> {
        let scope = self.session.scopes.create_child(self.scope);
        LowerContext {
            session: &mut *self.session,
            program: self.program,
            target: self.target,
            scope,
            file: self.file,
        }
    }

    pub fn alloc_serial(&mut self) -> usize {
        self.session.alloc_serial()
    }

    /// Resolve a name through this scope's parent chain. The entry is
    /// cloned out so the caller can keep it while mutating the session.
    pub fn lookup(&self, name: &str) -> Option<StackEntry> {
        self.session.scopes.search(self.scope, name).cloned()
    }

    pub fn declared_locally(&self, name: &str) -> bool {
        self.session.scopes.declared_locally(self.scope, name)
    }

    pub fn register(&mut self, entry: StackEntry) -> Result<(), StackEntry> {
        self.session.scopes.register(self.scope, entry)
    }

    /// Allocate and register a compiler-internal entry in this scope.
    pub fn anonymous_entry(&mut self, purpose: &str, ty: ElementType) -> StackEntry {
        let serial = self.alloc_serial();
        let entry = StackEntry::internal(purpose, ty, serial);
        // Internal names embed the serial, so registration cannot collide.
        let _ = self.session.scopes.register(self.scope, entry.clone());
        entry
    }

    /// Resolve a global list: the current target's table first, then the
    /// program-global table.
    pub fn resolve_list(&self, name: &str) -> Option<&GlobalList> {
        self.target
            .find_list(name)
            .or_else(|| self.program.find_list(name))
    }

    /// The cleanup sequence for this context's scope.
    pub fn cleanup(&self) -> Vec<BlockOp> {
        self.session.scopes.cleanup(self.scope)
    }

    /// Append a diagnostic to the shared sink. Lowering continues; the
    /// failed construct contributes an empty operation sequence.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.session.diagnostics.push(diagnostic);
    }

    /// The location to attribute to a diagnostic: the construct's own if it
    /// has one, otherwise a file-only location.
    pub fn locate(&self, location: Option<&Location>) -> Option<Location> {
        location
            .cloned()
            .or_else(|| Some(Location::file_only(self.file)))
    }
}
