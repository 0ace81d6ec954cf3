//! file: src/lower/scope.rs
//! description: nestable namespaces of simulated stack slots.
//!
//! Scopes form a tree owned by the compile session's arena; parent links
//! are plain indices, never owning references, and are only traversed for
//! name resolution. Entry order within a scope is significant: cleanup
//! emits releases in registration order.

use crate::blocks::op::BlockOp;

use super::stack_entry::StackEntry;

/// Index of a scope in the session-owned arena. Parent links are `ScopeId`s
/// so deeply nested scopes never hold references into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) usize);

#[derive(Debug)]
pub struct ScopeData {
    parent: Option<ScopeId>,
    entries: Vec<StackEntry>,
}

/// Arena of every scope created during one compilation. Scopes are created
/// as roots or children and never reparented; they outlive the statement
/// that created them until its cleanup sequence has been emitted.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<ScopeData>,
}

impl ScopeArena {
    pub fn new() -> Self {
        ScopeArena { scopes: Vec::new() }
    }

    pub fn create_root(&mut self) -> ScopeId {
        self.push(None)
    }

    pub fn create_child(&mut self, parent: ScopeId) -> ScopeId {
        self.push(Some(parent))
    }

    fn push(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeData {
            parent,
            entries: Vec::new(),
        });
        id
    }

    /// Register an entry into the given scope. Fails when an entry with the
    /// same source name already exists in that scope; shadowing a name from
    /// an outer scope is legal and does not error.
    pub fn register(&mut self, scope: ScopeId, entry: StackEntry) -> Result<(), StackEntry> {
        let data = &mut self.scopes[scope.0];
        if data.entries.iter().any(|e| e.name() == entry.name()) {
            return Err(entry);
        }
        data.entries.push(entry);
        Ok(())
    }

    /// Whether the scope itself (not its parent chain) declares `name`.
    pub fn declared_locally(&self, scope: ScopeId, name: &str) -> bool {
        self.scopes[scope.0].entries.iter().any(|e| e.name() == name)
    }

    /// Resolve a name by searching the local entries first, then walking
    /// the parent chain outward. First match wins; `None` means the chain
    /// is exhausted, letting callers distinguish "not defined anywhere"
    /// from "defined but the wrong kind".
    pub fn search(&self, scope: ScopeId, name: &str) -> Option<&StackEntry> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.0];
            if let Some(entry) = data.entries.iter().rev().find(|e| e.name() == name) {
                return Some(entry);
            }
            current = data.parent;
        }
        None
    }

    pub fn entry_count(&self, scope: ScopeId) -> usize {
        self.scopes[scope.0].entries.len()
    }

    /// The concatenated release sequences for every entry registered in the
    /// scope, in registration order. Emitted unconditionally after a scope
    /// body's lowered operations: the target model has no implicit frame
    /// teardown, so every exit path runs through this sequence.
    pub fn cleanup(&self, scope: ScopeId) -> Vec<BlockOp> {
        let mut ops = Vec::new();
        for entry in &self.scopes[scope.0].entries {
            ops.extend(entry.release());
        }
        ops
    }
}
