//! file: src/program.rs
//! description: program-level declaration tables for global lists.
//!
//! Global lists live outside the lexical scope chain: a name is resolved
//! first against the current target's lists, then the program-global table.
//! Both tables are read-only during statement lowering; registration
//! happens in a declaration pre-pass.

use serde::{Deserialize, Serialize};

use crate::ast::ElementType;
use crate::blocks::value::Value;

/// A global list created at program-load time. Immutable after declaration
/// apart from its literal initial values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalList {
    pub name: String,
    pub ty: ElementType,
    /// When true, index-style semantics are enforced over free-form list
    /// semantics.
    pub array_semantics: bool,
    pub values: Vec<Value>,
}

impl GlobalList {
    pub fn new(name: impl Into<String>, ty: ElementType, array_semantics: bool) -> Self {
        GlobalList {
            name: name.into(),
            ty,
            array_semantics,
            values: Vec::new(),
        }
    }
}

/// One compilation target (a sprite in the visual runtime) and the lists
/// declared local to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub lists: Vec<GlobalList>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            lists: Vec::new(),
        }
    }

    pub fn find_list(&self, name: &str) -> Option<&GlobalList> {
        self.lists.iter().find(|l| l.name == name)
    }
}

/// The enclosing program: the table of lists visible to every target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    pub lists: Vec<GlobalList>,
}

impl Program {
    pub fn new() -> Self {
        Program { lists: Vec::new() }
    }

    pub fn find_list(&self, name: &str) -> Option<&GlobalList> {
        self.lists.iter().find(|l| l.name == name)
    }
}
