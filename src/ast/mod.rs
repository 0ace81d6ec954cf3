//! file: src/ast/mod.rs
//! description: input tree consumed by the lowering engine.
//!
//! The front-end parser is an external collaborator; these types are the
//! boundary it produces. Every node carries an optional `Location` and
//! `Span` so diagnostics can attribute file and token position.

pub mod expr;
pub mod stmt;

pub use expr::{BinaryOperator, Expr, ExprKind, UnaryOperator};
pub use stmt::{ListDecl, Stmt, StmtKind, SwitchCase};

use serde::{Deserialize, Serialize};

/// Element type of a declared variable, array or list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Number,
    Text,
    Flag,
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementType::Number => write!(f, "number"),
            ElementType::Text => write!(f, "text"),
            ElementType::Flag => write!(f, "flag"),
        }
    }
}
