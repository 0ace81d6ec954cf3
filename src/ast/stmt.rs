//! file: src/ast/stmt.rs
//! description: statement and declaration node definitions.

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::ElementType;
use crate::blocks::value::Value;
use crate::location::{Location, Span};

/// One arm of a `switch` construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub value: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// A scoped scalar declaration with a required initializer.
    DeclareVariable {
        name: String,
        ty: ElementType,
        unchecked: bool,
        init: Expr,
    },
    /// A scoped fixed-length array declaration. Initializers shorter than
    /// `length` pad with the element type's zero value.
    DeclareArray {
        name: String,
        ty: ElementType,
        unchecked: bool,
        length: usize,
        init: Vec<Expr>,
    },
    Assign {
        target: String,
        value: Expr,
    },
    AssignIndex {
        target: String,
        index: Expr,
        value: Expr,
    },
    If {
        condition: Expr,
        body: Vec<Stmt>,
    },
    IfElse {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    Switch {
        scrutinee: Expr,
        cases: Vec<SwitchCase>,
        default_body: Option<Vec<Stmt>>,
    },
    /// `for counter = start .. end step s { body }`. The step defaults to
    /// the literal `+1` when omitted.
    For {
        counter: String,
        ty: ElementType,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
    },
    /// `foreach item in source { body }` where `source` names a global
    /// list or an in-scope array.
    Foreach {
        item: String,
        ty: ElementType,
        source: String,
        body: Vec<Stmt>,
    },
}

impl std::fmt::Display for StmtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StmtKind::DeclareVariable { .. } => write!(f, "DeclareVariable"),
            StmtKind::DeclareArray { .. } => write!(f, "DeclareArray"),
            StmtKind::Assign { .. } => write!(f, "Assign"),
            StmtKind::AssignIndex { .. } => write!(f, "AssignIndex"),
            StmtKind::If { .. } => write!(f, "If"),
            StmtKind::IfElse { .. } => write!(f, "IfElse"),
            StmtKind::Switch { .. } => write!(f, "Switch"),
            StmtKind::For { .. } => write!(f, "For"),
            StmtKind::Foreach { .. } => write!(f, "Foreach"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: Option<Location>,
    pub span: Option<Span>,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt {
            kind,
            location: None,
            span: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// A global list declaration. Lists are visible everywhere, so uniqueness is
/// checked against the whole program's declaration tables rather than the
/// active scope. Initial values are restricted to literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDecl {
    pub name: String,
    pub ty: ElementType,
    /// Whether index-style semantics are enforced over free-form list
    /// semantics.
    pub array_semantics: bool,
    pub values: Vec<Value>,
    pub location: Option<Location>,
    pub span: Option<Span>,
}

impl ListDecl {
    pub fn new(name: impl Into<String>, ty: ElementType, array_semantics: bool) -> Self {
        ListDecl {
            name: name.into(),
            ty,
            array_semantics,
            values: Vec::new(),
            location: None,
            span: None,
        }
    }

    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = values;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}
