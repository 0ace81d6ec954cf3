//! file: src/ast/expr.rs
//! description: expression node and operator enum definitions.

use serde::{Deserialize, Serialize};

use crate::location::{Location, Span};

/// Represents binary operators in the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Eq,  // ==
    Ne,  // !=
    Lt,  // <
    Le,  // <=
    Gt,  // >
    Ge,  // >=
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Mod, // %
    And, // &&
    Or,  // ||
}

/// Represents unary operators in the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Plus,  // +
    Minus, // -
    Not,   // !
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Number(f64),
    Text(String),
    Flag(bool),
    /// A read of a scalar name resolvable in the active scope.
    Ident(String),
    /// An indexed read of an array or list. Indices are 0-based in source.
    Index { target: String, index: Box<Expr> },
    Unary { op: UnaryOperator, expr: Box<Expr> },
    Binary {
        lhs: Box<Expr>,
        op: BinaryOperator,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Option<Location>,
    pub span: Option<Span>,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
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

    pub fn number(value: f64) -> Self {
        Expr::new(ExprKind::Number(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Expr::new(ExprKind::Text(value.into()))
    }

    pub fn flag(value: bool) -> Self {
        Expr::new(ExprKind::Flag(value))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::new(ExprKind::Ident(name.into()))
    }

    pub fn index(target: impl Into<String>, index: Expr) -> Self {
        Expr::new(ExprKind::Index {
            target: target.into(),
            index: Box::new(index),
        })
    }

    pub fn unary(op: UnaryOperator, expr: Expr) -> Self {
        Expr::new(ExprKind::Unary {
            op,
            expr: Box::new(expr),
        })
    }

    pub fn binary(lhs: Expr, op: BinaryOperator, rhs: Expr) -> Self {
        Expr::new(ExprKind::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }
}
