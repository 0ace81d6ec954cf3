use serde::{Deserialize, Serialize};

use crate::ast::ElementType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Value {
    /// The quiescent value a storage slot of the given type is reset to on
    /// allocation padding and release.
    pub fn zero(ty: ElementType) -> Value {
        match ty {
            ElementType::Number => Value::Number(0.0),
            ElementType::Text => Value::Text(String::new()),
            ElementType::Flag => Value::Flag(false),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Flag(b) => write!(f, "{}", b),
        }
    }
}
