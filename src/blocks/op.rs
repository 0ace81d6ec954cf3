use serde::{Deserialize, Serialize};

use super::value::Value;

/// Operator kinds the target runtime evaluates inside reporter blocks. The
/// target has no `!=`, `<=` or `>=`; the expression compiler combines
/// `Not` with `Eq`/`Gt`/`Lt` for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Lt,
    Gt,
    And,
    Or,
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OperatorKind::Add => "+",
            OperatorKind::Sub => "-",
            OperatorKind::Mul => "*",
            OperatorKind::Div => "/",
            OperatorKind::Mod => "%",
            OperatorKind::Eq => "==",
            OperatorKind::Lt => "<",
            OperatorKind::Gt => ">",
            OperatorKind::And => "&&",
            OperatorKind::Or => "||",
        };
        write!(f, "{}", s)
    }
}

/// A single operand slot of a primitive operation: either a literal value
/// or a nested reporter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Literal(Value),
    Reporter(Box<Reporter>),
}

impl Operand {
    pub fn literal(value: Value) -> Operand {
        Operand::Literal(value)
    }

    pub fn reporter(reporter: Reporter) -> Operand {
        Operand::Reporter(Box::new(reporter))
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{}", v),
            Operand::Reporter(r) => write!(f, "{}", r),
        }
    }
}

/// Value-producing blocks. List reads are 1-based, matching the target
/// runtime; `LengthOfList` is re-read by the runtime on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reporter {
    Variable { slot: String },
    ItemOfList { list: String, index: Operand },
    LengthOfList { list: String },
    Operator {
        op: OperatorKind,
        lhs: Operand,
        rhs: Operand,
    },
    Not { operand: Operand },
}

impl std::fmt::Display for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reporter::Variable { slot } => write!(f, "({})", slot),
            Reporter::ItemOfList { list, index } => write!(f, "(item {} of {})", index, list),
            Reporter::LengthOfList { list } => write!(f, "(length of {})", list),
            Reporter::Operator { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Reporter::Not { operand } => write!(f, "(not {})", operand),
        }
    }
}

/// Statement blocks. `Repeat`, `IfThen` and `IfThenElse` carry nested
/// operation sequences; everything else is a flat storage write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockOp {
    SetVariable { slot: String, value: Operand },
    ChangeVariable { slot: String, delta: Operand },
    ClearList { list: String },
    AppendToList { list: String, value: Operand },
    ReplaceInList {
        list: String,
        index: Operand,
        value: Operand,
    },
    /// The target's only looping construct: execute `body` exactly `count`
    /// times. The count operand is evaluated once at loop entry; fractional
    /// counts truncate and non-positive counts run zero iterations.
    Repeat { count: Operand, body: Vec<BlockOp> },
    IfThen {
        condition: Operand,
        body: Vec<BlockOp>,
    },
    IfThenElse {
        condition: Operand,
        then_body: Vec<BlockOp>,
        else_body: Vec<BlockOp>,
    },
}

impl BlockOp {
    fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            BlockOp::SetVariable { slot, value } => {
                writeln!(f, "{}set {} <- {}", pad, slot, value)
            }
            BlockOp::ChangeVariable { slot, delta } => {
                writeln!(f, "{}change {} by {}", pad, slot, delta)
            }
            BlockOp::ClearList { list } => writeln!(f, "{}clear {}", pad, list),
            BlockOp::AppendToList { list, value } => {
                writeln!(f, "{}append {} to {}", pad, value, list)
            }
            BlockOp::ReplaceInList { list, index, value } => {
                writeln!(f, "{}replace item {} of {} with {}", pad, index, list, value)
            }
            BlockOp::Repeat { count, body } => {
                writeln!(f, "{}repeat {} times", pad, count)?;
                for op in body {
                    op.fmt_indented(f, indent + 1)?;
                }
                Ok(())
            }
            BlockOp::IfThen { condition, body } => {
                writeln!(f, "{}if {}", pad, condition)?;
                for op in body {
                    op.fmt_indented(f, indent + 1)?;
                }
                Ok(())
            }
            BlockOp::IfThenElse {
                condition,
                then_body,
                else_body,
            } => {
                writeln!(f, "{}if {}", pad, condition)?;
                for op in then_body {
                    op.fmt_indented(f, indent + 1)?;
                }
                writeln!(f, "{}else", pad)?;
                for op in else_body {
                    op.fmt_indented(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for BlockOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Render an operation sequence as an indented listing, mainly for test
/// failure messages and dump output.
pub fn render_ops(ops: &[BlockOp]) -> String {
    let mut out = String::new();
    for op in ops {
        out.push_str(&op.to_string());
    }
    out
}
