//! file: src/blocks/mod.rs
//! description: the target runtime's primitive operation model.
//!
//! The target is a visual, block-based runtime with only global variables
//! and lists for storage and a bounded-repeat block as its sole looping
//! construct. Lowering produces trees of these operations; serializing them
//! into the target project format is an external collaborator's concern.

pub mod op;
pub mod value;

pub use op::{render_ops, BlockOp, Operand, OperatorKind, Reporter};
pub use value::Value;
