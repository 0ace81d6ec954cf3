//! file: src/lower/stack_entry.rs
//! description: one simulated local variable or array slot.
//!
//! The target storage model is a flat set of global names, so every entry
//! decouples its source name (used for scope lookup) from its generated
//! slot identity (used for storage). Slot identities are qualified with a
//! monotonically increasing allocation serial owned by the compile session,
//! which is what lets sibling and nested scopes reuse source names while
//! the underlying globals stay unique.

use crate::ast::ElementType;
use crate::blocks::op::{BlockOp, Operand, Reporter};
use crate::blocks::value::Value;

/// Prefix of the compiler-internal namespace. User-visible names never start
/// with this character, so internal machinery entries cannot collide with
/// source declarations.
pub const INTERNAL_PREFIX: char = '%';

#[derive(Debug, Clone, PartialEq)]
pub struct StackEntry {
    name: String,
    slot: String,
    ty: ElementType,
    unchecked: bool,
    length: Option<usize>,
}

impl StackEntry {
    /// A scalar entry for a user-declared variable.
    pub fn scalar(name: &str, ty: ElementType, unchecked: bool, serial: usize) -> Self {
        StackEntry {
            name: name.to_string(),
            slot: format!("{}@{}", name, serial),
            ty,
            unchecked,
            length: None,
        }
    }

    /// An array entry backed by a target list of fixed length.
    pub fn array(
        name: &str,
        ty: ElementType,
        unchecked: bool,
        length: usize,
        serial: usize,
    ) -> Self {
        StackEntry {
            name: name.to_string(),
            slot: format!("{}@{}", name, serial),
            ty,
            unchecked,
            length: Some(length),
        }
    }

    /// A compiler-internal entry with no user-visible name, drawn from the
    /// `%`-prefixed namespace. The serial keeps internal entries with the
    /// same purpose distinct within one scope.
    pub fn internal(purpose: &str, ty: ElementType, serial: usize) -> Self {
        let slot = format!("{}{}@{}", INTERNAL_PREFIX, purpose, serial);
        StackEntry {
            name: slot.clone(),
            slot,
            ty,
            unchecked: true,
            length: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn ty(&self) -> ElementType {
        self.ty
    }

    pub fn is_unchecked(&self) -> bool {
        self.unchecked
    }

    pub fn is_array(&self) -> bool {
        self.length.is_some()
    }

    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// The operation sequence that creates the backing slot and sets its
    /// initial value.
    pub fn allocate(&self, value: Operand) -> Vec<BlockOp> {
        vec![BlockOp::SetVariable {
            slot: self.slot.clone(),
            value,
        }]
    }

    /// The operation sequence that creates the backing list and appends the
    /// initial elements. Initializer lists shorter than the declared length
    /// pad with the element type's zero value; longer lists are truncated.
    pub fn allocate_array(&self, values: &[Operand]) -> Vec<BlockOp> {
        let length = self.length.unwrap_or(values.len());
        let mut ops = vec![BlockOp::ClearList {
            list: self.slot.clone(),
        }];
        for i in 0..length {
            let value = values
                .get(i)
                .cloned()
                .unwrap_or_else(|| Operand::Literal(Value::zero(self.ty)));
            ops.push(BlockOp::AppendToList {
                list: self.slot.clone(),
                value,
            });
        }
        ops
    }

    /// A read-reference reporter for a scalar slot.
    pub fn lookup(&self) -> Operand {
        Operand::reporter(Reporter::Variable {
            slot: self.slot.clone(),
        })
    }

    /// The raw indexed-read reporter for an array slot. The index operand is
    /// 1-based; bounds-check wrapping is the expression compiler's concern,
    /// never emitted here regardless of the `unchecked` flag.
    pub fn array_lookup(&self, index: Operand) -> Operand {
        Operand::reporter(Reporter::ItemOfList {
            list: self.slot.clone(),
            index,
        })
    }

    pub fn assign(&self, value: Operand) -> BlockOp {
        BlockOp::SetVariable {
            slot: self.slot.clone(),
            value,
        }
    }

    /// An indexed write. The index operand is 1-based.
    pub fn array_assign(&self, index: Operand, value: Operand) -> BlockOp {
        BlockOp::ReplaceInList {
            list: self.slot.clone(),
            index,
            value,
        }
    }

    /// A combined read-add-write as the target's single change-variable
    /// primitive. Loop counters advance with this.
    pub fn increment(&self, delta: Operand) -> BlockOp {
        BlockOp::ChangeVariable {
            slot: self.slot.clone(),
            delta,
        }
    }

    /// The operation sequence that resets the slot to its quiescent state,
    /// freeing the name for reuse by a sibling or later scope. Generated at
    /// emission time: safe to emit even when the allocation never ran due
    /// to control flow skipping the scope body.
    pub fn release(&self) -> Vec<BlockOp> {
        if self.is_array() {
            vec![BlockOp::ClearList {
                list: self.slot.clone(),
            }]
        } else {
            vec![BlockOp::SetVariable {
                slot: self.slot.clone(),
                value: Operand::Literal(Value::zero(self.ty)),
            }]
        }
    }
}
