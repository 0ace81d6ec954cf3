//! Lowering core for compiling a block-scoped imperative language onto a
//! visual, block-based runtime with no call stack, no lexical scoping, and
//! only global variables and lists for storage.
//!
//! The crate takes the parsed source tree (produced by an external
//! front-end) and emits ordered sequences of target primitive operations,
//! maintaining a virtual stack: locally scoped variables and arrays are
//! simulated on uniquely named global slots that are allocated on scope
//! entry and reset on every scope exit path. Scope violations (duplicate
//! declarations, undefined references) are detected during lowering and
//! reported through an accumulating diagnostic sink rather than aborting
//! the pass.

pub mod ast;
pub mod blocks;
pub mod diagnostics;
pub mod location;
pub mod lower;
pub mod program;

pub use ast::ElementType;
pub use diagnostics::{Diagnostic, DiagnosticSink, ErrorKind, Level};
pub use location::{Location, Span};
pub use lower::{compile_routine, lower_routine, CompileSession, LowerContext};
pub use program::{GlobalList, Program, Target};
