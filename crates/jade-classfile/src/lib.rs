//! Decoded Classfile Method Bodies
//!
//! This crate provides the instruction-level surface the lifter consumes:
//! the JVM opcode enumeration with its real byte values, decoded immediate
//! operands with constant-pool entries already resolved, and a read-only
//! view over one method body together with its decoded envelope.
//!
//! Classfile container parsing and emission live outside this crate; the
//! structures here are what such a parser produces.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod insn;
pub mod method;
pub mod opcode;
pub mod pool;

pub use insn::{Instruction, InstructionView, Operand, SwitchTable};
pub use method::Method;
pub use opcode::Opcode;
pub use pool::PoolValue;
