//! jade-ssa - Classfile Method Lifting
//!
//! This crate turns the linear stack-machine instruction stream of one
//! method into a tree of typed SSA nodes with shared subexpressions.
//! All stack manipulation is factored out: operand stack slots become
//! direct child references and local slots become expression bindings,
//! unified across control-flow joins by phi nodes.
//!
//! # Architecture
//!
//! 1. [`jade_classfile::Method`] (decoded envelope) → [`lift::Lifter`]
//! 2. The lifter walks the instruction view in source order, simulating
//!    the locals and the operand stack with expression references.
//! 3. Join points get phi nodes; side effects become ordered operations.
//! 4. The result is a [`lift::LiftedMethod`] owning one [`ir::IrGraph`].

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod ir;
pub mod lift;

pub use error::{LiftError, LiftNote, LiftResult};
pub use ir::{BinOp, CmpOp, Const, Expr, ExprId, InvokeKind, IrGraph, Op, OpId};
pub use lift::{lift, InsnEffect, LiftedMethod, Lifter};
