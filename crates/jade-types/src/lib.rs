//! JVM Value Types
//!
//! This crate provides the closed set of value types used by the lifter:
//! the nine primitives, reference types and array types, together with
//! descriptor parsing and the field/method symbol references resolved out
//! of a constant pool.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod refs;
pub mod ty;

pub use error::TypeError;
pub use refs::{FieldRef, MethodRef};
pub use ty::{PrimitiveType, Type};
