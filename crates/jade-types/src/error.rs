//! Type model errors

use thiserror::Error;

/// Errors raised by descriptor parsing and type accessors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The descriptor string does not follow the classfile grammar
    #[error("malformed type descriptor {0:?}")]
    BadDescriptor(String),

    /// An array accessor was called on a non-array type
    #[error("{0} is not an array type")]
    NotAnArray(String),
}
