//! The decoded method envelope
//!
//! Everything the lifter needs to know about one method: its signature,
//! staticness, declared frame maxima and the decoded instruction view.

use crate::insn::InstructionView;
use jade_types::{Type, TypeError};

/// A decoded method ready for lifting
#[derive(Debug, Clone)]
pub struct Method {
    /// The declaring class
    pub owner: Type,
    /// Method name
    pub name: String,
    /// Argument types in declaration order, receiver excluded
    pub args: Vec<Type>,
    /// Return type
    pub ret: Type,
    /// True when the method has no receiver
    pub is_static: bool,
    /// Declared size of the local-variable array
    pub max_locals: u16,
    /// Declared maximum operand stack depth, in slots
    pub max_stack: u16,
    /// The decoded method body
    pub code: InstructionView,
}

impl Method {
    /// Create a method envelope, splitting `descriptor` into the signature
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: Type,
        name: impl Into<String>,
        descriptor: &str,
        is_static: bool,
        max_locals: u16,
        max_stack: u16,
        code: InstructionView,
    ) -> Result<Self, TypeError> {
        Ok(Self {
            owner,
            name: name.into(),
            args: Type::method_args(descriptor)?,
            ret: Type::method_return(descriptor)?,
            is_static,
            max_locals,
            max_stack,
            code,
        })
    }
}
