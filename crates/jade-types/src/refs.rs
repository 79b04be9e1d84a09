//! Field and method symbol references
//!
//! Lightweight records for the symbolic references a constant pool
//! resolves to. They carry everything the lifter needs to type an
//! access or a call without consulting the pool again.

use crate::error::TypeError;
use crate::ty::Type;
use std::fmt;

/// A resolved field reference: owning class, name and value type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    /// Class or interface declaring the field
    pub owner: Type,
    /// Field name
    pub name: String,
    /// Declared value type of the field
    pub ty: Type,
}

impl FieldRef {
    /// Create a new field reference
    pub fn new(owner: Type, name: impl Into<String>, ty: Type) -> Self {
        Self {
            owner,
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// A resolved method reference: owner, name and full signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Class or interface declaring the method
    pub owner: Type,
    /// Method name
    pub name: String,
    /// Argument types in declaration order, receiver excluded
    pub args: Vec<Type>,
    /// Return type
    pub ret: Type,
}

impl MethodRef {
    /// Create a new method reference
    pub fn new(owner: Type, name: impl Into<String>, args: Vec<Type>, ret: Type) -> Self {
        Self {
            owner,
            name: name.into(),
            args,
            ret,
        }
    }

    /// Create a method reference by splitting a method descriptor
    pub fn from_descriptor(
        owner: Type,
        name: impl Into<String>,
        descriptor: &str,
    ) -> Result<Self, TypeError> {
        Ok(Self {
            owner,
            name: name.into(),
            args: Type::method_args(descriptor)?,
            ret: Type::method_return(descriptor)?,
        })
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
        write!(f, "{}.{}({})", self.owner, self.name, args.join(", "))
    }
}
