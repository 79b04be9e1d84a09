//! Resolved constant pool values
//!
//! The pool itself is decoded by the container parser; the lifter only
//! ever sees loadable entries already resolved to one of these values.

use jade_types::Type;
use std::fmt;

/// A loadable constant pool entry with its value type implied by the variant
#[derive(Debug, Clone, PartialEq)]
pub enum PoolValue {
    /// A 32-bit integer constant
    Int(i32),
    /// A 64-bit integer constant
    Long(i64),
    /// A 32-bit float constant
    Float(f32),
    /// A 64-bit float constant
    Double(f64),
    /// A string constant
    Str(String),
    /// A class literal
    Class(Type),
}

impl PoolValue {
    /// The value type this entry loads as
    pub fn ty(&self) -> Type {
        match self {
            PoolValue::Int(_) => Type::INT,
            PoolValue::Long(_) => Type::LONG,
            PoolValue::Float(_) => Type::FLOAT,
            PoolValue::Double(_) => Type::DOUBLE,
            PoolValue::Str(_) => Type::string(),
            PoolValue::Class(_) => Type::class(),
        }
    }
}

impl fmt::Display for PoolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolValue::Int(v) => write!(f, "{}", v),
            PoolValue::Long(v) => write!(f, "{}L", v),
            PoolValue::Float(v) => write!(f, "{}F", v),
            PoolValue::Double(v) => write!(f, "{}", v),
            PoolValue::Str(s) => write!(f, "\"{}\"", s.escape_default()),
            PoolValue::Class(ty) => write!(f, "{}.class", ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_value_types() {
        assert_eq!(PoolValue::Int(1).ty(), Type::INT);
        assert_eq!(PoolValue::Long(1).ty(), Type::LONG);
        assert_eq!(PoolValue::Str("x".to_string()).ty(), Type::string());
        assert_eq!(PoolValue::Class(Type::object()).ty(), Type::class());
    }

    #[test]
    fn test_pool_value_display() {
        assert_eq!(format!("{}", PoolValue::Int(-3)), "-3");
        assert_eq!(format!("{}", PoolValue::Long(7)), "7L");
        assert_eq!(format!("{}", PoolValue::Str("hi".to_string())), "\"hi\"");
    }
}
