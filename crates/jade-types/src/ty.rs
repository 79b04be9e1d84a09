//! Core type definitions for classfile values
//!
//! A `Type` is canonical: array dimensions are folded into a single
//! `Array` node whose element is never itself an array, so derived
//! equality and hashing coincide with descriptor equality.

use crate::error::TypeError;
use std::fmt;

/// The eight primitive value kinds of the source machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// The `boolean` type
    Boolean,
    /// The `byte` type
    Byte,
    /// The `char` type
    Char,
    /// The `short` type
    Short,
    /// The `int` type
    Int,
    /// The `long` type (occupies two slots)
    Long,
    /// The `float` type
    Float,
    /// The `double` type (occupies two slots)
    Double,
}

impl PrimitiveType {
    /// The single-character descriptor for this primitive
    pub fn descriptor_char(&self) -> char {
        match self {
            PrimitiveType::Boolean => 'Z',
            PrimitiveType::Byte => 'B',
            PrimitiveType::Char => 'C',
            PrimitiveType::Short => 'S',
            PrimitiveType::Int => 'I',
            PrimitiveType::Long => 'J',
            PrimitiveType::Float => 'F',
            PrimitiveType::Double => 'D',
        }
    }

    /// True for the two-slot kinds (`long` and `double`)
    pub fn is_wide(&self) -> bool {
        matches!(self, PrimitiveType::Long | PrimitiveType::Double)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        };
        write!(f, "{}", s)
    }
}

/// A classfile value type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The `void` pseudo-type (method returns only)
    Void,
    /// A primitive value type
    Primitive(PrimitiveType),
    /// A class or interface type, identified by its qualified dotted name
    Reference(String),
    /// An array type with `dims` dimensions; `element` is never an array
    Array {
        /// Element type after all dimensions are stripped
        element: Box<Type>,
        /// Number of dimensions, at least one
        dims: u8,
    },
}

impl Type {
    /// The `boolean` primitive
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveType::Boolean);
    /// The `byte` primitive
    pub const BYTE: Type = Type::Primitive(PrimitiveType::Byte);
    /// The `char` primitive
    pub const CHAR: Type = Type::Primitive(PrimitiveType::Char);
    /// The `short` primitive
    pub const SHORT: Type = Type::Primitive(PrimitiveType::Short);
    /// The `int` primitive
    pub const INT: Type = Type::Primitive(PrimitiveType::Int);
    /// The `long` primitive
    pub const LONG: Type = Type::Primitive(PrimitiveType::Long);
    /// The `float` primitive
    pub const FLOAT: Type = Type::Primitive(PrimitiveType::Float);
    /// The `double` primitive
    pub const DOUBLE: Type = Type::Primitive(PrimitiveType::Double);
    /// The `void` pseudo-type
    pub const VOID: Type = Type::Void;

    /// `java.lang.Object`
    pub fn object() -> Type {
        Type::Reference("java.lang.Object".to_string())
    }

    /// `java.lang.String`
    pub fn string() -> Type {
        Type::Reference("java.lang.String".to_string())
    }

    /// `java.lang.Class`
    pub fn class() -> Type {
        Type::Reference("java.lang.Class".to_string())
    }

    /// A reference type from a dotted or slashed qualified name
    pub fn reference(name: &str) -> Type {
        Type::Reference(name.replace('/', "."))
    }

    /// Parse a full field descriptor, rejecting trailing input
    pub fn parse(descriptor: &str) -> Result<Type, TypeError> {
        let (ty, rest) = Self::parse_prefix(descriptor)
            .map_err(|_| TypeError::BadDescriptor(descriptor.to_string()))?;
        if !rest.is_empty() {
            return Err(TypeError::BadDescriptor(descriptor.to_string()));
        }
        Ok(ty)
    }

    /// Parse one type off the front of `s`, returning the remainder.
    fn parse_prefix(s: &str) -> Result<(Type, &str), TypeError> {
        let bad = || TypeError::BadDescriptor(s.to_string());
        let first = *s.as_bytes().first().ok_or_else(bad)?;
        match first {
            b'V' => Ok((Type::Void, &s[1..])),
            b'Z' => Ok((Type::BOOLEAN, &s[1..])),
            b'B' => Ok((Type::BYTE, &s[1..])),
            b'C' => Ok((Type::CHAR, &s[1..])),
            b'S' => Ok((Type::SHORT, &s[1..])),
            b'I' => Ok((Type::INT, &s[1..])),
            b'J' => Ok((Type::LONG, &s[1..])),
            b'F' => Ok((Type::FLOAT, &s[1..])),
            b'D' => Ok((Type::DOUBLE, &s[1..])),
            b'L' => {
                let semi = s.find(';').ok_or_else(bad)?;
                if semi == 1 {
                    return Err(bad());
                }
                let name = s[1..semi].replace('/', ".");
                Ok((Type::Reference(name), &s[semi + 1..]))
            }
            b'[' => {
                let dims = s.bytes().take_while(|&b| b == b'[').count();
                if dims > u8::MAX as usize {
                    return Err(bad());
                }
                let (element, rest) = Self::parse_prefix(&s[dims..])?;
                if element == Type::Void {
                    return Err(bad());
                }
                Ok((
                    Type::Array {
                        element: Box::new(element),
                        dims: dims as u8,
                    },
                    rest,
                ))
            }
            _ => Err(bad()),
        }
    }

    /// The argument types of a method descriptor, in declaration order
    pub fn method_args(descriptor: &str) -> Result<Vec<Type>, TypeError> {
        let bad = || TypeError::BadDescriptor(descriptor.to_string());
        let rest = descriptor.strip_prefix('(').ok_or_else(bad)?;
        let mut args = Vec::new();
        let mut rest = rest;
        loop {
            if rest.starts_with(')') {
                return Ok(args);
            }
            let (ty, tail) = Self::parse_prefix(rest).map_err(|_| bad())?;
            if ty == Type::Void {
                return Err(bad());
            }
            args.push(ty);
            rest = tail;
        }
    }

    /// The return type of a method descriptor
    pub fn method_return(descriptor: &str) -> Result<Type, TypeError> {
        let bad = || TypeError::BadDescriptor(descriptor.to_string());
        let close = descriptor.find(')').ok_or_else(bad)?;
        Type::parse(&descriptor[close + 1..]).map_err(|_| bad())
    }

    /// The canonical descriptor string for this type
    pub fn descriptor(&self) -> String {
        match self {
            Type::Void => "V".to_string(),
            Type::Primitive(p) => p.descriptor_char().to_string(),
            Type::Reference(name) => format!("L{};", name.replace('.', "/")),
            Type::Array { element, dims } => {
                let mut s = "[".repeat(*dims as usize);
                s.push_str(&element.descriptor());
                s
            }
        }
    }

    /// True for `long` and `double`, the types occupying two slots
    pub fn is_wide(&self) -> bool {
        matches!(self, Type::Primitive(p) if p.is_wide())
    }

    /// True for class, interface and array types
    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Reference(_) | Type::Array { .. })
    }

    /// True for array types
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// True for primitive value types
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// The element type obtained by stripping one array dimension
    pub fn element_type(&self) -> Result<Type, TypeError> {
        match self {
            Type::Array { element, dims: 1 } => Ok((**element).clone()),
            Type::Array { element, dims } => Ok(Type::Array {
                element: element.clone(),
                dims: dims - 1,
            }),
            other => Err(TypeError::NotAnArray(other.to_string())),
        }
    }

    /// An array type with `dims` extra dimensions over this type
    pub fn make_array(&self, dims: u8) -> Type {
        match self {
            Type::Array {
                element,
                dims: have,
            } => Type::Array {
                element: element.clone(),
                dims: have + dims,
            },
            other => Type::Array {
                element: Box::new(other.clone()),
                dims,
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Primitive(p) => write!(f, "{}", p),
            Type::Reference(name) => write!(f, "{}", name),
            Type::Array { element, dims } => {
                write!(f, "{}", element)?;
                for _ in 0..*dims {
                    write!(f, "[]")?;
                }
                Ok(())
            }
        }
    }
}
