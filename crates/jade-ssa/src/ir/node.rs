//! IR node definitions
//!
//! Expressions produce values; operations have effects. An invocation is
//! an expression even when its result is void or discarded; the lifter
//! records such calls as [`Op::Discard`] operations so they keep their
//! place in the emitted sequence.

use jade_classfile::SwitchTable;
use jade_types::{FieldRef, MethodRef, Type};
use std::fmt;

/// Index of an expression node in its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub u32);

impl ExprId {
    /// Create an expression id
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw index value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Index of an operation node in its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpId(pub u32);

impl OpId {
    /// Create an operation id
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw index value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op{}", self.0)
    }
}

/// A constant value with its type implied by the variant
#[derive(Debug, Clone, PartialEq)]
pub enum Const {
    /// The null reference
    Null,
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// String constant
    Str(String),
    /// Class literal
    Class(Type),
}

impl Const {
    /// The value type of this constant
    ///
    /// `null` types as `java.lang.Object`; phi unification treats its
    /// nullness structurally instead (see the graph).
    pub fn ty(&self) -> Type {
        match self {
            Const::Null => Type::object(),
            Const::Int(_) => Type::INT,
            Const::Long(_) => Type::LONG,
            Const::Float(_) => Type::FLOAT,
            Const::Double(_) => Type::DOUBLE,
            Const::Str(_) => Type::string(),
            Const::Class(_) => Type::class(),
        }
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Const::Null => write!(f, "null"),
            Const::Int(v) => write!(f, "{}", v),
            Const::Long(v) => write!(f, "{}L", v),
            Const::Float(v) => write!(f, "{}F", v),
            Const::Double(v) => write!(f, "{}", v),
            Const::Str(s) => write!(f, "\"{}\"", s.escape_default()),
            Const::Class(ty) => write!(f, "{}.class", ty),
        }
    }
}

/// Binary arithmetic, shift and bitwise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Remainder
    Rem,
    /// Shift left
    Shl,
    /// Arithmetic shift right
    Shr,
    /// Logical shift right
    Ushr,
    /// Bitwise and
    And,
    /// Bitwise or
    Or,
    /// Bitwise exclusive or
    Xor,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Ushr => ">>>",
            BinOp::And => "&",
            BinOp::Or => "|",
            BinOp::Xor => "^",
        };
        write!(f, "{}", s)
    }
}

/// Comparison operators built by the conditional branch opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Equality (value or reference identity)
    Eq,
    /// Less than
    Lt,
    /// Greater than
    Gt,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "==",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
        };
        write!(f, "{}", s)
    }
}

/// Invocation dispatch kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeKind {
    /// `invokestatic`: no receiver
    Static,
    /// `invokevirtual`: dispatched on the receiver class
    Virtual,
    /// `invokeinterface`: dispatched through an interface
    Interface,
    /// `invokespecial`: constructors, private and super calls
    Special,
}

impl fmt::Display for InvokeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvokeKind::Static => "static",
            InvokeKind::Virtual => "virtual",
            InvokeKind::Interface => "interface",
            InvokeKind::Special => "special",
        };
        write!(f, "{}", s)
    }
}

/// A value-producing node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An incoming method parameter; the receiver of an instance method
    /// is `arg0`
    Argument {
        /// Parameter name, `argN` by declaration position
        name: String,
        /// Declared parameter type
        ty: Type,
    },

    /// A constant pushed by a constant opcode or the `ldc` family
    Constant(Const),

    /// A control-flow merge of the listed definitions
    ///
    /// Inputs are ordered by predecessor instruction index, ascending.
    Phi {
        /// Candidate definitions, one per predecessor that binds the slot
        inputs: Vec<ExprId>,
    },

    /// Binary arithmetic; both operands must share one type
    Binary {
        /// Operator
        op: BinOp,
        /// Left operand (the deeper stack slot)
        lhs: ExprId,
        /// Right operand
        rhs: ExprId,
    },

    /// A boolean comparison of two values
    Compare {
        /// Comparator
        op: CmpOp,
        /// Left operand
        lhs: ExprId,
        /// Right operand
        rhs: ExprId,
    },

    /// Boolean negation of a comparison
    Not {
        /// The negated boolean expression
        value: ExprId,
    },

    /// A numeric conversion or checked reference cast
    Cast {
        /// Value being converted
        value: ExprId,
        /// Conversion target type
        target: Type,
    },

    /// An `instanceof` probe
    InstanceOf {
        /// Value being probed
        value: ExprId,
        /// Probed type
        probe: Type,
    },

    /// A field read; `object` is absent for static fields
    LoadField {
        /// The field
        field: FieldRef,
        /// Receiver, absent iff the field is static
        object: Option<ExprId>,
    },

    /// An array element read
    LoadElement {
        /// The array
        array: ExprId,
        /// Element index
        index: ExprId,
    },

    /// An array length query
    ArrayLen {
        /// The array
        array: ExprId,
    },

    /// A scalar or array allocation
    ///
    /// `dims` is empty for a scalar allocation; for an array it carries
    /// one length expression per supplied dimension.
    Allocate {
        /// Allocated type
        ty: Type,
        /// Per-dimension lengths, outermost first
        dims: Vec<ExprId>,
    },

    /// A method invocation
    Invoke {
        /// Dispatch kind
        kind: InvokeKind,
        /// The resolved method
        method: MethodRef,
        /// Arguments in declaration order
        args: Vec<ExprId>,
        /// Receiver, absent iff `kind` is `Static`
        object: Option<ExprId>,
    },

    /// The address a subroutine returns through; it has no type and the
    /// graph refuses to answer `expr_type` for it
    RetAddr {
        /// Subroutine entry instruction index
        target: usize,
    },
}

/// A side-effecting or control-transfer node
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// A field write; `object` is absent for static fields
    StoreField {
        /// The field
        field: FieldRef,
        /// Value being stored
        value: ExprId,
        /// Receiver, absent iff the field is static
        object: Option<ExprId>,
    },

    /// An array element write
    StoreElement {
        /// The array
        array: ExprId,
        /// Element index
        index: ExprId,
        /// Value being stored
        value: ExprId,
    },

    /// Method return, with a value for the typed forms
    Return {
        /// Returned value, absent for `return`
        value: Option<ExprId>,
    },

    /// Exception throw
    Throw {
        /// Thrown value
        value: ExprId,
    },

    /// A conditional or unconditional branch
    Branch {
        /// Boolean condition, absent for `goto`
        condition: Option<ExprId>,
        /// Target instruction index
        target: usize,
    },

    /// A subroutine call (`jsr`)
    SubroutineCall {
        /// Subroutine entry instruction index
        target: usize,
    },

    /// A subroutine return (`ret`)
    SubroutineReturn,

    /// A table or lookup switch
    Switch {
        /// Selector value
        selector: ExprId,
        /// Decoded jump table
        table: SwitchTable,
    },

    /// Monitor acquisition
    MonitorEnter {
        /// The monitored reference
        value: ExprId,
    },

    /// Monitor release
    MonitorExit {
        /// The monitored reference
        value: ExprId,
    },

    /// An invocation evaluated for its effect; the result is void or was
    /// popped unused
    Discard {
        /// The discarded invocation expression
        value: ExprId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", ExprId::new(7)), "e7");
        assert_eq!(format!("{}", OpId::new(3)), "op3");
    }

    #[test]
    fn test_binop_display() {
        assert_eq!(format!("{}", BinOp::Add), "+");
        assert_eq!(format!("{}", BinOp::Ushr), ">>>");
        assert_eq!(format!("{}", CmpOp::Eq), "==");
    }

    #[test]
    fn test_const_types() {
        assert_eq!(Const::Int(0).ty(), Type::INT);
        assert_eq!(Const::Long(0).ty(), Type::LONG);
        assert_eq!(Const::Null.ty(), Type::object());
        assert_eq!(Const::Str("s".to_string()).ty(), Type::string());
    }

    #[test]
    fn test_const_display() {
        assert_eq!(format!("{}", Const::Null), "null");
        assert_eq!(format!("{}", Const::Int(-1)), "-1");
        assert_eq!(format!("{}", Const::Long(2)), "2L");
        assert_eq!(format!("{}", Const::Class(Type::string())), "java.lang.String.class");
    }
}
