//! Lift failures and notes

use thiserror::Error;

/// Result alias for lift operations
pub type LiftResult<T> = Result<T, LiftError>;

/// Failures that abort the lift of one method
///
/// Failures are reported at their first detection site; variants carry
/// the source instruction index where one is known.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LiftError {
    /// A type descriptor did not follow the classfile grammar
    #[error("malformed type descriptor {0:?}")]
    BadDescriptor(String),

    /// The lifter does not handle this opcode
    #[error("opcode {opcode} is not supported (instruction {index})")]
    Unimplemented {
        /// Mnemonic of the offending opcode
        opcode: &'static str,
        /// Source instruction index
        index: usize,
    },

    /// A pop was issued against an empty simulated stack
    #[error("operand stack underflow at instruction {index}")]
    StackUnderflow {
        /// Source instruction index
        index: usize,
    },

    /// A push exceeded the declared maximum stack depth
    #[error("operand stack overflow at instruction {index} (max {max} slots)")]
    StackOverflow {
        /// Source instruction index
        index: usize,
        /// Declared maximum depth in slots
        max: usize,
    },

    /// A local slot outside the declared local array was addressed
    #[error("local slot {slot} out of range at instruction {index} (max {max})")]
    LocalOverflow {
        /// Offending slot
        slot: u16,
        /// Source instruction index
        index: usize,
        /// Declared local array size
        max: usize,
    },

    /// A local slot with no binding was read
    #[error("read of unbound local slot {slot} at instruction {index}")]
    UnboundLocal {
        /// Offending slot
        slot: u16,
        /// Source instruction index
        index: usize,
    },

    /// Operand types disagree where they must match
    #[error("{op}: operand types disagree (expected {expected}, got {actual})")]
    TypeMismatch {
        /// The operation whose operands disagree
        op: String,
        /// The type the operation expected
        expected: String,
        /// The type it got
        actual: String,
    },

    /// The simulated stack was not empty at a control-flow join
    #[error("operand stack not empty at join (instruction {index})")]
    JoinStackNonEmpty {
        /// Source instruction index of the join
        index: usize,
    },

    /// Phi inputs have no common type
    #[error("phi inputs cannot be unified: {types:?}")]
    PhiDisagreement {
        /// Human-readable input types
        types: Vec<String>,
    },

    /// A return-address value was asked for its type
    #[error("return-address value has no type")]
    UntypedReturnAddress,

    /// An operand did not have the shape its opcode requires
    #[error("internal lift error: {message}")]
    Internal {
        /// What went wrong
        message: String,
    },
}

impl From<jade_types::TypeError> for LiftError {
    fn from(e: jade_types::TypeError) -> Self {
        match e {
            jade_types::TypeError::BadDescriptor(d) => LiftError::BadDescriptor(d),
            jade_types::TypeError::NotAnArray(t) => LiftError::TypeMismatch {
                op: "element access".to_string(),
                expected: "array type".to_string(),
                actual: t,
            },
        }
    }
}

/// Non-fatal observations recorded while lifting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftNote {
    /// The instruction is reachable neither by fallthrough nor by branch
    UnreachableCode {
        /// First instruction of the unreachable region
        index: usize,
    },
}

impl std::fmt::Display for LiftNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiftNote::UnreachableCode { index } => {
                write!(f, "unreachable code at instruction {}", index)
            }
        }
    }
}
