//! Error taxonomy shared by every AVM stage, and operand construction errors.

use crate::kind::OperandKind;
use std::fmt;
use thiserror::Error;

/// The category of an error, independent of the stage that raised it.
///
/// Every error type in the workspace maps onto exactly one of these via a
/// `kind()` method, so callers can branch on the category without matching
/// stage-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized character or malformed literal text.
    Lexical,
    /// Grammar violation.
    Syntax,
    /// No `exit` instruction in the program, or none reached.
    MissingExit,
    /// Interactive input ended without the `;;` terminator.
    MissingTerminator,
    /// `pop`, `assert` or `print` on an empty stack.
    EmptyStack,
    /// Binary operation with fewer than two values on the stack.
    InsufficientValues,
    /// Division or modulo with a zero right-hand operand.
    DivisionByZero,
    /// Value above the maximum of its kind.
    Overflow,
    /// Value below the minimum of its kind.
    Underflow,
    /// `assert` mismatch, or `print` on a non-`int8` value.
    AssertFailed,
    /// Writing to the output sink failed.
    Output,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::MissingExit => "missing exit",
            ErrorKind::MissingTerminator => "missing terminator",
            ErrorKind::EmptyStack => "empty stack",
            ErrorKind::InsufficientValues => "insufficient values",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::Overflow => "overflow",
            ErrorKind::Underflow => "underflow",
            ErrorKind::AssertFailed => "assertion failed",
            ErrorKind::Output => "output error",
        };
        f.write_str(name)
    }
}

/// Errors from building or combining operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// The literal text is not a number acceptable for the kind.
    #[error("invalid {kind} literal '{text}'")]
    InvalidLiteral { kind: OperandKind, text: String },

    /// The value is above the maximum of the kind.
    #[error("overflow: {value} does not fit in {kind}")]
    Overflow { kind: OperandKind, value: String },

    /// The value is below the minimum of the kind.
    #[error("underflow: {value} does not fit in {kind}")]
    Underflow { kind: OperandKind, value: String },

    /// Division or modulo by a zero operand.
    #[error("division by zero")]
    DivisionByZero,
}

impl OperandError {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OperandError::InvalidLiteral { .. } => ErrorKind::Lexical,
            OperandError::Overflow { .. } => ErrorKind::Overflow,
            OperandError::Underflow { .. } => ErrorKind::Underflow,
            OperandError::DivisionByZero => ErrorKind::DivisionByZero,
        }
    }
}
