//! Runtime errors for the AVM evaluator.
//!
//! Every error raised while an instruction runs includes its index (`at`)
//! in the program.

use avm_common::{ErrorKind, Opcode, OperandError};
use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `pop`, `assert` or `print` with nothing on the stack.
    #[error("{op} on empty stack at instruction {at}")]
    EmptyStack { at: usize, op: Opcode },

    /// A binary operation with fewer than two values on the stack.
    #[error("{op} needs 2 values, found {found} at instruction {at}")]
    InsufficientValues { at: usize, op: Opcode, found: usize },

    /// Division by zero, overflow or underflow in an arithmetic result, or
    /// an out-of-range `push`/`assert` operand.
    #[error("{source} at instruction {at}")]
    Arithmetic { at: usize, source: OperandError },

    /// The top of the stack differs from the asserted value.
    #[error("assertion failed at instruction {at}: expected {expected}, found {found}")]
    AssertFailed {
        at: usize,
        expected: String,
        found: String,
    },

    /// `print` with a top value that is not an `int8`.
    #[error("print expects int8 on top, found {found} at instruction {at}")]
    NotPrintable { at: usize, found: String },

    /// The program ran out of instructions before an `exit`.
    #[error("program ended without executing 'exit'")]
    MissingExit,

    /// Writing to the output sink failed.
    #[error("output failed at instruction {at}: {message}")]
    Output { at: usize, message: String },
}

impl RuntimeError {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::EmptyStack { .. } => ErrorKind::EmptyStack,
            RuntimeError::InsufficientValues { .. } => ErrorKind::InsufficientValues,
            RuntimeError::Arithmetic { source, .. } => source.kind(),
            RuntimeError::AssertFailed { .. } | RuntimeError::NotPrintable { .. } => {
                ErrorKind::AssertFailed
            }
            RuntimeError::MissingExit => ErrorKind::MissingExit,
            RuntimeError::Output { .. } => ErrorKind::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avm_common::OperandKind;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::EmptyStack {
                at: 2,
                op: Opcode::Pop
            }
            .to_string(),
            "pop on empty stack at instruction 2"
        );
        assert_eq!(
            RuntimeError::InsufficientValues {
                at: 0,
                op: Opcode::Mul,
                found: 1
            }
            .to_string(),
            "mul needs 2 values, found 1 at instruction 0"
        );
        assert_eq!(
            RuntimeError::Arithmetic {
                at: 5,
                source: OperandError::DivisionByZero
            }
            .to_string(),
            "division by zero at instruction 5"
        );
        assert_eq!(
            RuntimeError::MissingExit.to_string(),
            "program ended without executing 'exit'"
        );
    }

    #[test]
    fn arithmetic_kind_follows_source() {
        let e = RuntimeError::Arithmetic {
            at: 1,
            source: OperandError::Underflow {
                kind: OperandKind::Int8,
                value: "-129".to_string(),
            },
        };
        assert_eq!(e.kind(), ErrorKind::Underflow);
        assert_eq!(
            RuntimeError::NotPrintable {
                at: 0,
                found: "int32(65)".to_string()
            }
            .kind(),
            ErrorKind::AssertFailed
        );
    }
}
