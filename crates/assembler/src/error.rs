//! Error types for the AVM assembler.

use avm_common::{ErrorKind, OperandError};
use thiserror::Error;

/// Errors produced while tokenizing or parsing assembly text.
///
/// Positions are 1-indexed. Literal failures keep the underlying
/// [`OperandError`] so overflow and underflow stay distinguishable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A character that starts no token.
    #[error("line {line}, column {column}: unexpected character '{ch}'")]
    UnexpectedCharacter { line: usize, column: usize, ch: char },

    /// A word in instruction position that is not an instruction.
    #[error("line {line}, column {column}: unknown instruction '{token}'")]
    UnknownInstruction {
        line: usize,
        column: usize,
        token: String,
    },

    /// `push` or `assert` not followed by an operand type.
    #[error("line {line}, column {column}: expected operand type (int8, int16, int32, float, double), found '{found}'")]
    ExpectedKind {
        line: usize,
        column: usize,
        found: String,
    },

    /// An operand type not followed by a number.
    #[error("line {line}, column {column}: expected numeric value, found '{found}'")]
    ExpectedNumber {
        line: usize,
        column: usize,
        found: String,
    },

    /// A token appeared where it was not expected.
    #[error("line {line}, column {column}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        line: usize,
        column: usize,
        expected: &'static str,
        found: String,
    },

    /// A literal rejected by the operand factory.
    #[error("line {line}, column {column}: {source}")]
    InvalidOperand {
        line: usize,
        column: usize,
        source: OperandError,
    },

    /// The program has no `exit` instruction.
    #[error("program has no 'exit' instruction")]
    MissingExit,

    /// Interactive input ended without `;;`.
    #[error("line {line}: input ended without ';;'")]
    MissingTerminator { line: usize },
}

impl AsmError {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AsmError::UnexpectedCharacter { .. } => ErrorKind::Lexical,
            AsmError::UnknownInstruction { .. }
            | AsmError::ExpectedKind { .. }
            | AsmError::ExpectedNumber { .. }
            | AsmError::UnexpectedToken { .. } => ErrorKind::Syntax,
            AsmError::InvalidOperand { source, .. } => source.kind(),
            AsmError::MissingExit => ErrorKind::MissingExit,
            AsmError::MissingTerminator { .. } => ErrorKind::MissingTerminator,
        }
    }

    /// The source line of the error, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::UnexpectedCharacter { line, .. }
            | AsmError::UnknownInstruction { line, .. }
            | AsmError::ExpectedKind { line, .. }
            | AsmError::ExpectedNumber { line, .. }
            | AsmError::UnexpectedToken { line, .. }
            | AsmError::InvalidOperand { line, .. }
            | AsmError::MissingTerminator { line } => Some(*line),
            AsmError::MissingExit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avm_common::OperandKind;

    #[test]
    fn error_display_unexpected_character() {
        let e = AsmError::UnexpectedCharacter {
            line: 3,
            column: 7,
            ch: '@',
        };
        assert_eq!(e.to_string(), "line 3, column 7: unexpected character '@'");
    }

    #[test]
    fn error_display_unknown_instruction() {
        let e = AsmError::UnknownInstruction {
            line: 2,
            column: 1,
            token: "swap".to_string(),
        };
        assert_eq!(e.to_string(), "line 2, column 1: unknown instruction 'swap'");
    }

    #[test]
    fn error_display_unexpected_token() {
        let e = AsmError::UnexpectedToken {
            line: 4,
            column: 12,
            expected: "')'",
            found: "\\n".to_string(),
        };
        assert_eq!(e.to_string(), "line 4, column 12: expected ')', found '\\n'");
    }

    #[test]
    fn error_display_invalid_operand() {
        let e = AsmError::InvalidOperand {
            line: 1,
            column: 11,
            source: OperandError::Overflow {
                kind: OperandKind::Int8,
                value: "300".to_string(),
            },
        };
        assert_eq!(
            e.to_string(),
            "line 1, column 11: overflow: 300 does not fit in int8"
        );
        assert_eq!(e.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn error_display_missing_exit_and_terminator() {
        assert_eq!(
            AsmError::MissingExit.to_string(),
            "program has no 'exit' instruction"
        );
        assert_eq!(
            AsmError::MissingTerminator { line: 9 }.to_string(),
            "line 9: input ended without ';;'"
        );
    }

    #[test]
    fn kinds_and_lines() {
        let e = AsmError::ExpectedKind {
            line: 5,
            column: 6,
            found: "42".to_string(),
        };
        assert_eq!(e.kind(), ErrorKind::Syntax);
        assert_eq!(e.line(), Some(5));
        assert_eq!(AsmError::MissingExit.line(), None);
        assert_eq!(AsmError::MissingExit.kind(), ErrorKind::MissingExit);
    }
}
