//! Parser for AVM assembly tokens → instructions.
//!
//! Recursive descent over the token stream:
//!
//! ```text
//! program     := newline* (instruction (newline+ | END))* END
//! instruction := "push" value | "assert" value | simple-op
//! simple-op   := "pop" | "dump" | "add" | "sub" | "mul" | "div" | "mod" | "print" | "exit"
//! value       := type ( "(" number ")" | number )
//! ```

use crate::diagnostics::Diagnostics;
use crate::error::AsmError;
use crate::lexer::{Token, TokenKind};
use avm_common::{Instruction, Operand, Program};
use tracing::debug;

/// Returned past the end of a token slice that has no end marker.
static END_OF_FILE: Token = Token {
    kind: TokenKind::EndOfFile,
    text: String::new(),
    line: 0,
    column: 0,
};

/// Why a line was abandoned.
enum LineError {
    /// A syntax error to report.
    Syntax(AsmError),
    /// The line hit an `Invalid` token; the tokenizer already reported it.
    Reported,
}

impl From<AsmError> for LineError {
    fn from(err: AsmError) -> Self {
        LineError::Syntax(err)
    }
}

/// `err`, unless `tok` is the tokenizer's recovery token.
fn reject(tok: &Token, err: AsmError) -> LineError {
    if tok.kind == TokenKind::Invalid {
        LineError::Reported
    } else {
        LineError::Syntax(err)
    }
}

struct Parser<'t, 'd> {
    tokens: &'t [Token],
    pos: usize,
    diag: &'d mut Diagnostics,
}

impl<'t, 'd> Parser<'t, 'd> {
    fn current(&self) -> &'t Token {
        self.tokens.get(self.pos).unwrap_or(&END_OF_FILE)
    }

    /// Move to the next token. Never moves past an end marker.
    fn advance(&mut self) {
        if !self.current().is_end() {
            self.pos += 1;
        }
    }

    fn skip_newlines(&mut self) {
        while self.current().kind == TokenKind::Newline {
            self.advance();
        }
    }

    /// Skip to the start of the next line after an error.
    fn recover(&mut self) {
        while !matches!(self.current().kind, TokenKind::Newline) && !self.current().is_end() {
            self.advance();
        }
        self.skip_newlines();
    }

    fn parse_program(&mut self) -> Result<Program, AsmError> {
        let mut instructions = Vec::new();
        let mut saw_exit = false;

        self.skip_newlines();
        while !self.current().is_end() {
            // Already reported by the tokenizer.
            if self.current().kind == TokenKind::Invalid {
                self.recover();
                continue;
            }

            match self.parse_line() {
                Ok(instr) => {
                    saw_exit |= matches!(instr, Instruction::Exit);
                    instructions.push(instr);
                    self.skip_newlines();
                }
                Err(LineError::Syntax(err)) => {
                    self.diag.report(err)?;
                    self.recover();
                }
                Err(LineError::Reported) => self.recover(),
            }
        }

        if !saw_exit {
            self.diag.report(AsmError::MissingExit)?;
        }

        Ok(Program::new(instructions))
    }

    /// One instruction followed by end of line or end of input.
    fn parse_line(&mut self) -> Result<Instruction, LineError> {
        let instr = self.parse_instruction()?;
        let next = self.current();
        // An invalid token was reported by the tokenizer and ends the line.
        if !matches!(next.kind, TokenKind::Newline | TokenKind::Invalid) && !next.is_end() {
            return Err(unexpected(next, "end of line").into());
        }
        Ok(instr)
    }

    fn parse_instruction(&mut self) -> Result<Instruction, LineError> {
        let tok = self.current();
        let opcode = match tok.kind {
            TokenKind::Opcode(op) => op,
            TokenKind::Unknown | TokenKind::Type(_) => {
                return Err(AsmError::UnknownInstruction {
                    line: tok.line,
                    column: tok.column,
                    token: tok.text.clone(),
                }
                .into())
            }
            _ => return Err(reject(tok, unexpected(tok, "instruction"))),
        };
        self.advance();

        let instr = if opcode.takes_value() {
            Instruction::with_value(opcode, self.parse_value()?)
        } else {
            Instruction::simple(opcode)
        };
        instr.ok_or_else(|| {
            LineError::Syntax(AsmError::UnknownInstruction {
                line: tok.line,
                column: tok.column,
                token: tok.text.clone(),
            })
        })
    }

    /// `type(number)` or `type number`.
    fn parse_value(&mut self) -> Result<Operand, LineError> {
        let tok = self.current();
        let TokenKind::Type(kind) = tok.kind else {
            let err = AsmError::ExpectedKind {
                line: tok.line,
                column: tok.column,
                found: tok.describe(),
            };
            return Err(reject(tok, err));
        };
        self.advance();

        let number = if self.current().kind == TokenKind::LParen {
            self.advance();
            let number = self.expect_number()?;
            let close = self.current();
            if close.kind != TokenKind::RParen {
                return Err(reject(close, unexpected(close, "')'")));
            }
            self.advance();
            number
        } else {
            self.expect_number()?
        };

        Operand::parse(kind, &number.text).map_err(|source| {
            LineError::Syntax(AsmError::InvalidOperand {
                line: number.line,
                column: number.column,
                source,
            })
        })
    }

    fn expect_number(&mut self) -> Result<&'t Token, LineError> {
        let tok = self.current();
        match tok.kind {
            TokenKind::Integer | TokenKind::Decimal => {
                self.advance();
                Ok(tok)
            }
            _ => {
                let err = AsmError::ExpectedNumber {
                    line: tok.line,
                    column: tok.column,
                    found: tok.describe(),
                };
                Err(reject(tok, err))
            }
        }
    }
}

fn unexpected(tok: &Token, expected: &'static str) -> AsmError {
    AsmError::UnexpectedToken {
        line: tok.line,
        column: tok.column,
        expected,
        found: tok.describe(),
    }
}

/// Parse a token stream into a program.
///
/// Also checks that an `exit` appears somewhere; a program without one is
/// reported as [`AsmError::MissingExit`] after everything else has parsed.
///
/// # Errors
///
/// In fail-fast mode, the first syntax error. In collect mode errors are
/// recorded in `diag`, the parser resumes at the next line, and this always
/// succeeds with the instructions that did parse.
pub fn parse(tokens: &[Token], diag: &mut Diagnostics) -> Result<Program, AsmError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        diag,
    };
    let program = parser.parse_program()?;
    debug!(
        mode = ?parser.diag.mode(),
        instructions = program.len(),
        errors = parser.diag.errors().len(),
        "parsed program"
    );
    Ok(program)
}
