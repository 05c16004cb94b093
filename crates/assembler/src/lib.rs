//! AVM assembler: source text → [`Program`].
//!
//! Two passes over the text: [`tokenize`] produces a token stream, then
//! [`parse`] builds the instruction list. Both report errors through one
//! [`Diagnostics`] value, so the error policy ([`ErrorMode`]) applies to
//! the whole assembly.
//!
//! # Usage
//!
//! ```
//! use avm_assembler::{assemble, disassemble};
//!
//! let text = "push int32(42)\npush int32(33)\nadd\nexit\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.len(), 4);
//! assert_eq!(disassemble(&program), text);
//! ```
//!
//! # Listing Guarantee
//!
//! `assemble(&disassemble(&program)) == program` holds for every program
//! that contains an `exit`. The listing is canonical: parenthesized values,
//! no comments, one instruction per line.

pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;

pub use diagnostics::{Diagnostics, ErrorMode};
pub use error::AsmError;
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse;

use avm_common::Program;

/// Assembly settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsmOptions {
    /// Input ends at `;;` instead of end of file.
    pub interactive: bool,
    pub mode: ErrorMode,
}

/// Assemble file-mode text, stopping at the first error.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut diag = Diagnostics::new(ErrorMode::FailFast);
    let tokens = tokenize(text, false, &mut diag)?;
    parse(&tokens, &mut diag)
}

/// Assemble with explicit options.
///
/// # Errors
///
/// Every recorded error in [`ErrorMode::Collect`], ordered by line (a
/// missing `exit` is always last). A single error in
/// [`ErrorMode::FailFast`].
pub fn assemble_with(text: &str, options: &AsmOptions) -> Result<Program, Vec<AsmError>> {
    let mut diag = Diagnostics::new(options.mode);
    let program = tokenize(text, options.interactive, &mut diag)
        .and_then(|tokens| parse(&tokens, &mut diag))
        .map_err(|err| vec![err])?;
    diag.finish(program).map_err(|mut errors| {
        // Tokenizer errors are recorded before parser errors.
        errors.sort_by_key(|e| e.line().unwrap_or(usize::MAX));
        errors
    })
}

/// Canonical listing of a program, one instruction per line.
pub fn disassemble(program: &Program) -> String {
    program.to_string()
}
