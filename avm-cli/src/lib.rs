//! The AVM pipeline: source text → tokens → program → execution.
//!
//! ```
//! use avm_cli::{interpret, RunOptions};
//! use avm_common::Operand;
//!
//! let mut out = Vec::new();
//! let text = "push int8(2)\npush int8(3)\nmul\ndump\nexit\n";
//! let stack = interpret(text, &RunOptions::default(), &mut out).unwrap();
//! assert_eq!(stack, vec![Operand::Int8(6)]);
//! assert_eq!(out, b"6\n");
//! ```

pub mod error;
pub mod logging;

pub use error::Error;

use avm_assembler::{assemble_with, AsmOptions, ErrorMode};
use avm_common::Operand;
use avm_vm::Machine;
use std::io::{self, BufRead, Write};
use tracing::info;

/// How to read and report a program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Input ends at `;;` instead of end of file.
    pub interactive: bool,
    /// Applies to tokenizing and parsing. Runtime errors always stop.
    pub mode: ErrorMode,
}

impl RunOptions {
    fn assembly(&self) -> AsmOptions {
        AsmOptions {
            interactive: self.interactive,
            mode: self.mode,
        }
    }
}

/// Read interactive source up to and including the first line that holds
/// the `;;` terminator, without waiting for end of input.
///
/// Returns what was read if the input ends first; the assembler then
/// reports the missing terminator.
pub fn read_interactive<R: BufRead>(reader: R) -> io::Result<String> {
    let mut text = String::new();
    for line in reader.lines() {
        let line = line?;
        text.push_str(&line);
        text.push('\n');
        if ends_input(&line) {
            break;
        }
    }
    Ok(text)
}

/// The first `;` on a line starts either the terminator or a comment.
fn ends_input(line: &str) -> bool {
    line.find(';').is_some_and(|at| line[at + 1..].starts_with(';'))
}

/// Assemble and execute `text`, writing program output to `out`.
///
/// Nothing runs unless assembly is clean.
///
/// # Errors
///
/// Every assembly error (one in fail-fast mode), or the single runtime
/// error that stopped execution.
pub fn interpret<W: Write>(
    text: &str,
    options: &RunOptions,
    out: W,
) -> Result<Vec<Operand>, Vec<Error>> {
    let program = assemble_with(text, &options.assembly())
        .map_err(|errors| errors.into_iter().map(Error::from).collect::<Vec<_>>())?;
    info!(instructions = program.len(), "assembled");

    let mut machine = Machine::new(out);
    machine
        .execute(&program)
        .map_err(|e| vec![Error::from(e)])?;
    Ok(machine.into_stack())
}
