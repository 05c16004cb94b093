//! Program representation for AVM instruction sequences.

use crate::instruction::Instruction;
use std::fmt;

/// An AVM program: an ordered sequence of instructions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns true if an `exit` appears anywhere in the program.
    pub fn has_exit(&self) -> bool {
        self.instructions
            .iter()
            .any(|instr| matches!(instr, Instruction::Exit))
    }
}

/// Canonical listing: one instruction per line, no comments, value
/// arguments in parenthesized form.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            writeln!(f, "{instr}")?;
        }
        Ok(())
    }
}
