//! AVM stack machine: executes assembled programs.
//!
//! The machine owns a stack of typed [`Operand`]s. Arithmetic promotes to
//! the more precise kind of its two inputs, and a program must execute an
//! `exit` to finish successfully.
//!
//! # Usage
//!
//! ```
//! use avm_common::{Instruction, Operand, Program};
//! use avm_vm::Machine;
//!
//! let program = Program::new(vec![
//!     Instruction::Push(Operand::Int32(42)),
//!     Instruction::Push(Operand::Float(0.5)),
//!     Instruction::Add,
//!     Instruction::Dump,
//!     Instruction::Exit,
//! ]);
//!
//! let mut machine = Machine::new(Vec::new());
//! machine.execute(&program).unwrap();
//! assert_eq!(machine.output().as_slice(), b"42.5\n");
//! assert_eq!(machine.stack(), &[Operand::Float(42.5)]);
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::RuntimeError;
pub use execute::Flow;
pub use machine::Machine;

use avm_common::{Operand, Program};
use std::io;

/// Execute a program with output on stdout and return the final stack.
///
/// # Errors
///
/// Returns [`RuntimeError`] if an instruction fails or no `exit` executes.
pub fn run(program: &Program) -> Result<Vec<Operand>, RuntimeError> {
    let mut machine = Machine::new(io::stdout().lock());
    machine.execute(program)?;
    Ok(machine.into_stack())
}
