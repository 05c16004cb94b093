//! Execution loop and instruction dispatch for the AVM.

use crate::error::RuntimeError;
use crate::machine::Machine;
use avm_common::{ArithOp, Instruction, Opcode, Operand, Program};
use std::io::Write;
use tracing::{debug, trace};

/// What the loop does after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl<W: Write> Machine<W> {
    /// Execute `program` from its first instruction until `exit` or error.
    ///
    /// The output sink is flushed whether or not the run succeeds.
    ///
    /// # Errors
    ///
    /// The first [`RuntimeError`]; the stack keeps its state at that point.
    /// [`RuntimeError::MissingExit`] if the instructions run out before an
    /// `exit` executes.
    pub fn execute(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let result = self.run_loop(program);
        let flushed = self.out.flush().map_err(|e| self.output_error(e));
        match &result {
            Ok(()) => debug!(depth = self.stack.len(), "program exited"),
            Err(err) => debug!(at = self.pc, %err, "program failed"),
        }
        result.and(flushed)
    }

    fn run_loop(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for (pc, instr) in program.instructions.iter().enumerate() {
            self.pc = pc;
            let flow = self.step(instr)?;
            trace!(at = pc, instruction = %instr, depth = self.stack.len(), "executed");
            if flow == Flow::Exit {
                self.terminated = true;
            }
            if self.terminated {
                return Ok(());
            }
        }
        Err(RuntimeError::MissingExit)
    }

    /// Execute a single instruction at the current pc.
    pub fn step(&mut self, instr: &Instruction) -> Result<Flow, RuntimeError> {
        match instr {
            Instruction::Push(value) => {
                let value = self.validated(value)?;
                self.push(value);
            }
            Instruction::Pop => {
                self.pop(Opcode::Pop)?;
            }
            Instruction::Dump => self.exec_dump()?,
            Instruction::Assert(expected) => {
                let expected = self.validated(expected)?;
                self.exec_assert(&expected)?;
            }
            Instruction::Add => self.exec_arith(Opcode::Add, ArithOp::Add)?,
            Instruction::Sub => self.exec_arith(Opcode::Sub, ArithOp::Sub)?,
            Instruction::Mul => self.exec_arith(Opcode::Mul, ArithOp::Mul)?,
            Instruction::Div => self.exec_arith(Opcode::Div, ArithOp::Div)?,
            Instruction::Mod => self.exec_arith(Opcode::Mod, ArithOp::Mod)?,
            Instruction::Print => self.exec_print()?,
            Instruction::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Operands in a program built in code are not bounds-checked yet.
    fn validated(&self, value: &Operand) -> Result<Operand, RuntimeError> {
        value.checked().map_err(|source| RuntimeError::Arithmetic {
            at: self.pc,
            source,
        })
    }

    fn exec_dump(&mut self) -> Result<(), RuntimeError> {
        for value in self.stack.iter().rev() {
            if let Err(e) = writeln!(self.out, "{value}") {
                return Err(self.output_error(e));
            }
        }
        Ok(())
    }

    /// Same kind and same rendering; the stack is left unchanged.
    fn exec_assert(&mut self, expected: &Operand) -> Result<(), RuntimeError> {
        let top = self.top(Opcode::Assert)?;
        if top.kind() == expected.kind() && top.to_string() == expected.to_string() {
            return Ok(());
        }
        Err(RuntimeError::AssertFailed {
            at: self.pc,
            expected: describe(expected),
            found: describe(top),
        })
    }

    /// Pops right then left and pushes `left op right`. Nothing is popped
    /// if the operation fails.
    fn exec_arith(&mut self, opcode: Opcode, op: ArithOp) -> Result<(), RuntimeError> {
        let (left, right) = self.top_two(opcode)?;
        let result = left
            .apply(op, &right)
            .map_err(|source| RuntimeError::Arithmetic {
                at: self.pc,
                source,
            })?;
        self.stack.truncate(self.stack.len() - 2);
        self.push(result);
        Ok(())
    }

    fn exec_print(&mut self) -> Result<(), RuntimeError> {
        let top = self.top(Opcode::Print)?;
        let Operand::Int8(code) = *top else {
            return Err(RuntimeError::NotPrintable {
                at: self.pc,
                found: describe(top),
            });
        };
        self.out
            .write_all(&[code as u8])
            .map_err(|e| self.output_error(e))
    }
}

/// `kind(value)`, as written in source.
fn describe(value: &Operand) -> String {
    format!("{}({value})", value.kind())
}
