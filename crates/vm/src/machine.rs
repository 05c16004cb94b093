//! Machine state: the operand stack, the exit flag, and the output sink.

use crate::error::RuntimeError;
use avm_common::{Opcode, Operand};
use std::io::Write;

/// The AVM stack machine.
///
/// Output from `dump` and `print` goes to `out`. The stack stays
/// inspectable after a failed run until the machine is dropped.
pub struct Machine<W: Write> {
    /// Operand stack, top is the last element.
    pub(crate) stack: Vec<Operand>,
    /// Set by `exit`, checked after every instruction.
    pub(crate) terminated: bool,
    /// Index of the instruction being executed.
    pub(crate) pc: usize,
    pub(crate) out: W,
}

impl<W: Write> Machine<W> {
    /// Create an idle machine writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            stack: Vec::new(),
            terminated: false,
            pc: 0,
            out,
        }
    }

    /// The current stack, bottom first.
    pub fn stack(&self) -> &[Operand] {
        &self.stack
    }

    /// Consume the machine, returning the stack (bottom first).
    pub fn into_stack(self) -> Vec<Operand> {
        self.stack
    }

    /// True once `exit` has executed.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The output sink.
    pub fn output(&self) -> &W {
        &self.out
    }

    pub(crate) fn push(&mut self, value: Operand) {
        self.stack.push(value);
    }

    /// Pop the top value; `op` names the instruction in the error.
    pub(crate) fn pop(&mut self, op: Opcode) -> Result<Operand, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::EmptyStack { at: self.pc, op })
    }

    pub(crate) fn top(&self, op: Opcode) -> Result<&Operand, RuntimeError> {
        self.stack
            .last()
            .ok_or(RuntimeError::EmptyStack { at: self.pc, op })
    }

    /// The two topmost values as `(left, right)`, without popping.
    pub(crate) fn top_two(&self, op: Opcode) -> Result<(Operand, Operand), RuntimeError> {
        match self.stack.as_slice() {
            [.., left, right] => Ok((*left, *right)),
            short => Err(RuntimeError::InsufficientValues {
                at: self.pc,
                op,
                found: short.len(),
            }),
        }
    }

    pub(crate) fn output_error(&self, err: std::io::Error) -> RuntimeError {
        RuntimeError::Output {
            at: self.pc,
            message: err.to_string(),
        }
    }
}
