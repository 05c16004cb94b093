//! Executable instructions.

use crate::opcode::Opcode;
use crate::operand::Operand;
use std::fmt;

/// A single executable instruction.
///
/// A closed set: one variant per [`Opcode`]. `Push` and `Assert` own the
/// literal operand captured when the program was built.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Push(Operand),
    Pop,
    Dump,
    Assert(Operand),
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Print,
    Exit,
}

impl Instruction {
    /// Build an argument-less instruction from its opcode.
    ///
    /// Returns `None` for `Push` and `Assert`, which need an operand.
    pub fn simple(opcode: Opcode) -> Option<Self> {
        match opcode {
            Opcode::Push | Opcode::Assert => None,
            Opcode::Pop => Some(Instruction::Pop),
            Opcode::Dump => Some(Instruction::Dump),
            Opcode::Add => Some(Instruction::Add),
            Opcode::Sub => Some(Instruction::Sub),
            Opcode::Mul => Some(Instruction::Mul),
            Opcode::Div => Some(Instruction::Div),
            Opcode::Mod => Some(Instruction::Mod),
            Opcode::Print => Some(Instruction::Print),
            Opcode::Exit => Some(Instruction::Exit),
        }
    }

    /// Build a value-carrying instruction from its opcode.
    ///
    /// Returns `None` for opcodes that take no value.
    pub fn with_value(opcode: Opcode, value: Operand) -> Option<Self> {
        match opcode {
            Opcode::Push => Some(Instruction::Push(value)),
            Opcode::Assert => Some(Instruction::Assert(value)),
            _ => None,
        }
    }

    /// The opcode of this instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Push(_) => Opcode::Push,
            Instruction::Pop => Opcode::Pop,
            Instruction::Dump => Opcode::Dump,
            Instruction::Assert(_) => Opcode::Assert,
            Instruction::Add => Opcode::Add,
            Instruction::Sub => Opcode::Sub,
            Instruction::Mul => Opcode::Mul,
            Instruction::Div => Opcode::Div,
            Instruction::Mod => Opcode::Mod,
            Instruction::Print => Opcode::Print,
            Instruction::Exit => Opcode::Exit,
        }
    }

    /// The literal operand, for `Push` and `Assert`.
    pub fn operand(&self) -> Option<&Operand> {
        match self {
            Instruction::Push(v) | Instruction::Assert(v) => Some(v),
            _ => None,
        }
    }
}

/// Canonical assembly text: `push int32(42)`, `add`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand() {
            Some(v) => write!(f, "{} {}({})", self.opcode(), v.kind(), v),
            None => write!(f, "{}", self.opcode()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::ALL_OPCODES;

    #[test]
    fn simple_and_with_value_partition_opcodes() {
        let v = Operand::Int8(1);
        for &op in &ALL_OPCODES {
            let simple = Instruction::simple(op);
            let valued = Instruction::with_value(op, v);
            assert!(simple.is_some() != valued.is_some(), "{op:?}");
            let instr = simple.or(valued).unwrap();
            assert_eq!(instr.opcode(), op);
        }
    }

    #[test]
    fn operand_accessor() {
        assert_eq!(
            Instruction::Assert(Operand::Int16(3)).operand(),
            Some(&Operand::Int16(3))
        );
        assert_eq!(Instruction::Dump.operand(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Instruction::Push(Operand::Int32(42)).to_string(), "push int32(42)");
        assert_eq!(
            Instruction::Assert(Operand::Double(42.42)).to_string(),
            "assert double(42.42)"
        );
        assert_eq!(Instruction::Mod.to_string(), "mod");
    }
}
