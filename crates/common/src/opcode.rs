//! Opcode definitions for the AVM instruction set.

use std::fmt;

/// Identifies the operation an instruction performs.
///
/// Opcodes are the instruction keywords of the assembly language. Only
/// `Push` and `Assert` take a value argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Push a value onto the stack.
    Push,
    /// Discard the top of the stack.
    Pop,
    /// Write every stack element, top first.
    Dump,
    /// Check the top of the stack against a value.
    Assert,
    /// Pop two values, push their sum.
    Add,
    /// Pop two values, push (second_popped - first_popped).
    Sub,
    /// Pop two values, push their product.
    Mul,
    /// Pop two values, push (second_popped / first_popped).
    Div,
    /// Pop two values, push (second_popped % first_popped).
    Mod,
    /// Write the `int8` on top of the stack as a character.
    Print,
    /// Stop execution.
    Exit,
}

/// All opcodes, in keyword-table order.
pub const ALL_OPCODES: [Opcode; 11] = [
    Opcode::Push,
    Opcode::Pop,
    Opcode::Dump,
    Opcode::Assert,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Mod,
    Opcode::Print,
    Opcode::Exit,
];

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Push => "push",
            Opcode::Pop => "pop",
            Opcode::Dump => "dump",
            Opcode::Assert => "assert",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::Print => "print",
            Opcode::Exit => "exit",
        }
    }

    /// Looks up an opcode by mnemonic. Case-sensitive.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }

    /// Returns true if the opcode takes a typed value argument.
    pub fn takes_value(&self) -> bool {
        matches!(self, Opcode::Push | Opcode::Assert)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_opcodes_count() {
        assert_eq!(ALL_OPCODES.len(), 11);
    }

    #[test]
    fn mnemonic_roundtrip() {
        for &op in &ALL_OPCODES {
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        }
    }

    #[test]
    fn mnemonics_are_unique() {
        for (i, a) in ALL_OPCODES.iter().enumerate() {
            for b in &ALL_OPCODES[i + 1..] {
                assert_ne!(a.mnemonic(), b.mnemonic());
            }
        }
    }

    #[test]
    fn unknown_mnemonics() {
        assert_eq!(Opcode::from_mnemonic("PUSH"), None);
        assert_eq!(Opcode::from_mnemonic("halt"), None);
        assert_eq!(Opcode::from_mnemonic(""), None);
    }

    #[test]
    fn value_taking_opcodes() {
        let with_value: Vec<_> = ALL_OPCODES.iter().filter(|op| op.takes_value()).collect();
        assert_eq!(with_value, vec![&Opcode::Push, &Opcode::Assert]);
    }
}
