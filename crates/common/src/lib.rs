//! AVM common types.
//!
//! This crate provides the foundational data structures shared by the
//! assembler and the virtual machine:
//!
//! - [`OperandKind`]: the five numeric kinds and their precision order
//! - [`Operand`]: immutable typed values, the operand factory and arithmetic
//! - [`Opcode`]: the eleven instruction keywords
//! - [`Instruction`]: executable instructions as a closed enum
//! - [`Program`]: an instruction sequence with a canonical text listing
//! - [`ErrorKind`]: the error taxonomy every stage maps onto

pub mod error;
pub mod instruction;
pub mod kind;
pub mod opcode;
pub mod operand;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::{ErrorKind, OperandError};
pub use instruction::Instruction;
pub use kind::{OperandKind, ALL_KINDS};
pub use opcode::{Opcode, ALL_OPCODES};
pub use operand::{ArithOp, Operand};
pub use program::Program;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy that generates any in-range operand.
    fn arb_operand() -> impl Strategy<Value = Operand> {
        prop_oneof![
            any::<i8>().prop_map(Operand::Int8),
            any::<i16>().prop_map(Operand::Int16),
            any::<i32>().prop_map(Operand::Int32),
            any::<f32>()
                .prop_filter("finite", |v| v.is_finite())
                .prop_map(Operand::Float),
            any::<f64>()
                .prop_filter("finite", |v| v.is_finite())
                .prop_map(Operand::Double),
        ]
    }

    /// Small operands whose sums, differences and products stay in range
    /// for every kind.
    fn arb_small_operand() -> impl Strategy<Value = Operand> {
        prop_oneof![
            (-10i8..=10).prop_map(Operand::Int8),
            (-10i16..=10).prop_map(Operand::Int16),
            (-10i32..=10).prop_map(Operand::Int32),
            (-10i8..=10).prop_map(|v| Operand::Float(v as f32)),
            (-10i8..=10).prop_map(|v| Operand::Double(v as f64)),
        ]
    }

    proptest! {
        /// Rendering, parsing the rendering, and rendering again is stable.
        #[test]
        fn render_parse_render(x in arb_operand()) {
            let rendered = x.to_string();
            let reparsed = Operand::parse(x.kind(), &rendered).unwrap();
            prop_assert_eq!(reparsed.to_string(), rendered);
            prop_assert_eq!(reparsed.kind(), x.kind());
        }

        /// The result kind of add/sub/mul is the higher-precision kind.
        #[test]
        fn promotion_picks_max_kind(a in arb_small_operand(), b in arb_small_operand()) {
            let expected = a.kind().max(b.kind());
            for op in [ArithOp::Add, ArithOp::Sub, ArithOp::Mul] {
                let r = a.apply(op, &b).unwrap();
                prop_assert_eq!(r.kind(), expected);
            }
            if !b.is_zero() {
                prop_assert_eq!(a.div(&b).unwrap().kind(), expected);
            }
        }

        /// Every value that parses renders back inside its kind's bounds.
        #[test]
        fn parsed_integers_stay_in_bounds(n in any::<i64>()) {
            let text = n.to_string();
            match Operand::parse(OperandKind::Int16, &text) {
                Ok(v) => prop_assert_eq!(v.to_wide(), n as f64),
                Err(OperandError::Overflow { .. }) => prop_assert!(n > i16::MAX as i64),
                Err(OperandError::Underflow { .. }) => prop_assert!(n < i16::MIN as i64),
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }
        }
    }
}
