//! Typed operands and the operand factory.
//!
//! Operands are what live on the machine stack. They are immutable: every
//! arithmetic operation builds a new operand through [`Operand::from_wide`],
//! which re-validates the result against the bounds of its kind.

use crate::error::OperandError;
use crate::kind::OperandKind;
use std::fmt;

/// An immutable numeric value of exactly one [`OperandKind`].
///
/// [`Operand::parse`] and [`Operand::from_wide`] bounds-check their input.
/// The variants are public, so a value built directly (for example
/// `Operand::Float(f32::NAN)`) may be out of range; [`Operand::checked`]
/// re-validates it, and the VM applies it to every `push` and `assert`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Float(f32),
    Double(f64),
}

/// A binary arithmetic operation between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    /// Apply the operation in the wide representation.
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
            ArithOp::Mod => a % b,
        }
    }

    /// Whether a zero right-hand operand is an error.
    fn is_division(self) -> bool {
        matches!(self, ArithOp::Div | ArithOp::Mod)
    }
}

impl Operand {
    /// Build an operand of `kind` from literal text.
    ///
    /// `text` must match `[+-]?[0-9]+(\.[0-9]+)?`; integer kinds additionally
    /// reject a fractional part. The value is parsed as `f64` so bounds
    /// checks are uniform across kinds.
    ///
    /// # Errors
    ///
    /// [`OperandError::InvalidLiteral`] for malformed text,
    /// [`OperandError::Overflow`] / [`OperandError::Underflow`] when the
    /// value lies outside the kind's range.
    pub fn parse(kind: OperandKind, text: &str) -> Result<Self, OperandError> {
        let invalid = || OperandError::InvalidLiteral {
            kind,
            text: text.to_string(),
        };

        if !is_numeric_literal(text) || (kind.is_integer() && text.contains('.')) {
            return Err(invalid());
        }
        let wide: f64 = text.parse().map_err(|_| invalid())?;

        check_bounds(kind, wide, || text.to_string())?;
        match kind {
            // Narrowing the f64 would round twice.
            OperandKind::Float => text.parse().map(Operand::Float).map_err(|_| invalid()),
            _ => Ok(Self::cast(kind, wide)),
        }
    }

    /// Build an operand of `kind` from a wide arithmetic result.
    ///
    /// Integer kinds truncate toward zero after the bounds check. Non-finite
    /// values are always out of range.
    pub fn from_wide(kind: OperandKind, value: f64) -> Result<Self, OperandError> {
        check_bounds(kind, value, || value.to_string())?;
        Ok(Self::cast(kind, value))
    }

    /// Re-validate an operand that may have been built from a variant.
    ///
    /// Integer variants always pass. Float variants fail on `NaN` and
    /// infinities.
    pub fn checked(self) -> Result<Self, OperandError> {
        Operand::from_wide(self.kind(), self.to_wide())
    }

    /// Cast an in-range wide value to the native width of `kind`.
    fn cast(kind: OperandKind, value: f64) -> Self {
        match kind {
            OperandKind::Int8 => Operand::Int8(value as i8),
            OperandKind::Int16 => Operand::Int16(value as i16),
            OperandKind::Int32 => Operand::Int32(value as i32),
            OperandKind::Float => Operand::Float(value as f32),
            OperandKind::Double => Operand::Double(value),
        }
    }

    /// The kind of this operand.
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Int8(_) => OperandKind::Int8,
            Operand::Int16(_) => OperandKind::Int16,
            Operand::Int32(_) => OperandKind::Int32,
            Operand::Float(_) => OperandKind::Float,
            Operand::Double(_) => OperandKind::Double,
        }
    }

    /// The value widened to `f64`. Exact for every kind.
    pub fn to_wide(&self) -> f64 {
        match *self {
            Operand::Int8(v) => v as f64,
            Operand::Int16(v) => v as f64,
            Operand::Int32(v) => v as f64,
            Operand::Float(v) => v as f64,
            Operand::Double(v) => v,
        }
    }

    /// True when the value is numerically zero (including `-0.0`).
    pub fn is_zero(&self) -> bool {
        self.to_wide() == 0.0
    }

    /// Combine `self` (left) with `rhs` (right).
    ///
    /// The result has the higher-precision kind of the two. Both sides are
    /// widened to `f64`, combined, and the result is bounds-checked for the
    /// result kind, so arithmetic can overflow even with in-range inputs.
    pub fn apply(&self, op: ArithOp, rhs: &Operand) -> Result<Operand, OperandError> {
        if op.is_division() && rhs.is_zero() {
            return Err(OperandError::DivisionByZero);
        }
        let kind = self.kind().max(rhs.kind());
        Operand::from_wide(kind, op.apply(self.to_wide(), rhs.to_wide()))
    }

    pub fn add(&self, rhs: &Operand) -> Result<Operand, OperandError> {
        self.apply(ArithOp::Add, rhs)
    }

    pub fn sub(&self, rhs: &Operand) -> Result<Operand, OperandError> {
        self.apply(ArithOp::Sub, rhs)
    }

    pub fn mul(&self, rhs: &Operand) -> Result<Operand, OperandError> {
        self.apply(ArithOp::Mul, rhs)
    }

    pub fn div(&self, rhs: &Operand) -> Result<Operand, OperandError> {
        self.apply(ArithOp::Div, rhs)
    }

    pub fn rem(&self, rhs: &Operand) -> Result<Operand, OperandError> {
        self.apply(ArithOp::Mod, rhs)
    }
}

/// Canonical rendering: exact integers, shortest round-trip floats.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int8(v) => write!(f, "{v}"),
            Operand::Int16(v) => write!(f, "{v}"),
            Operand::Int32(v) => write!(f, "{v}"),
            Operand::Float(v) => write!(f, "{v}"),
            Operand::Double(v) => write!(f, "{v}"),
        }
    }
}

fn check_bounds(
    kind: OperandKind,
    value: f64,
    render: impl Fn() -> String,
) -> Result<(), OperandError> {
    // A float literal just above f32::MAX still rounds to f32::MAX, so
    // compare the rounded value.
    let value = match kind {
        OperandKind::Float => value as f32 as f64,
        _ => value,
    };
    // NaN fails both comparisons; treat it as overflow.
    if value.is_nan() || value > kind.max_value() {
        return Err(OperandError::Overflow {
            kind,
            value: render(),
        });
    }
    if value < kind.min_value() {
        return Err(OperandError::Underflow {
            kind,
            value: render(),
        });
    }
    Ok(())
}

/// Matches `[+-]?[0-9]+(\.[0-9]+)?`.
fn is_numeric_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(kind: OperandKind, text: &str) -> Operand {
        Operand::parse(kind, text).unwrap()
    }

    #[test]
    fn parse_each_kind() {
        assert_eq!(op(OperandKind::Int8, "-128"), Operand::Int8(-128));
        assert_eq!(op(OperandKind::Int16, "+300"), Operand::Int16(300));
        assert_eq!(op(OperandKind::Int32, "42"), Operand::Int32(42));
        assert_eq!(op(OperandKind::Float, "44.55"), Operand::Float(44.55));
        assert_eq!(op(OperandKind::Double, "42.42"), Operand::Double(42.42));
    }

    #[test]
    fn parse_bounds() {
        assert!(matches!(
            Operand::parse(OperandKind::Int8, "128"),
            Err(OperandError::Overflow { .. })
        ));
        assert!(matches!(
            Operand::parse(OperandKind::Int8, "-129"),
            Err(OperandError::Underflow { .. })
        ));
        assert!(matches!(
            Operand::parse(OperandKind::Int32, "99999999999999999999"),
            Err(OperandError::Overflow { .. })
        ));
        let huge = format!("1{}", "0".repeat(40));
        assert!(matches!(
            Operand::parse(OperandKind::Float, &huge),
            Err(OperandError::Overflow { .. })
        ));
        assert!(Operand::parse(OperandKind::Double, &huge).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for text in ["", "-", "+", "1.", ".5", "1.2.3", "0x10", "1e5", "abc", " 1"] {
            assert!(
                matches!(
                    Operand::parse(OperandKind::Double, text),
                    Err(OperandError::InvalidLiteral { .. })
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn integer_kinds_reject_fractional_text() {
        let err = Operand::parse(OperandKind::Int32, "3.9").unwrap_err();
        assert_eq!(
            err,
            OperandError::InvalidLiteral {
                kind: OperandKind::Int32,
                text: "3.9".to_string()
            }
        );
    }

    #[test]
    fn rendering() {
        assert_eq!(op(OperandKind::Int8, "-5").to_string(), "-5");
        assert_eq!(op(OperandKind::Float, "44.55").to_string(), "44.55");
        assert_eq!(op(OperandKind::Float, "3.0").to_string(), "3");
        assert_eq!(op(OperandKind::Double, "42.42").to_string(), "42.42");
        assert_eq!(op(OperandKind::Double, "0.1").to_string(), "0.1");
    }

    #[test]
    fn promotion_takes_higher_kind() {
        let a = op(OperandKind::Int32, "75");
        let b = op(OperandKind::Float, "44.55");
        let r = a.mul(&b).unwrap();
        assert_eq!(r.kind(), OperandKind::Float);
        assert_eq!(r.to_string(), "3341.25");

        let r = b.add(&op(OperandKind::Double, "1")).unwrap();
        assert_eq!(r.kind(), OperandKind::Double);
    }

    #[test]
    fn int8_overflow_and_underflow() {
        let max = op(OperandKind::Int8, "127");
        let min = op(OperandKind::Int8, "-128");
        let one = op(OperandKind::Int8, "1");
        assert!(matches!(max.add(&one), Err(OperandError::Overflow { .. })));
        assert!(matches!(min.sub(&one), Err(OperandError::Underflow { .. })));
    }

    #[test]
    fn double_arithmetic_overflow() {
        let max = Operand::Double(f64::MAX);
        assert!(matches!(max.mul(&max), Err(OperandError::Overflow { .. })));
        let min = Operand::Double(f64::MIN);
        assert!(matches!(
            min.mul(&Operand::Double(2.0)),
            Err(OperandError::Underflow { .. })
        ));
    }

    #[test]
    fn integer_division_truncates() {
        let a = op(OperandKind::Int32, "7");
        let b = op(OperandKind::Int32, "2");
        assert_eq!(a.div(&b).unwrap(), Operand::Int32(3));
        let a = op(OperandKind::Int32, "-7");
        assert_eq!(a.div(&b).unwrap(), Operand::Int32(-3));
    }

    #[test]
    fn modulo_follows_dividend_sign() {
        let a = op(OperandKind::Int16, "-7");
        let b = op(OperandKind::Int16, "3");
        assert_eq!(a.rem(&b).unwrap(), Operand::Int16(-1));
        let a = op(OperandKind::Double, "5.5");
        let b = op(OperandKind::Double, "2");
        assert_eq!(a.rem(&b).unwrap(), Operand::Double(1.5));
    }

    #[test]
    fn division_by_zero_checks_value_not_kind() {
        let five = op(OperandKind::Double, "5");
        for zero in [
            op(OperandKind::Int8, "0"),
            op(OperandKind::Float, "0.0"),
            op(OperandKind::Double, "-0.0"),
        ] {
            assert_eq!(five.div(&zero), Err(OperandError::DivisionByZero));
            assert_eq!(five.rem(&zero), Err(OperandError::DivisionByZero));
        }
    }

    #[test]
    fn zero_dividend_is_fine() {
        let zero = op(OperandKind::Int8, "0");
        let five = op(OperandKind::Int8, "5");
        assert_eq!(zero.div(&five).unwrap(), Operand::Int8(0));
    }

    #[test]
    fn from_wide_rejects_non_finite() {
        assert!(matches!(
            Operand::from_wide(OperandKind::Double, f64::INFINITY),
            Err(OperandError::Overflow { .. })
        ));
        assert!(matches!(
            Operand::from_wide(OperandKind::Double, f64::NEG_INFINITY),
            Err(OperandError::Underflow { .. })
        ));
        assert!(matches!(
            Operand::from_wide(OperandKind::Float, f64::NAN),
            Err(OperandError::Overflow { .. })
        ));
    }

    #[test]
    fn checked_rejects_non_finite_variants() {
        assert_eq!(Operand::Int8(-128).checked(), Ok(Operand::Int8(-128)));
        assert_eq!(Operand::Float(44.55).checked(), Ok(Operand::Float(44.55)));
        assert!(matches!(
            Operand::Float(f32::INFINITY).checked(),
            Err(OperandError::Overflow { .. })
        ));
        assert!(matches!(
            Operand::Double(f64::NAN).checked(),
            Err(OperandError::Overflow { .. })
        ));
        assert!(matches!(
            Operand::Double(f64::NEG_INFINITY).checked(),
            Err(OperandError::Underflow { .. })
        ));
    }

    #[test]
    fn numeric_literal_shapes() {
        assert!(is_numeric_literal("0"));
        assert!(is_numeric_literal("-12.50"));
        assert!(is_numeric_literal("+7"));
        assert!(!is_numeric_literal("--1"));
        assert!(!is_numeric_literal("1.-2"));
    }
}
