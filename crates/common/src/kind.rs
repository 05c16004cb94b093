//! Operand kinds and their precision ordering.

use std::fmt;

/// The numeric kind of an operand.
///
/// Variant order is the precision rank: `Int8 < Int16 < Int32 < Float <
/// Double`. Binary arithmetic produces the higher-ranked kind of its two
/// operands, so `Ord` is load-bearing.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperandKind {
    /// Signed 8-bit integer.
    Int8 = 0,
    /// Signed 16-bit integer.
    Int16 = 1,
    /// Signed 32-bit integer.
    Int32 = 2,
    /// IEEE 754 single precision.
    Float = 3,
    /// IEEE 754 double precision.
    Double = 4,
}

/// All operand kinds, in precision order.
pub const ALL_KINDS: [OperandKind; 5] = [
    OperandKind::Int8,
    OperandKind::Int16,
    OperandKind::Int32,
    OperandKind::Float,
    OperandKind::Double,
];

impl OperandKind {
    /// Returns the assembly keyword for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            OperandKind::Int8 => "int8",
            OperandKind::Int16 => "int16",
            OperandKind::Int32 => "int32",
            OperandKind::Float => "float",
            OperandKind::Double => "double",
        }
    }

    /// Looks up a kind by its assembly keyword. Case-sensitive.
    pub fn from_name(name: &str) -> Option<OperandKind> {
        ALL_KINDS.iter().find(|k| k.name() == name).copied()
    }

    /// Returns true for `Int8`, `Int16` and `Int32`.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            OperandKind::Int8 | OperandKind::Int16 | OperandKind::Int32
        )
    }

    /// Smallest representable value, widened to `f64`.
    pub fn min_value(&self) -> f64 {
        match self {
            OperandKind::Int8 => i8::MIN as f64,
            OperandKind::Int16 => i16::MIN as f64,
            OperandKind::Int32 => i32::MIN as f64,
            OperandKind::Float => f32::MIN as f64,
            OperandKind::Double => f64::MIN,
        }
    }

    /// Largest representable value, widened to `f64`.
    pub fn max_value(&self) -> f64 {
        match self {
            OperandKind::Int8 => i8::MAX as f64,
            OperandKind::Int16 => i16::MAX as f64,
            OperandKind::Int32 => i32::MAX as f64,
            OperandKind::Float => f32::MAX as f64,
            OperandKind::Double => f64::MAX,
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
