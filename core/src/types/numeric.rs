use core::fmt;

use super::TypeError;

/// One of the six scalar types an Enigma value can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl NumericType {
    pub const ALL: [NumericType; 6] = [
        NumericType::I32,
        NumericType::U32,
        NumericType::I64,
        NumericType::U64,
        NumericType::F32,
        NumericType::F64,
    ];

    pub const fn is_float(self) -> bool {
        matches!(self, NumericType::F32 | NumericType::F64)
    }

    pub const fn is_unsigned(self) -> bool {
        matches!(self, NumericType::U32 | NumericType::U64)
    }

    /// Width of the type in bits.
    pub const fn bits(self) -> u32 {
        match self {
            NumericType::I32 | NumericType::U32 | NumericType::F32 => 32,
            NumericType::I64 | NumericType::U64 | NumericType::F64 => 64,
        }
    }

    /// Width of the type in bytes.
    pub const fn size(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Source-level name, as written in Enigma declarations.
    pub const fn name(self) -> &'static str {
        match self {
            NumericType::I32 => "int",
            NumericType::U32 => "uint",
            NumericType::I64 => "long",
            NumericType::U64 => "ulong",
            NumericType::F32 => "float",
            NumericType::F64 => "double",
        }
    }

    /// Fails with a [`TypeError`] when `op` is applied to a floating point
    /// operand. Used by bitwise, shift, rotation and complement operators.
    pub fn require_integer(self, op: &'static str) -> Result<(), TypeError> {
        if self.is_float() {
            Err(TypeError::FloatOperand { op, ty: self })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the common type two operands are converted to before a binary
/// operator is applied.
///
/// The rules are evaluated in order:
///
/// 1. either operand is `F64` → `F64`
/// 2. either operand is `F32` → `F32`
/// 3. both operands have the same type → that type
/// 4. either operand is `U64` → `U64`
/// 5. `I64` with `I32` → `I64`
/// 6. `I64` with `U32` → `I64` (every `U32` fits losslessly)
/// 7. what remains is `U32` with `I32` → `U32`
pub fn promote(a: NumericType, b: NumericType) -> NumericType {
    use NumericType::*;

    match (a, b) {
        (F64, _) | (_, F64) => F64,
        (F32, _) | (_, F32) => F32,
        (a, b) if a == b => a,
        (U64, _) | (_, U64) => U64,
        (I64, I32) | (I32, I64) => I64,
        (I64, U32) | (U32, I64) => I64,
        _ => U32,
    }
}
