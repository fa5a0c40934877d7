use core::fmt;

use crate::types::NumericType;

/// A scalar value tagged with its [`NumericType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

/// Convert any value to a primitive with C cast semantics
/// (truncation, sign-extension, saturating float-to-int).
macro_rules! convert {
    ($value:expr, $target:ty) => {
        match $value {
            Value::I32(v) => v as $target,
            Value::U32(v) => v as $target,
            Value::I64(v) => v as $target,
            Value::U64(v) => v as $target,
            Value::F32(v) => v as $target,
            Value::F64(v) => v as $target,
        }
    };
}

impl Value {
    pub fn ty(self) -> NumericType {
        match self {
            Value::I32(_) => NumericType::I32,
            Value::U32(_) => NumericType::U32,
            Value::I64(_) => NumericType::I64,
            Value::U64(_) => NumericType::U64,
            Value::F32(_) => NumericType::F32,
            Value::F64(_) => NumericType::F64,
        }
    }

    pub fn zero(ty: NumericType) -> Value {
        Value::I32(0).cast(ty)
    }

    pub fn one(ty: NumericType) -> Value {
        Value::I32(1).cast(ty)
    }

    pub fn from_bool(ty: NumericType, flag: bool) -> Value {
        if flag { Value::one(ty) } else { Value::zero(ty) }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Value::I32(v) => v == 0,
            Value::U32(v) => v == 0,
            Value::I64(v) => v == 0,
            Value::U64(v) => v == 0,
            Value::F32(v) => v == 0.0,
            Value::F64(v) => v == 0.0,
        }
    }

    pub fn to_i32(self) -> i32 {
        convert!(self, i32)
    }

    pub fn to_u32(self) -> u32 {
        convert!(self, u32)
    }

    pub fn to_i64(self) -> i64 {
        convert!(self, i64)
    }

    pub fn to_u64(self) -> u64 {
        convert!(self, u64)
    }

    pub fn to_f32(self) -> f32 {
        convert!(self, f32)
    }

    pub fn to_f64(self) -> f64 {
        convert!(self, f64)
    }

    /// Convert to `ty` following C's conversion rules.
    pub fn cast(self, ty: NumericType) -> Value {
        match ty {
            NumericType::I32 => Value::I32(self.to_i32()),
            NumericType::U32 => Value::U32(self.to_u32()),
            NumericType::I64 => Value::I64(self.to_i64()),
            NumericType::U64 => Value::U64(self.to_u64()),
            NumericType::F32 => Value::F32(self.to_f32()),
            NumericType::F64 => Value::F64(self.to_f64()),
        }
    }

    /// Big-endian encoding, `ty().size()` bytes long.
    pub fn to_be_bytes(self) -> Vec<u8> {
        match self {
            Value::I32(v) => v.to_be_bytes().to_vec(),
            Value::U32(v) => v.to_be_bytes().to_vec(),
            Value::I64(v) => v.to_be_bytes().to_vec(),
            Value::U64(v) => v.to_be_bytes().to_vec(),
            Value::F32(v) => v.to_be_bytes().to_vec(),
            Value::F64(v) => v.to_be_bytes().to_vec(),
        }
    }

    /// Reinterpret the low-order bytes of a big-endian buffer as a value of
    /// type `ty`.
    ///
    /// Longer buffers are truncated to their last `ty.size()` bytes, shorter
    /// ones are zero-extended.
    pub fn from_be_bytes(ty: NumericType, bytes: &[u8]) -> Value {
        let size = ty.size();
        let low = &bytes[bytes.len().saturating_sub(size)..];
        let mut buf = [0u8; 8];
        buf[size - low.len()..size].copy_from_slice(low);

        let word = |n: usize| -> [u8; 4] { [buf[n], buf[n + 1], buf[n + 2], buf[n + 3]] };
        match ty {
            NumericType::I32 => Value::I32(i32::from_be_bytes(word(0))),
            NumericType::U32 => Value::U32(u32::from_be_bytes(word(0))),
            NumericType::F32 => Value::F32(f32::from_be_bytes(word(0))),
            NumericType::I64 => Value::I64(i64::from_be_bytes(buf)),
            NumericType::U64 => Value::U64(u64::from_be_bytes(buf)),
            NumericType::F64 => Value::F64(f64::from_be_bytes(buf)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
        }
    }
}
