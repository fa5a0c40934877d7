//! Binary and unary operator implementations.
//!
//! Every binary operator promotes both operands with [`promote`] before it is
//! applied. Integer arithmetic wraps on overflow, and division or modulo by
//! zero yields zero of the promoted type instead of trapping.

use crate::types::{NumericType, TypeError, promote};

use super::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
}

/// Shifts and rotations. The result keeps the type of the left operand and
/// the shift amount is taken modulo its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    Shl,
    /// Logical (zero-fill) shift, also for signed operands.
    Shr,
    Rotl,
    Rotr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Arith(ArithOp),
    Bitwise(BitwiseOp),
    Shift(ShiftOp),
    Compare(CompareOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Compl,
    Not,
    Neg,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Arith(ArithOp::Add) => "+",
            BinaryOp::Arith(ArithOp::Sub) => "-",
            BinaryOp::Arith(ArithOp::Mul) => "*",
            BinaryOp::Arith(ArithOp::Div) => "/",
            BinaryOp::Arith(ArithOp::Mod) => "%",
            BinaryOp::Bitwise(BitwiseOp::And) => "&",
            BinaryOp::Bitwise(BitwiseOp::Or) => "|",
            BinaryOp::Bitwise(BitwiseOp::Xor) => "^",
            BinaryOp::Shift(ShiftOp::Shl) => "<<",
            BinaryOp::Shift(ShiftOp::Shr) => ">>",
            BinaryOp::Shift(ShiftOp::Rotl) => "<<<",
            BinaryOp::Shift(ShiftOp::Rotr) => ">>>",
            BinaryOp::Compare(CompareOp::Eq) => "==",
            BinaryOp::Compare(CompareOp::Ne) => "!=",
            BinaryOp::Compare(CompareOp::Lt) => "<",
            BinaryOp::Compare(CompareOp::Gt) => ">",
            BinaryOp::Compare(CompareOp::Le) => "<=",
            BinaryOp::Compare(CompareOp::Ge) => ">=",
        }
    }

    /// Whether the operator is only defined for integer operands.
    pub const fn requires_integer(self) -> bool {
        matches!(self, BinaryOp::Bitwise(_) | BinaryOp::Shift(_))
    }

    /// The type the result of `left op right` has.
    pub fn result_type(self, left: NumericType, right: NumericType) -> NumericType {
        match self {
            BinaryOp::Arith(_) | BinaryOp::Bitwise(_) => promote(left, right),
            BinaryOp::Shift(_) => left,
            BinaryOp::Compare(_) => NumericType::I32,
        }
    }

    /// Check that the operator accepts the given operand types.
    ///
    /// Shifts only constrain the shifted word. The amount is read as an
    /// unsigned integer whatever its type.
    pub fn check(self, left: NumericType, right: NumericType) -> Result<NumericType, TypeError> {
        if let BinaryOp::Shift(_) = self {
            left.require_integer(self.symbol())?;
            return Ok(left);
        }
        let promoted = promote(left, right);
        if self.requires_integer() {
            promoted.require_integer(self.symbol())?;
        }
        Ok(promoted)
    }
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Compl => "~",
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

macro_rules! int_arith {
    ($op:expr, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        match $op {
            ArithOp::Add => a.wrapping_add(b),
            ArithOp::Sub => a.wrapping_sub(b),
            ArithOp::Mul => a.wrapping_mul(b),
            ArithOp::Div => if b == 0 { 0 } else { a.wrapping_div(b) },
            ArithOp::Mod => if b == 0 { 0 } else { a.wrapping_rem(b) },
        }
    }};
}

macro_rules! float_arith {
    ($op:expr, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        match $op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => if b == 0.0 { 0.0 } else { a / b },
            ArithOp::Mod => if b == 0.0 { 0.0 } else { a % b },
        }
    }};
}

macro_rules! bitwise {
    ($op:expr, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        match $op {
            BitwiseOp::And => a & b,
            BitwiseOp::Or => a | b,
            BitwiseOp::Xor => a ^ b,
        }
    }};
}

macro_rules! shift {
    ($op:expr, $v:expr, $n:expr, $unsigned:ty) => {{
        let (v, n) = ($v, $n);
        match $op {
            ShiftOp::Shl => v.wrapping_shl(n),
            ShiftOp::Shr => (v as $unsigned).wrapping_shr(n) as _,
            ShiftOp::Rotl => v.rotate_left(n),
            ShiftOp::Rotr => v.rotate_right(n),
        }
    }};
}

/// Evaluate `left op right`.
///
/// Fails only with a [`TypeError`], for integer-only operators applied to a
/// floating point operand.
pub fn eval_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, TypeError> {
    let ty = op.check(left.ty(), right.ty())?;
    let result = match op {
        BinaryOp::Arith(op) => arithmetic(op, ty, left, right),
        BinaryOp::Bitwise(op) => match ty {
            NumericType::I32 => Value::I32(bitwise!(op, left.to_i32(), right.to_i32())),
            NumericType::U32 => Value::U32(bitwise!(op, left.to_u32(), right.to_u32())),
            NumericType::I64 => Value::I64(bitwise!(op, left.to_i64(), right.to_i64())),
            NumericType::U64 => Value::U64(bitwise!(op, left.to_u64(), right.to_u64())),
            NumericType::F32 | NumericType::F64 => {
                return Err(TypeError::FloatOperand { op: BinaryOp::Bitwise(op).symbol(), ty });
            }
        },
        BinaryOp::Shift(op) => {
            let amount = right.to_u32();
            match left {
                Value::I32(v) => Value::I32(shift!(op, v, amount, u32)),
                Value::U32(v) => Value::U32(shift!(op, v, amount, u32)),
                Value::I64(v) => Value::I64(shift!(op, v, amount, u64)),
                Value::U64(v) => Value::U64(shift!(op, v, amount, u64)),
                Value::F32(_) | Value::F64(_) => {
                    return Err(TypeError::FloatOperand {
                        op: BinaryOp::Shift(op).symbol(),
                        ty: left.ty(),
                    });
                }
            }
        }
        BinaryOp::Compare(op) => Value::I32(compare(op, ty, left, right) as i32),
    };
    Ok(result)
}

fn arithmetic(op: ArithOp, ty: NumericType, left: Value, right: Value) -> Value {
    match ty {
        NumericType::I32 => Value::I32(int_arith!(op, left.to_i32(), right.to_i32())),
        NumericType::U32 => Value::U32(int_arith!(op, left.to_u32(), right.to_u32())),
        NumericType::I64 => Value::I64(int_arith!(op, left.to_i64(), right.to_i64())),
        NumericType::U64 => Value::U64(int_arith!(op, left.to_u64(), right.to_u64())),
        NumericType::F32 => Value::F32(float_arith!(op, left.to_f32(), right.to_f32())),
        NumericType::F64 => Value::F64(float_arith!(op, left.to_f64(), right.to_f64())),
    }
}

fn compare(op: CompareOp, ty: NumericType, left: Value, right: Value) -> bool {
    use core::cmp::Ordering;

    let ordering = match ty {
        NumericType::I32 => left.to_i32().partial_cmp(&right.to_i32()),
        NumericType::U32 => left.to_u32().partial_cmp(&right.to_u32()),
        NumericType::I64 => left.to_i64().partial_cmp(&right.to_i64()),
        NumericType::U64 => left.to_u64().partial_cmp(&right.to_u64()),
        NumericType::F32 => left.to_f32().partial_cmp(&right.to_f32()),
        NumericType::F64 => left.to_f64().partial_cmp(&right.to_f64()),
    };
    match op {
        CompareOp::Eq => ordering == Some(Ordering::Equal),
        CompareOp::Ne => ordering != Some(Ordering::Equal),
        CompareOp::Lt => ordering == Some(Ordering::Less),
        CompareOp::Gt => ordering == Some(Ordering::Greater),
        CompareOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        CompareOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
    }
}

/// Evaluate `op operand`. The result keeps the operand's type.
pub fn eval_unary(op: UnaryOp, operand: Value) -> Result<Value, TypeError> {
    let result = match op {
        UnaryOp::Not => Value::from_bool(operand.ty(), operand.is_zero()),
        UnaryOp::Neg => match operand {
            Value::I32(v) => Value::I32(v.wrapping_neg()),
            Value::U32(v) => Value::U32(v.wrapping_neg()),
            Value::I64(v) => Value::I64(v.wrapping_neg()),
            Value::U64(v) => Value::U64(v.wrapping_neg()),
            Value::F32(v) => Value::F32(-v),
            Value::F64(v) => Value::F64(-v),
        },
        UnaryOp::Compl => match operand {
            Value::I32(v) => Value::I32(!v),
            Value::U32(v) => Value::U32(!v),
            Value::I64(v) => Value::I64(!v),
            Value::U64(v) => Value::U64(!v),
            Value::F32(_) | Value::F64(_) => {
                return Err(TypeError::FloatOperand { op: op.symbol(), ty: operand.ty() });
            }
        },
    };
    Ok(result)
}
