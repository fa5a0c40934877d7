//! Enigma opcodes - one byte each.
//!
//! # Encoding
//!
//! ```text
//! 0x00        Halt
//! 0x01..0x07  typed stores      [..., key, value] -> [...]
//! 0x11..0x18  typed loads       [..., key]        -> [..., value]
//! 0x20        PushData n bytes  [...]             -> [..., raw]
//! 0x30..0x3B  arithmetic, bitwise, shifts and rotations
//! 0x40..0x45  comparisons
//! 0x48..0x4A  unary operators
//! ```
//!
//! `PushData` is followed by a length byte in `1..=64` and then the data
//! itself. Every other opcode is a single byte.

use core::fmt;

use crate::api::MemoryClass;
use crate::values::{ArithOp, BinaryOp, BitwiseOp, CompareOp, ShiftOp, UnaryOp};

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Opcode {
    /// Stop execution. Having Halt at 0x00 makes zeroed memory stop the
    /// program instead of running garbage.
    Halt = 0x00,

    StoreInt = 0x01,
    StoreUint = 0x02,
    StoreLong = 0x03,
    StoreUlong = 0x04,
    StoreFloat = 0x05,
    StoreDouble = 0x06,
    StoreStorage = 0x07,

    LoadInt = 0x11,
    LoadUint = 0x12,
    LoadLong = 0x13,
    LoadUlong = 0x14,
    LoadFloat = 0x15,
    LoadDouble = 0x16,
    LoadStorage = 0x17,
    /// `m` is read-only, so there is no matching store.
    LoadM = 0x18,

    PushData = 0x20,

    Add = 0x30,
    Sub = 0x31,
    Mul = 0x32,
    Div = 0x33,
    Mod = 0x34,
    BitAnd = 0x35,
    BitOr = 0x36,
    BitXor = 0x37,
    Shl = 0x38,
    Shr = 0x39,
    Rotl = 0x3A,
    Rotr = 0x3B,

    Eq = 0x40,
    Ne = 0x41,
    Lt = 0x42,
    Gt = 0x43,
    Le = 0x44,
    Ge = 0x45,

    Compl = 0x48,
    Not = 0x49,
    Neg = 0x4A,
}

static_assertions::assert_eq_size!(Opcode, u8);

impl Opcode {
    /// Every opcode, in byte order.
    pub const ALL: [Opcode; 38] = [
        Opcode::Halt,
        Opcode::StoreInt,
        Opcode::StoreUint,
        Opcode::StoreLong,
        Opcode::StoreUlong,
        Opcode::StoreFloat,
        Opcode::StoreDouble,
        Opcode::StoreStorage,
        Opcode::LoadInt,
        Opcode::LoadUint,
        Opcode::LoadLong,
        Opcode::LoadUlong,
        Opcode::LoadFloat,
        Opcode::LoadDouble,
        Opcode::LoadStorage,
        Opcode::LoadM,
        Opcode::PushData,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::BitAnd,
        Opcode::BitOr,
        Opcode::BitXor,
        Opcode::Shl,
        Opcode::Shr,
        Opcode::Rotl,
        Opcode::Rotr,
        Opcode::Eq,
        Opcode::Ne,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Le,
        Opcode::Ge,
        Opcode::Compl,
        Opcode::Not,
        Opcode::Neg,
    ];

    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Self::ALL.into_iter().find(|op| op.byte() == byte)
    }

    /// Number of stack elements the opcode consumes.
    pub const fn inputs(self) -> usize {
        match self {
            Opcode::Halt | Opcode::PushData => 0,
            Opcode::StoreInt
            | Opcode::StoreUint
            | Opcode::StoreLong
            | Opcode::StoreUlong
            | Opcode::StoreFloat
            | Opcode::StoreDouble
            | Opcode::StoreStorage => 2,
            Opcode::LoadInt
            | Opcode::LoadUint
            | Opcode::LoadLong
            | Opcode::LoadUlong
            | Opcode::LoadFloat
            | Opcode::LoadDouble
            | Opcode::LoadStorage
            | Opcode::LoadM => 1,
            Opcode::Compl | Opcode::Not | Opcode::Neg => 1,
            _ => 2,
        }
    }

    /// Target array of a store.
    pub const fn store_target(self) -> Option<MemoryClass> {
        match self {
            Opcode::StoreInt => Some(MemoryClass::Int),
            Opcode::StoreUint => Some(MemoryClass::Uint),
            Opcode::StoreLong => Some(MemoryClass::Long),
            Opcode::StoreUlong => Some(MemoryClass::Ulong),
            Opcode::StoreFloat => Some(MemoryClass::Float),
            Opcode::StoreDouble => Some(MemoryClass::Double),
            Opcode::StoreStorage => Some(MemoryClass::Storage),
            _ => None,
        }
    }

    /// Source array of a load.
    pub const fn load_source(self) -> Option<MemoryClass> {
        match self {
            Opcode::LoadInt => Some(MemoryClass::Int),
            Opcode::LoadUint => Some(MemoryClass::Uint),
            Opcode::LoadLong => Some(MemoryClass::Long),
            Opcode::LoadUlong => Some(MemoryClass::Ulong),
            Opcode::LoadFloat => Some(MemoryClass::Float),
            Opcode::LoadDouble => Some(MemoryClass::Double),
            Opcode::LoadStorage => Some(MemoryClass::Storage),
            Opcode::LoadM => Some(MemoryClass::M),
            _ => None,
        }
    }

    pub const fn binary_op(self) -> Option<BinaryOp> {
        let op = match self {
            Opcode::Add => BinaryOp::Arith(ArithOp::Add),
            Opcode::Sub => BinaryOp::Arith(ArithOp::Sub),
            Opcode::Mul => BinaryOp::Arith(ArithOp::Mul),
            Opcode::Div => BinaryOp::Arith(ArithOp::Div),
            Opcode::Mod => BinaryOp::Arith(ArithOp::Mod),
            Opcode::BitAnd => BinaryOp::Bitwise(BitwiseOp::And),
            Opcode::BitOr => BinaryOp::Bitwise(BitwiseOp::Or),
            Opcode::BitXor => BinaryOp::Bitwise(BitwiseOp::Xor),
            Opcode::Shl => BinaryOp::Shift(ShiftOp::Shl),
            Opcode::Shr => BinaryOp::Shift(ShiftOp::Shr),
            Opcode::Rotl => BinaryOp::Shift(ShiftOp::Rotl),
            Opcode::Rotr => BinaryOp::Shift(ShiftOp::Rotr),
            Opcode::Eq => BinaryOp::Compare(CompareOp::Eq),
            Opcode::Ne => BinaryOp::Compare(CompareOp::Ne),
            Opcode::Lt => BinaryOp::Compare(CompareOp::Lt),
            Opcode::Gt => BinaryOp::Compare(CompareOp::Gt),
            Opcode::Le => BinaryOp::Compare(CompareOp::Le),
            Opcode::Ge => BinaryOp::Compare(CompareOp::Ge),
            _ => return None,
        };
        Some(op)
    }

    pub const fn unary_op(self) -> Option<UnaryOp> {
        match self {
            Opcode::Compl => Some(UnaryOp::Compl),
            Opcode::Not => Some(UnaryOp::Not),
            Opcode::Neg => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Halt => "halt",
            Opcode::StoreInt => "store.i",
            Opcode::StoreUint => "store.u",
            Opcode::StoreLong => "store.l",
            Opcode::StoreUlong => "store.ul",
            Opcode::StoreFloat => "store.f",
            Opcode::StoreDouble => "store.d",
            Opcode::StoreStorage => "store.s",
            Opcode::LoadInt => "load.i",
            Opcode::LoadUint => "load.u",
            Opcode::LoadLong => "load.l",
            Opcode::LoadUlong => "load.ul",
            Opcode::LoadFloat => "load.f",
            Opcode::LoadDouble => "load.d",
            Opcode::LoadStorage => "load.s",
            Opcode::LoadM => "load.m",
            Opcode::PushData => "pushdata",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::BitAnd => "and",
            Opcode::BitOr => "or",
            Opcode::BitXor => "xor",
            Opcode::Shl => "shl",
            Opcode::Shr => "shr",
            Opcode::Rotl => "rotl",
            Opcode::Rotr => "rotr",
            Opcode::Eq => "eq",
            Opcode::Ne => "ne",
            Opcode::Lt => "lt",
            Opcode::Gt => "gt",
            Opcode::Le => "le",
            Opcode::Ge => "ge",
            Opcode::Compl => "compl",
            Opcode::Not => "not",
            Opcode::Neg => "neg",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::from_byte(byte).ok_or(byte)
    }
}
