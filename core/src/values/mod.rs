//! Typed scalar values and the operators defined over them.

mod operators;
mod value;


pub use operators::{
    ArithOp, BinaryOp, BitwiseOp, CompareOp, ShiftOp, UnaryOp, eval_binary, eval_unary,
};
pub use value::Value;
