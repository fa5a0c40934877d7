//! Type errors shared by the compiler and the interpreter.

use miette::Diagnostic;
use thiserror::Error;

use super::NumericType;

/// An operator was applied to an operand type it does not support.
///
/// Type errors are always fatal, and they are reported separately from
/// structural (syntax) errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TypeError {
    #[error("cannot apply `{op}` to {ty}")]
    #[diagnostic(
        code(enigma::types::float_operand),
        help("bitwise, shift and rotation operators only accept integer operands")
    )]
    FloatOperand { op: &'static str, ty: NumericType },
}
