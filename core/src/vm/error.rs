//! Interpreter errors.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::TypeError;

use super::opcode::Opcode;

/// Errors raised while stepping an opcode stream.
///
/// `ip` is the offset of the opcode that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExecutionError {
    #[error("unknown opcode 0x{opcode:02x} at {ip}")]
    #[diagnostic(code(enigma::vm::unknown_opcode))]
    UnknownOpcode { opcode: u8, ip: usize },

    #[error("stack underflow at {ip}: `{opcode}` needs {required} inputs, found {found}")]
    #[diagnostic(code(enigma::vm::stack_underflow))]
    StackUnderflow {
        opcode: Opcode,
        required: usize,
        found: usize,
        ip: usize,
    },

    #[error("invalid push length {length} at {ip}")]
    #[diagnostic(
        code(enigma::vm::invalid_push_length),
        help("push between 1 and 64 bytes")
    )]
    InvalidPushLength { length: usize, ip: usize },

    #[error("push data at {ip} runs past the end of the program")]
    #[diagnostic(code(enigma::vm::truncated_push))]
    TruncatedPush { ip: usize },

    #[error("type error at {ip}")]
    #[diagnostic(code(enigma::vm::type_error))]
    Type {
        ip: usize,
        #[source]
        source: TypeError,
    },

    #[error("execution interrupted at {ip}")]
    #[diagnostic(code(enigma::vm::interrupted))]
    Interrupted { ip: usize },
}

impl ExecutionError {
    pub fn is_type_error(&self) -> bool {
        matches!(self, ExecutionError::Type { .. })
    }
}
