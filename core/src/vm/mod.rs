//! The stack interpreter for Enigma opcode streams.
//!
//! A [`ProgramState`] owns one execution. [`step`] runs a single opcode and
//! [`execute`] loops until the program stops or faults.

mod assembler;
mod error;
mod opcode;
mod program;
mod runtime;
mod stack;

#[cfg(test)]
mod runtime_test;

pub use assembler::Assembler;
pub use error::ExecutionError;
pub use opcode::Opcode;
pub use program::{Memory, MemoryDump, ProgramState};
pub use runtime::{execute, step};
pub use stack::{MAX_PUSH_LEN, Stack, StackElement};
