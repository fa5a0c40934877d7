//! Options and host hooks shared by the compiler and the interpreter.

pub mod options;
pub mod stop;

#[cfg(test)]
mod options_test;

pub use options::{Capacities, CompilationOptions, ExecutionOptions, MemoryClass, RotateRightMode};
pub use stop::{NeverStop, StopSignal};
