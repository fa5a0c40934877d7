//! Enigma - typed work packages for distributed computation
//!
//! # Overview
//!
//! Work packages arrive as parsed, type-resolved trees or as raw opcode
//! streams. This crate turns them into something a host can run:
//!
//! - [`compile`] lowers function trees into script text for a sandboxed
//!   engine, guarding every memory access against its declared capacity.
//! - [`run`] steps an opcode stream over typed memory arrays.
//!
//! # Quick Start
//!
//! ```
//! use enigma::ast::{AssignOp, BinOp, TreeBuilder};
//! use enigma::types::NumericType;
//! use enigma::{CompilationOptions, NeverStop};
//!
//! let mut b = TreeBuilder::new();
//! let x = b.register(NumericType::I32, 0);
//! let a = b.register(NumericType::I32, 1);
//! let c = b.register(NumericType::I32, 2);
//! let sum = b.binary(BinOp::Add, a, c);
//! let stmt = b.assign(AssignOp::Assign, x, sum);
//! b.statement(stmt);
//! let body = b.block(&[stmt]);
//! let verify = b.function("verify", body);
//! let tree = b.finish();
//!
//! let program = enigma::compile(&tree, &[verify], &CompilationOptions::default(), &NeverStop)?;
//! assert_eq!(program.source(), "function verify() {\n\ti[0] = (i[1]) + (i[2]);\n}\n");
//! # Ok::<(), enigma::Error>(())
//! ```
//!
//! # Interpreter
//!
//! ```
//! use enigma::vm::{Assembler, Opcode};
//! use enigma::{Capacities, ExecutionOptions, NeverStop};
//!
//! let code = Assembler::new()
//!     .push_u32(0)
//!     .push_u32(42)
//!     .op(Opcode::StoreUint)
//!     .finish();
//! let state = enigma::run(code, Capacities::default(), &ExecutionOptions::default(), &NeverStop)?;
//! assert_eq!(state.memory().array(enigma::MemoryClass::Uint)[0].to_u32(), 42);
//! # Ok::<(), enigma::Error>(())
//! ```

mod error;
mod error_renderer;

pub use error::Error;
pub use error_renderer::{render_error, render_error_to, render_error_to_string};

pub use enigma_core::api::{
    Capacities, CompilationOptions, ExecutionOptions, MemoryClass, NeverStop, RotateRightMode,
    StopSignal,
};
pub use enigma_core::compiler::{CompileError, CompiledProgram};
pub use enigma_core::vm::{ExecutionError, ProgramState};
pub use enigma_core::{ast, compiler, types, values, vm};

/// Compile the functions rooted at `roots` into script fragments.
pub fn compile(
    tree: &ast::Tree,
    roots: &[ast::NodeId],
    options: &CompilationOptions,
    stop: &impl StopSignal,
) -> Result<CompiledProgram, Error> {
    Ok(compiler::compile_program(tree, roots, options, stop)?)
}

/// Execute `code` against fresh, zeroed memory and return the final state.
pub fn run(
    code: impl Into<Vec<u8>>,
    capacities: Capacities,
    options: &ExecutionOptions,
    stop: &impl StopSignal,
) -> Result<ProgramState, Error> {
    let mut state = ProgramState::new(code, capacities);
    vm::execute(&mut state, options, stop)?;
    Ok(state)
}
