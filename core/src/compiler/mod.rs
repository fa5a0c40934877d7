//! Tree-to-script compiler.
//!
//! Converts function trees into fragments of script text for the sandbox
//! host. Each node is lowered once its operands are on the code stack, so the
//! fragments concatenate into a balanced program.
//!
//! ## Design
//!
//! - Iterative traversal over parent links (see `traverse`)
//! - One exhaustive match over node kinds (see `lower`)
//! - Every register reference is guarded against its array capacity

mod error;
mod lower;
mod prelude;
mod state;
mod traverse;


pub use error::CompileError;
pub use prelude::{CompiledProgram, EPILOGUE, PRELUDE, is_reserved};
pub use state::CompilerState;

use tracing::debug;

use crate::api::{CompilationOptions, StopSignal};
use crate::ast::{NodeId, Tree};

/// Compile the functions rooted at `roots`, in order.
///
/// Indentation carries over from one function to the next. The stop signal is
/// polled before every traversal step.
pub fn compile_program(
    tree: &Tree,
    roots: &[NodeId],
    options: &CompilationOptions,
    stop: &impl StopSignal,
) -> Result<CompiledProgram, CompileError> {
    if tree.is_empty() || roots.is_empty() {
        return Err(CompileError::EmptyTree);
    }
    debug!(functions = roots.len(), nodes = tree.len(), "compiling program");

    let mut state = CompilerState::new(options.capacities);
    for &root in roots {
        traverse::convert_function(&mut state, tree, root, stop)?;
    }
    Ok(CompiledProgram::new(state.into_fragments()))
}

/// Compile a single function.
pub fn compile_function(
    tree: &Tree,
    root: NodeId,
    options: &CompilationOptions,
    stop: &impl StopSignal,
) -> Result<CompiledProgram, CompileError> {
    compile_program(tree, &[root], options, stop)
}
