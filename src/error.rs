use miette::Diagnostic;
use thiserror::Error;

use enigma_core::compiler::CompileError;
use enigma_core::vm::ExecutionError;

/// Any failure from either execution path.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Execution(#[from] ExecutionError),
}

impl Error {
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Compile(err) => err.is_type_error(),
            Error::Execution(err) => err.is_type_error(),
        }
    }
}
