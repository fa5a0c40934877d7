//! Compilation errors.

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::NodeId;
use crate::types::TypeError;

/// Errors raised while converting a tree to script text.
///
/// Every variant is fatal: a failed compile returns no fragments.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CompileError {
    #[error("unable to convert an empty tree")]
    #[diagnostic(code(enigma::compile::empty_tree))]
    EmptyTree,

    #[error("node {node} does not belong to the tree")]
    #[diagnostic(code(enigma::compile::unknown_node))]
    UnknownNode { node: NodeId },

    #[error("corrupted code stack at line {line}")]
    #[diagnostic(
        code(enigma::compile::corrupted_stack),
        help("a node consumed more operands than its children produced")
    )]
    CorruptedStack { line: u32 },

    #[error("invalid variable at line {line}")]
    #[diagnostic(
        code(enigma::compile::invalid_variable),
        help("register references need a declared type")
    )]
    InvalidVariable { line: u32 },

    #[error("function `{name}` has no body (line {line})")]
    #[diagnostic(code(enigma::compile::missing_body))]
    MissingBody { name: String, line: u32 },

    #[error("`{name}` is reserved by the host environment (line {line})")]
    #[diagnostic(
        code(enigma::compile::reserved_name),
        help("rename the function so it does not shadow a host binding")
    )]
    ReservedName { name: String, line: u32 },

    #[error("type error at line {line}")]
    #[diagnostic(code(enigma::compile::type_error))]
    Type {
        line: u32,
        #[source]
        source: TypeError,
    },

    #[error("compilation interrupted")]
    #[diagnostic(code(enigma::compile::interrupted))]
    Interrupted,
}

impl CompileError {
    /// Type errors form their own category, separate from malformed trees.
    pub fn is_type_error(&self) -> bool {
        matches!(self, CompileError::Type { .. })
    }
}
