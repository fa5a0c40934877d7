//! Shared fixtures for the end-to-end tests.

use once_cell::sync::Lazy;

use enigma::ast::{AssignOp, NodeId, TreeBuilder};
use enigma::{Capacities, CompilationOptions};

/// Small arrays, so clamping shows up in golden output.
pub static SMALL: Lazy<CompilationOptions> = Lazy::new(|| CompilationOptions {
    capacities: Capacities::uniform(100),
});

/// `target op= value;`
#[allow(dead_code)]
pub fn assign(b: &mut TreeBuilder, op: AssignOp, target: NodeId, value: NodeId) -> NodeId {
    let id = b.assign(op, target, value);
    b.statement(id)
}

/// `function verify() { statements }`
#[allow(dead_code)]
pub fn verify(b: &mut TreeBuilder, statements: &[NodeId]) -> NodeId {
    let body = b.block(statements);
    b.function("verify", body)
}

/// Compile a single function built by `$build` and compare the generated
/// source against `source`, or match the error against `error`.
#[macro_export]
macro_rules! test_case {
    {
        name: $name:ident,
        tree: |$b:ident| $build:block,
        source: $expected:expr $(,)?
    } => {
        #[test]
        fn $name() {
            let mut $b = enigma::ast::TreeBuilder::new();
            let root: enigma::ast::NodeId = $build;
            let tree = $b.finish();
            let program = enigma::compile(&tree, &[root], &cases::SMALL, &enigma::NeverStop)
                .unwrap_or_else(|err| panic!("{}", enigma::render_error_to_string(&err)));
            pretty_assertions::assert_eq!(program.source(), $expected);
        }
    };
    {
        name: $name:ident,
        tree: |$b:ident| $build:block,
        error: $pattern:pat $(,)?
    } => {
        #[test]
        fn $name() {
            let mut $b = enigma::ast::TreeBuilder::new();
            let root: enigma::ast::NodeId = $build;
            let tree = $b.finish();
            let result = enigma::compile(&tree, &[root], &cases::SMALL, &enigma::NeverStop);
            assert!(matches!(result, Err($pattern)), "unexpected result: {result:?}");
        }
    };
}
