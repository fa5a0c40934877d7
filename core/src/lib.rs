//! Core of the Enigma work-package language.
//!
//! Two execution paths share one type lattice and one memory model:
//!
//! - [`compiler`] lowers a parsed [`ast::Tree`] to script fragments for a
//!   sandboxed host engine.
//! - [`vm`] steps a raw opcode stream over typed memory arrays.

pub mod api;
pub mod ast;
pub mod compiler;
pub mod types;
pub mod values;
pub mod vm;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_repeat_indentation() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
