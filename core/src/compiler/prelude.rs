//! Host bindings around the generated code.

use std::collections::HashSet;

use lazy_static::lazy_static;

use super::CompileError;

/// Globals and helpers the generated code expects to find.
pub const PRELUDE: &str = "var pow_found = 0;\n\
var bounty_found = 0;\n\
function rotr32(word, shift) {\n  return word << 32 - shift | word >>> shift;\n}\n\
function rotl32(word, shift) {\n  return word << shift | word >>> 32 - shift;\n}\n";

/// Runs the entry point and hands both result flags back to the host.
pub const EPILOGUE: &str = " verify(); function res(){ return [pow_found, bounty_found]; } res();";

lazy_static! {
    static ref RESERVED: HashSet<&'static str> = [
        // Memory arrays.
        "i", "u", "l", "ul", "f", "d", "s", "m",
        // Host bindings.
        "verify_pow", "target", "pow_found", "bounty_found", "ExposedToRhino", "Math",
        "rotl32", "rotr32", "rotl64", "rotr64", "gcd", "res",
        // Script keywords.
        "break", "case", "catch", "continue", "default", "delete", "do", "else",
        "false", "finally", "for", "function", "if", "in", "instanceof", "new",
        "null", "return", "switch", "this", "throw", "true", "try", "typeof",
        "var", "void", "while", "with",
    ]
    .into_iter()
    .collect();
}

/// Loop counters are named `loop<token>`.
fn is_loop_counter(name: &str) -> bool {
    name.strip_prefix("loop")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name) || is_loop_counter(name)
}

pub(crate) fn check_identifier(name: &str, line: u32) -> Result<(), CompileError> {
    if is_reserved(name) {
        return Err(CompileError::ReservedName {
            name: name.to_string(),
            line,
        });
    }
    Ok(())
}

/// Output of a successful compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProgram {
    fragments: Vec<String>,
}

impl CompiledProgram {
    pub(crate) fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    /// Fragments in emission order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }

    /// The generated functions, without host glue.
    pub fn source(&self) -> String {
        self.fragments.concat()
    }

    /// A complete script: prelude, generated functions, entry call.
    pub fn assemble(&self) -> String {
        format!("{PRELUDE}\n{}{EPILOGUE}", self.source())
    }
}
