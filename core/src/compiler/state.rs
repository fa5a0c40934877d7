use smallvec::SmallVec;

use crate::api::Capacities;

use super::CompileError;

/// Indentation strings, indexed by depth.
pub(crate) const TABS: [&str; 9] = [
    "",
    "\t",
    "\t\t",
    "\t\t\t",
    "\t\t\t\t",
    "\t\t\t\t\t",
    "\t\t\t\t\t\t",
    "\t\t\t\t\t\t\t",
    "\t\t\t\t\t\t\t\t",
];

/// Indentation for `depth`, clamped to the deepest entry.
pub(crate) fn indent(depth: usize) -> &'static str {
    TABS[depth.min(TABS.len() - 1)]
}

/// Operands popped for one node, in the order they were pushed.
pub(crate) type Operands = SmallVec<[String; 4]>;

/// Mutable state of one compile call: the code stack and the indentation.
#[derive(Debug)]
pub struct CompilerState {
    code: Vec<String>,
    pub(crate) tabs: usize,
    capacities: Capacities,
}

impl CompilerState {
    pub fn new(capacities: Capacities) -> Self {
        Self {
            code: Vec::new(),
            tabs: 0,
            capacities,
        }
    }

    pub fn capacities(&self) -> &Capacities {
        &self.capacities
    }

    pub fn depth(&self) -> usize {
        self.code.len()
    }

    pub(crate) fn push(&mut self, fragment: String) {
        self.code.push(fragment);
    }

    /// Pop the `count` most recent fragments. An underflow is reported against
    /// `line` and leaves the stack untouched.
    pub(crate) fn pop_operands(&mut self, count: usize, line: u32) -> Result<Operands, CompileError> {
        if self.code.len() < count {
            return Err(CompileError::CorruptedStack { line });
        }
        let start = self.code.len() - count;
        Ok(self.code.drain(start..).collect())
    }

    /// Indentation at the current depth.
    pub(crate) fn indent(&self) -> &'static str {
        indent(self.tabs)
    }

    /// Indentation one level out, used for lines that open or close a brace.
    pub(crate) fn outer_indent(&self) -> &'static str {
        indent(self.tabs.saturating_sub(1))
    }

    pub(crate) fn into_fragments(self) -> Vec<String> {
        self.code
    }
}
