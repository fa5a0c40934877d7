//! Configuration options for compilation and execution.

use crate::types::NumericType;

/// One of the typed memory arrays shared by the compiled script and the
/// interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryClass {
    Int,
    Uint,
    Long,
    Ulong,
    Float,
    Double,
    /// Persistent storage, unsigned 32-bit.
    Storage,
    /// Read-only working memory, unsigned 32-bit.
    M,
}

impl MemoryClass {
    pub const ALL: [MemoryClass; 8] = [
        MemoryClass::Int,
        MemoryClass::Uint,
        MemoryClass::Long,
        MemoryClass::Ulong,
        MemoryClass::Float,
        MemoryClass::Double,
        MemoryClass::Storage,
        MemoryClass::M,
    ];

    pub const fn element_type(self) -> NumericType {
        match self {
            MemoryClass::Int => NumericType::I32,
            MemoryClass::Uint | MemoryClass::Storage | MemoryClass::M => NumericType::U32,
            MemoryClass::Long => NumericType::I64,
            MemoryClass::Ulong => NumericType::U64,
            MemoryClass::Float => NumericType::F32,
            MemoryClass::Double => NumericType::F64,
        }
    }

    /// Name of the array in the generated script.
    pub const fn prefix(self) -> &'static str {
        match self {
            MemoryClass::Int => "i",
            MemoryClass::Uint => "u",
            MemoryClass::Long => "l",
            MemoryClass::Ulong => "ul",
            MemoryClass::Float => "f",
            MemoryClass::Double => "d",
            MemoryClass::Storage => "s",
            MemoryClass::M => "m",
        }
    }

    /// The plain register array holding values of `ty`.
    pub const fn register(ty: NumericType) -> MemoryClass {
        match ty {
            NumericType::I32 => MemoryClass::Int,
            NumericType::U32 => MemoryClass::Uint,
            NumericType::I64 => MemoryClass::Long,
            NumericType::U64 => MemoryClass::Ulong,
            NumericType::F32 => MemoryClass::Float,
            NumericType::F64 => MemoryClass::Double,
        }
    }
}

/// Declared number of elements in each memory array.
///
/// References past the end of an array are redirected to index 0, both in
/// the generated script and in the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacities {
    pub ints: u32,
    pub uints: u32,
    pub longs: u32,
    pub ulongs: u32,
    pub floats: u32,
    pub doubles: u32,
    pub storage: u32,
    pub m: u32,
}

impl Capacities {
    /// Same capacity for every array except `m`, which keeps its default.
    pub const fn uniform(size: u32) -> Self {
        Self {
            ints: size,
            uints: size,
            longs: size,
            ulongs: size,
            floats: size,
            doubles: size,
            storage: size,
            m: 12,
        }
    }

    pub const fn of(&self, class: MemoryClass) -> u32 {
        match class {
            MemoryClass::Int => self.ints,
            MemoryClass::Uint => self.uints,
            MemoryClass::Long => self.longs,
            MemoryClass::Ulong => self.ulongs,
            MemoryClass::Float => self.floats,
            MemoryClass::Double => self.doubles,
            MemoryClass::Storage => self.storage,
            MemoryClass::M => self.m,
        }
    }

    /// Redirect an out-of-range index to 0.
    pub fn clamp(&self, class: MemoryClass, index: u64) -> u64 {
        if index >= u64::from(self.of(class)) { 0 } else { index }
    }
}

impl Default for Capacities {
    fn default() -> Self {
        Self::uniform(10_000)
    }
}

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use enigma_core::api::{Capacities, CompilationOptions};
///
/// let options = CompilationOptions {
///     capacities: Capacities::uniform(64),
/// };
/// assert_eq!(options.capacities.m, 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompilationOptions {
    /// Array sizes baked into the generated index guards.
    pub capacities: Capacities,
}

/// How the rotate-right opcode behaves in the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateRightMode {
    /// Legacy behaviour: the opcode shifts left. Kept as the default until the
    /// consensus semantics are settled.
    #[default]
    ShiftLeft,
    /// True rotation, matching the `rotr32`/`rotr64` host helpers.
    Rotate,
}

/// Configuration options for bytecode execution.
///
/// # Example
///
/// ```
/// use enigma_core::api::{ExecutionOptions, RotateRightMode};
///
/// let options = ExecutionOptions {
///     debug_dump: true,
///     rotate_right: RotateRightMode::Rotate,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Log the final stack and memory at debug level after the program stops.
    ///
    /// Default: false
    pub debug_dump: bool,

    /// Default: [`RotateRightMode::ShiftLeft`]
    pub rotate_right: RotateRightMode,
}
