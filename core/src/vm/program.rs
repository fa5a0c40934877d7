use core::fmt;

use crate::api::{Capacities, MemoryClass};
use crate::values::Value;

use super::stack::{Stack, StackElement};

/// The eight typed arrays an opcode stream reads and writes.
///
/// Every array is zero-initialized to its declared capacity. Keys past the
/// end address element 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    capacities: Capacities,
    arrays: [Vec<Value>; 8],
}

const fn slot(class: MemoryClass) -> usize {
    match class {
        MemoryClass::Int => 0,
        MemoryClass::Uint => 1,
        MemoryClass::Long => 2,
        MemoryClass::Ulong => 3,
        MemoryClass::Float => 4,
        MemoryClass::Double => 5,
        MemoryClass::Storage => 6,
        MemoryClass::M => 7,
    }
}

impl Memory {
    pub fn new(capacities: Capacities) -> Self {
        let arrays = MemoryClass::ALL.map(|class| {
            vec![Value::zero(class.element_type()); capacities.of(class) as usize]
        });
        Self { capacities, arrays }
    }

    pub fn capacities(&self) -> &Capacities {
        &self.capacities
    }

    pub fn array(&self, class: MemoryClass) -> &[Value] {
        &self.arrays[slot(class)]
    }

    /// Element at `key`, clamped. An array declared with zero capacity reads
    /// as zero.
    pub fn get(&self, class: MemoryClass, key: u32) -> Value {
        let index = self.capacities.clamp(class, u64::from(key)) as usize;
        self.array(class)
            .get(index)
            .copied()
            .unwrap_or(Value::zero(class.element_type()))
    }

    /// Write `value` at `key`, clamped. The value is converted to the array's
    /// element type; writes to a zero-capacity array are dropped.
    pub fn set(&mut self, class: MemoryClass, key: u32, value: Value) {
        let index = self.capacities.clamp(class, u64::from(key)) as usize;
        let value = value.cast(class.element_type());
        if let Some(slot) = self.arrays[slot(class)].get_mut(index) {
            *slot = value;
        }
    }
}

/// Everything one execution owns: the opcode stream, the instruction
/// pointer, the operand stack and the memory arrays.
#[derive(Debug, Clone)]
pub struct ProgramState {
    pub(crate) code: Vec<u8>,
    pub(crate) ip: usize,
    pub(crate) stack: Stack<StackElement>,
    pub(crate) memory: Memory,
    pub(crate) stopped: bool,
}

impl ProgramState {
    pub fn new(code: impl Into<Vec<u8>>, capacities: Capacities) -> Self {
        let code = code.into();
        Self {
            stopped: code.is_empty(),
            code,
            ip: 0,
            stack: Stack::new(),
            memory: Memory::new(capacities),
        }
    }

    /// Seed the read-only `m` array. Values past its capacity are ignored.
    pub fn with_m(mut self, values: &[u32]) -> Self {
        let m = &mut self.memory.arrays[slot(MemoryClass::M)];
        for (slot, value) in m.iter_mut().zip(values) {
            *slot = Value::U32(*value);
        }
        self
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn stack(&self) -> &Stack<StackElement> {
        &self.stack
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn dump(&self) -> MemoryDump<'_> {
        MemoryDump { state: self }
    }
}

/// Human-readable snapshot of a [`ProgramState`]. Only non-zero array
/// elements are listed.
pub struct MemoryDump<'a> {
    state: &'a ProgramState,
}

impl fmt::Display for MemoryDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        writeln!(f, "ip: {}/{}", state.ip, state.code.len())?;
        writeln!(f, "stack ({}):", state.stack.len())?;
        for (depth, element) in state.stack.iter().rev().enumerate() {
            writeln!(f, "  [{depth}] {element}")?;
        }
        for class in MemoryClass::ALL {
            let used: Vec<_> = state
                .memory
                .array(class)
                .iter()
                .enumerate()
                .filter(|(_, value)| !value.is_zero())
                .collect();
            if used.is_empty() {
                continue;
            }
            write!(f, "{}:", class.prefix())?;
            for (index, value) in used {
                write!(f, " [{index}]={value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Capacities {
        Capacities { m: 2, ..Capacities::uniform(4) }
    }

    #[test]
    fn test_memory_starts_zeroed() {
        let memory = Memory::new(small());
        assert_eq!(memory.array(MemoryClass::Double), &[Value::F64(0.0); 4]);
        assert_eq!(memory.array(MemoryClass::M).len(), 2);
    }

    #[test]
    fn test_out_of_range_key_addresses_zero() {
        let mut memory = Memory::new(small());
        memory.set(MemoryClass::Int, 9, Value::I32(5));
        assert_eq!(memory.get(MemoryClass::Int, 0), Value::I32(5));
        assert_eq!(memory.get(MemoryClass::Int, u32::MAX), Value::I32(5));
    }

    #[test]
    fn test_zero_capacity_array() {
        let mut memory = Memory::new(Capacities { ints: 0, ..small() });
        memory.set(MemoryClass::Int, 0, Value::I32(5));
        assert_eq!(memory.get(MemoryClass::Int, 0), Value::I32(0));
    }

    #[test]
    fn test_with_m() {
        let state = ProgramState::new(vec![0x00], small()).with_m(&[7, 8, 9]);
        assert_eq!(state.memory().array(MemoryClass::M), &[Value::U32(7), Value::U32(8)]);
        assert!(!state.is_stopped());
        assert!(ProgramState::new(Vec::new(), small()).is_stopped());
    }

    #[test]
    fn test_dump_lists_used_elements() {
        let mut state = ProgramState::new(vec![0x00], small());
        state.memory.set(MemoryClass::Uint, 2, Value::U32(42));
        state.stack.push(StackElement::typed(Value::I32(1)));
        assert_eq!(
            state.dump().to_string(),
            "ip: 0/1\nstack (1):\n  [0] int(1) 0x00000001\nu: [2]=42\n"
        );
    }
}
