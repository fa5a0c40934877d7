use super::opcode::Opcode;

/// Builds an opcode stream.
///
/// ```
/// use enigma_core::vm::{Assembler, Opcode};
///
/// let code = Assembler::new()
///     .push_u32(3)
///     .push_u32(4)
///     .op(Opcode::Add)
///     .finish();
/// assert_eq!(code[..2], [0x20, 4]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    code: Vec<u8>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, opcode: Opcode) -> Self {
        self.code.push(opcode.byte());
        self
    }

    /// Append a raw byte, which need not be a valid opcode.
    pub fn byte(mut self, byte: u8) -> Self {
        self.code.push(byte);
        self
    }

    /// `PushData` with `data.len()` as the length byte. Lengths outside
    /// `1..=64` are encoded as given (saturated to a byte) so hosts can build
    /// streams the interpreter rejects.
    pub fn push_data(mut self, data: &[u8]) -> Self {
        self.code.push(Opcode::PushData.byte());
        self.code.push(u8::try_from(data.len()).unwrap_or(u8::MAX));
        self.code.extend_from_slice(data);
        self
    }

    pub fn push_u32(self, value: u32) -> Self {
        self.push_data(&value.to_be_bytes())
    }

    pub fn push_u64(self, value: u64) -> Self {
        self.push_data(&value.to_be_bytes())
    }

    pub fn push_f64(self, value: f64) -> Self {
        self.push_data(&value.to_be_bytes())
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.code
    }
}
