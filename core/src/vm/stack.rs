use core::fmt;

use smallvec::SmallVec;

use crate::types::NumericType;
use crate::values::Value;

/// Largest payload a single `PushData` may carry.
pub const MAX_PUSH_LEN: usize = 64;

/// A LIFO stack used for the interpreter's operand stack.
///
/// Reads go through [`Stack::top_n`] so that an opcode can inspect its
/// operands and fail without having popped anything.
#[derive(Clone, Default)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes and returns the top value, or `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop the top `n` values. Dropping more than the stack holds empties it.
    #[inline]
    pub fn pop_n(&mut self, n: usize) {
        let new_len = self.len().saturating_sub(n);
        self.items.truncate(new_len);
    }

    /// The top `n` values, bottom-most first, or `None` if fewer are present.
    #[inline]
    pub fn top_n(&self, n: usize) -> Option<&[T]> {
        let len = self.items.len();
        if n > len {
            None
        } else {
            Some(&self.items[len - n..])
        }
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

/// One interpreter stack slot: big-endian bytes plus the type they encode.
///
/// Elements pushed as raw data carry no type. They take on the type of
/// whatever reads them.
#[derive(Clone, PartialEq, Eq)]
pub struct StackElement {
    bytes: SmallVec<[u8; 8]>,
    ty: Option<NumericType>,
}

impl StackElement {
    pub fn typed(value: Value) -> Self {
        Self {
            bytes: SmallVec::from_vec(value.to_be_bytes()),
            ty: Some(value.ty()),
        }
    }

    pub fn raw(bytes: &[u8]) -> Self {
        Self {
            bytes: SmallVec::from_slice(bytes),
            ty: None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn ty(&self) -> Option<NumericType> {
        self.ty
    }

    /// The low-order bytes reinterpreted as `ty`.
    pub fn reinterpret(&self, ty: NumericType) -> Value {
        Value::from_be_bytes(ty, &self.bytes)
    }

    /// Read through the element's own type, falling back to `fallback` for
    /// raw data.
    pub fn value_or(&self, fallback: NumericType) -> Value {
        self.reinterpret(self.ty.unwrap_or(fallback))
    }

    /// A memory key: the low-order 4 bytes as an unsigned integer.
    pub fn key(&self) -> u32 {
        self.reinterpret(NumericType::U32).to_u32()
    }
}

impl fmt::Debug for StackElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for StackElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Some(ty) => write!(f, "{}({})", ty.name(), self.reinterpret(ty))?,
            None => write!(f, "raw")?,
        }
        write!(f, " 0x")?;
        for byte in self.bytes.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
