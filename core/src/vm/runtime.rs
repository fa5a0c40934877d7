use tracing::{debug, trace};

use crate::api::{ExecutionOptions, MemoryClass, RotateRightMode, StopSignal};
use crate::types::NumericType;
use crate::values::{BinaryOp, ShiftOp, eval_binary, eval_unary};

use super::error::ExecutionError;
use super::opcode::Opcode;
use super::program::ProgramState;
use super::stack::{MAX_PUSH_LEN, StackElement};

/// Run `state` until it stops, checking `stop` before every opcode.
///
/// A fault aborts the run and leaves `state` as it was before the faulting
/// opcode.
pub fn execute(
    state: &mut ProgramState,
    options: &ExecutionOptions,
    stop: &impl StopSignal,
) -> Result<(), ExecutionError> {
    debug!(len = state.code.len(), "execute program");

    let mut steps = 0usize;
    while !state.stopped {
        if stop.should_stop() {
            debug!(ip = state.ip, steps, "execution interrupted");
            return Err(ExecutionError::Interrupted { ip: state.ip });
        }
        step(state, options)?;
        steps += 1;
    }

    debug!(ip = state.ip, steps, stack = state.stack.len(), "program stopped");
    if options.debug_dump {
        debug!("final state:\n{}", state.dump());
    }
    Ok(())
}

/// Execute the opcode at `state.ip`.
pub fn step(state: &mut ProgramState, options: &ExecutionOptions) -> Result<(), ExecutionError> {
    if state.stopped {
        return Ok(());
    }
    let ip = state.ip;
    let Some(&byte) = state.code.get(ip) else {
        state.stopped = true;
        return Ok(());
    };
    let opcode = Opcode::from_byte(byte).ok_or(ExecutionError::UnknownOpcode { opcode: byte, ip })?;

    let required = opcode.inputs();
    let found = state.stack.len();
    if found < required {
        return Err(ExecutionError::StackUnderflow { opcode, required, found, ip });
    }

    trace!(ip, %opcode, depth = found, "step");

    let mut next = ip + 1;
    match opcode {
        Opcode::Halt => state.stopped = true,
        Opcode::PushData => next = push_data(state, ip)?,
        Opcode::StoreInt => store(state, MemoryClass::Int),
        Opcode::StoreUint => store(state, MemoryClass::Uint),
        Opcode::StoreLong => store(state, MemoryClass::Long),
        Opcode::StoreUlong => store(state, MemoryClass::Ulong),
        Opcode::StoreFloat => store(state, MemoryClass::Float),
        Opcode::StoreDouble => store(state, MemoryClass::Double),
        Opcode::StoreStorage => store(state, MemoryClass::Storage),
        Opcode::LoadInt => load(state, MemoryClass::Int),
        Opcode::LoadUint => load(state, MemoryClass::Uint),
        Opcode::LoadLong => load(state, MemoryClass::Long),
        Opcode::LoadUlong => load(state, MemoryClass::Ulong),
        Opcode::LoadFloat => load(state, MemoryClass::Float),
        Opcode::LoadDouble => load(state, MemoryClass::Double),
        Opcode::LoadStorage => load(state, MemoryClass::Storage),
        Opcode::LoadM => load(state, MemoryClass::M),
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::Div
        | Opcode::Mod
        | Opcode::BitAnd
        | Opcode::BitOr
        | Opcode::BitXor
        | Opcode::Shl
        | Opcode::Shr
        | Opcode::Rotl
        | Opcode::Rotr
        | Opcode::Eq
        | Opcode::Ne
        | Opcode::Lt
        | Opcode::Gt
        | Opcode::Le
        | Opcode::Ge => binary(state, opcode, options, ip)?,
        Opcode::Compl | Opcode::Not | Opcode::Neg => unary(state, opcode, ip)?,
    }

    state.ip = next;
    if state.ip >= state.code.len() {
        state.stopped = true;
    }
    Ok(())
}

/// Push the immediate bytes following `ip`. Returns the offset after them.
fn push_data(state: &mut ProgramState, ip: usize) -> Result<usize, ExecutionError> {
    let length = *state.code.get(ip + 1).ok_or(ExecutionError::TruncatedPush { ip })? as usize;
    if !(1..=MAX_PUSH_LEN).contains(&length) {
        return Err(ExecutionError::InvalidPushLength { length, ip });
    }
    let start = ip + 2;
    let data = state
        .code
        .get(start..start + length)
        .ok_or(ExecutionError::TruncatedPush { ip })?;
    state.stack.push(StackElement::raw(data));
    Ok(start + length)
}

// [.., key, value] -> [..]
fn store(state: &mut ProgramState, class: MemoryClass) {
    let Some([key, value]) = state.stack.top_n(2) else {
        return;
    };
    let key = key.key();
    let value = value.reinterpret(class.element_type());
    state.stack.pop_n(2);
    state.memory.set(class, key, value);
}

// [.., key] -> [.., value]
fn load(state: &mut ProgramState, class: MemoryClass) {
    let Some(key) = state.stack.pop() else {
        return;
    };
    let value = state.memory.get(class, key.key());
    state.stack.push(StackElement::typed(value));
}

// [.., a, b] -> [.., a op b]
fn binary(
    state: &mut ProgramState,
    opcode: Opcode,
    options: &ExecutionOptions,
    ip: usize,
) -> Result<(), ExecutionError> {
    let op = match (opcode, options.rotate_right) {
        (Opcode::Rotr, RotateRightMode::ShiftLeft) => BinaryOp::Shift(ShiftOp::Shl),
        _ => opcode
            .binary_op()
            .ok_or(ExecutionError::UnknownOpcode { opcode: opcode.byte(), ip })?,
    };
    let Some([a, b]) = state.stack.top_n(2) else {
        return Ok(());
    };
    let left = a.value_or(b.ty().unwrap_or(NumericType::U64));
    let right = b.value_or(a.ty().unwrap_or(NumericType::U64));
    let result = eval_binary(op, left, right).map_err(|source| ExecutionError::Type { ip, source })?;

    state.stack.pop_n(2);
    state.stack.push(StackElement::typed(result));
    Ok(())
}

// [.., a] -> [.., op a]
fn unary(state: &mut ProgramState, opcode: Opcode, ip: usize) -> Result<(), ExecutionError> {
    let op = opcode
        .unary_op()
        .ok_or(ExecutionError::UnknownOpcode { opcode: opcode.byte(), ip })?;
    let Some(a) = state.stack.peek() else {
        return Ok(());
    };
    let result = eval_unary(op, a.value_or(NumericType::U64))
        .map_err(|source| ExecutionError::Type { ip, source })?;

    state.stack.pop();
    state.stack.push(StackElement::typed(result));
    Ok(())
}
