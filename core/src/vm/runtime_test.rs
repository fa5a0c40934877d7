use std::sync::atomic::AtomicBool;

use crate::api::{Capacities, ExecutionOptions, MemoryClass, NeverStop, RotateRightMode};
use crate::test_utils::init_test_logging;
use crate::values::Value;

use super::{Assembler, ExecutionError, Opcode, ProgramState, StackElement, execute};

fn run(code: Vec<u8>) -> (ProgramState, Result<(), ExecutionError>) {
    run_with(code, &ExecutionOptions::default())
}

fn run_with(code: Vec<u8>, options: &ExecutionOptions) -> (ProgramState, Result<(), ExecutionError>) {
    let mut state = ProgramState::new(code, Capacities::uniform(16));
    let result = execute(&mut state, options, &NeverStop);
    (state, result)
}

fn top(state: &ProgramState) -> Option<Value> {
    let element = state.stack().peek()?;
    element.ty().map(|ty| element.reinterpret(ty))
}

#[test]
fn test_push_data_lengths() {
    for length in 1..=64 {
        let data = vec![0xAB; length];
        let (state, result) = run(Assembler::new().push_data(&data).finish());
        assert_eq!(result, Ok(()));
        assert_eq!(state.stack().len(), 1);
        assert_eq!(state.stack().peek().map(StackElement::len), Some(length));
        assert!(state.is_stopped());
    }
}

#[test]
fn test_push_65_bytes_fails() {
    let (state, result) = run(Assembler::new().push_data(&[0; 65]).finish());
    assert_eq!(result, Err(ExecutionError::InvalidPushLength { length: 65, ip: 0 }));
    assert!(state.stack().is_empty());
}

#[test]
fn test_push_zero_bytes_fails() {
    let (_, result) = run(vec![Opcode::PushData.byte(), 0]);
    assert_eq!(result, Err(ExecutionError::InvalidPushLength { length: 0, ip: 0 }));
}

#[test]
fn test_truncated_push() {
    let (_, result) = run(vec![Opcode::PushData.byte(), 4, 1, 2]);
    assert_eq!(result, Err(ExecutionError::TruncatedPush { ip: 0 }));

    let (_, result) = run(vec![Opcode::PushData.byte()]);
    assert_eq!(result, Err(ExecutionError::TruncatedPush { ip: 0 }));
}

#[test]
fn test_underflow_has_no_side_effect() {
    let code = Assembler::new().push_u32(3).op(Opcode::StoreInt).finish();
    let (state, result) = run(code);
    assert_eq!(
        result,
        Err(ExecutionError::StackUnderflow {
            opcode: Opcode::StoreInt,
            required: 2,
            found: 1,
            ip: 6,
        })
    );
    assert_eq!(state.stack().len(), 1);
    assert_eq!(state.ip(), 6);
    assert!(state.memory().array(MemoryClass::Int).iter().all(|v| v.is_zero()));
}

#[test]
fn test_store_then_load() {
    let code = Assembler::new()
        .push_u32(5)
        .push_u32(42)
        .op(Opcode::StoreUint)
        .push_u32(5)
        .op(Opcode::LoadUint)
        .finish();
    let (state, result) = run(code);
    assert_eq!(result, Ok(()));
    assert_eq!(state.memory().get(MemoryClass::Uint, 5), Value::U32(42));
    assert_eq!(top(&state), Some(Value::U32(42)));
}

#[test]
fn test_store_key_is_truncated_then_clamped() {
    let code = Assembler::new()
        .push_u64(0x1_0000_0003)
        .push_u32(7)
        .op(Opcode::StoreInt)
        .push_u32(16)
        .push_u32(9)
        .op(Opcode::StoreInt)
        .finish();
    let (state, result) = run(code);
    assert_eq!(result, Ok(()));
    assert_eq!(state.memory().get(MemoryClass::Int, 3), Value::I32(7));
    assert_eq!(state.memory().get(MemoryClass::Int, 0), Value::I32(9));
}

#[test]
fn test_store_reinterprets_raw_bytes() {
    let code = Assembler::new()
        .push_u32(0)
        .push_f64(1.5)
        .op(Opcode::StoreDouble)
        .push_u32(1)
        .push_u32(0xFFFF_FFFE)
        .op(Opcode::StoreInt)
        .push_u32(2)
        .push_u64(0xDEAD_BEEF_0000_0011)
        .op(Opcode::StoreStorage)
        .finish();
    let (state, result) = run(code);
    assert_eq!(result, Ok(()));
    assert_eq!(state.memory().get(MemoryClass::Double, 0), Value::F64(1.5));
    assert_eq!(state.memory().get(MemoryClass::Int, 1), Value::I32(-2));
    assert_eq!(state.memory().get(MemoryClass::Storage, 2), Value::U32(0x11));
}

#[test]
fn test_load_m() {
    let code = Assembler::new().push_u32(1).op(Opcode::LoadM).finish();
    let mut state = ProgramState::new(code, Capacities::default()).with_m(&[10, 20, 30]);
    assert_eq!(execute(&mut state, &ExecutionOptions::default(), &NeverStop), Ok(()));
    assert_eq!(top(&state), Some(Value::U32(20)));
}

#[test]
fn test_raw_operand_adopts_typed_operand() {
    let code = Assembler::new()
        .push_u32(0)
        .push_u32(0xFFFF_FFFE)
        .op(Opcode::StoreInt)
        .push_u32(0)
        .op(Opcode::LoadInt)
        .push_u32(3)
        .op(Opcode::Add)
        .finish();
    let (state, result) = run(code);
    assert_eq!(result, Ok(()));
    assert_eq!(top(&state), Some(Value::I32(1)));
}

#[test]
fn test_raw_operands_read_as_ulong() {
    let code = Assembler::new().push_u32(1).push_u32(2).op(Opcode::Sub).finish();
    let (state, result) = run(code);
    assert_eq!(result, Ok(()));
    assert_eq!(top(&state), Some(Value::U64(u64::MAX)));
}

#[test]
fn test_compare_pushes_int() {
    let code = Assembler::new().push_u32(1).push_u32(2).op(Opcode::Lt).finish();
    let (state, _) = run(code);
    assert_eq!(top(&state), Some(Value::I32(1)));
}

#[test]
fn test_division_by_zero_yields_zero() {
    for opcode in [Opcode::Div, Opcode::Mod] {
        let code = Assembler::new().push_u32(7).push_u32(0).op(opcode).finish();
        let (state, result) = run(code);
        assert_eq!(result, Ok(()));
        assert_eq!(top(&state), Some(Value::U64(0)));
    }
}

fn rotate_right_one(mode: RotateRightMode) -> Option<Value> {
    let code = Assembler::new()
        .push_u32(0)
        .push_u32(1)
        .op(Opcode::StoreUint)
        .push_u32(0)
        .op(Opcode::LoadUint)
        .push_u32(1)
        .op(Opcode::Rotr)
        .finish();
    let options = ExecutionOptions { rotate_right: mode, ..Default::default() };
    let (state, result) = run_with(code, &options);
    assert_eq!(result, Ok(()));
    top(&state)
}

#[test]
fn test_rotate_right_modes() {
    assert_eq!(rotate_right_one(RotateRightMode::ShiftLeft), Some(Value::U32(2)));
    assert_eq!(rotate_right_one(RotateRightMode::Rotate), Some(Value::U32(0x8000_0000)));
}

#[test]
fn test_rotate_left() {
    let code = Assembler::new()
        .push_u32(0)
        .op(Opcode::LoadUint)
        .op(Opcode::Not)
        .push_u32(31)
        .op(Opcode::Rotl)
        .finish();
    let (state, result) = run(code);
    assert_eq!(result, Ok(()));
    assert_eq!(top(&state), Some(Value::U32(0x8000_0000)));
}

#[test]
fn test_bitwise_on_double_is_type_error() {
    let code = Assembler::new()
        .push_u32(0)
        .op(Opcode::LoadDouble)
        .push_u32(1)
        .op(Opcode::BitAnd)
        .finish();
    let (state, result) = run(code);
    let err = result.unwrap_err();
    assert!(err.is_type_error());
    assert!(matches!(err, ExecutionError::Type { ip: 13, .. }));
    assert_eq!(state.stack().len(), 2);
}

#[test]
fn test_complement_of_float_is_type_error() {
    let code = Assembler::new().push_u32(0).op(Opcode::LoadFloat).op(Opcode::Compl).finish();
    let (_, result) = run(code);
    assert!(result.is_err_and(|err| err.is_type_error()));
}

#[test]
fn test_unknown_opcode() {
    let (state, result) = run(vec![0x08]);
    assert_eq!(result, Err(ExecutionError::UnknownOpcode { opcode: 0x08, ip: 0 }));
    assert_eq!(state.ip(), 0);
}

#[test]
fn test_halt_stops_early() {
    let code = Assembler::new().op(Opcode::Halt).push_u32(1).finish();
    let (state, result) = run(code);
    assert_eq!(result, Ok(()));
    assert_eq!(state.ip(), 1);
    assert!(state.stack().is_empty());
}

#[test]
fn test_empty_program_is_stopped() {
    let (state, result) = run(Vec::new());
    assert_eq!(result, Ok(()));
    assert!(state.is_stopped());
}

#[test]
fn test_stop_signal_interrupts() {
    let code = Assembler::new().push_u32(1).finish();
    let mut state = ProgramState::new(code, Capacities::default());
    let stop = AtomicBool::new(true);
    let result = execute(&mut state, &ExecutionOptions::default(), &stop);
    assert_eq!(result, Err(ExecutionError::Interrupted { ip: 0 }));
    assert!(state.stack().is_empty());
}

#[test]
fn test_debug_dump_does_not_change_result() {
    init_test_logging();
    let code = Assembler::new().push_u32(3).push_u32(4).op(Opcode::StoreUint).finish();
    let options = ExecutionOptions { debug_dump: true, ..Default::default() };
    let (state, result) = run_with(code, &options);
    assert_eq!(result, Ok(()));
    assert_eq!(state.memory().get(MemoryClass::Uint, 3), Value::U32(4));
}
