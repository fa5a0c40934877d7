use enigma::vm::{Assembler, Opcode};
use enigma::{Capacities, Error, ExecutionError, ExecutionOptions, MemoryClass, NeverStop};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn run(code: Vec<u8>) -> Result<enigma::ProgramState, Error> {
    enigma::run(code, Capacities::uniform(8), &ExecutionOptions::default(), &NeverStop)
}

#[test]
fn test_multiply_stored_int() {
    let code = Assembler::new()
        .push_u32(0)
        .push_u32(7)
        .op(Opcode::StoreInt)
        .push_u32(0)
        .op(Opcode::LoadInt)
        .push_u32(5)
        .op(Opcode::Mul)
        .finish();
    let state = run(code).unwrap();

    assert_eq!(
        state.dump().to_string(),
        indoc! {"
            ip: 27/27
            stack (1):
              [0] int(35) 0x00000023
            i: [0]=7
        "}
    );
}

#[test]
fn test_keys_wrap_to_zero() {
    let code = Assembler::new()
        .push_u32(8)
        .push_u32(1)
        .op(Opcode::StoreStorage)
        .push_u64(0xFFFF_FFFF_0000_0002)
        .push_u32(2)
        .op(Opcode::StoreStorage)
        .finish();
    let state = run(code).unwrap();

    let storage = state.memory().array(MemoryClass::Storage);
    assert_eq!(storage[0].to_u32(), 1);
    assert_eq!(storage[2].to_u32(), 2);
    assert!(state.stack().is_empty());
}

#[test]
fn test_division_by_zero_is_not_fatal() {
    let code = Assembler::new()
        .push_u32(1)
        .push_u32(5)
        .op(Opcode::StoreUlong)
        .push_u32(1)
        .push_u32(9)
        .push_u32(0)
        .op(Opcode::Div)
        .op(Opcode::StoreUlong)
        .finish();
    let state = run(code).unwrap();
    assert_eq!(state.memory().array(MemoryClass::Ulong)[1].to_u64(), 0);
}

#[test]
fn test_underflow_is_fatal() {
    let code = Assembler::new().push_u32(1).op(Opcode::Add).finish();
    let err = run(code).unwrap_err();
    assert_eq!(
        err,
        Error::Execution(ExecutionError::StackUnderflow {
            opcode: Opcode::Add,
            required: 2,
            found: 1,
            ip: 6,
        })
    );
    assert!(!err.is_type_error());
}

#[test]
fn test_oversized_push_is_fatal() {
    let code = Assembler::new().push_data(&[1; 65]).finish();
    assert_eq!(
        run(code).unwrap_err(),
        Error::Execution(ExecutionError::InvalidPushLength { length: 65, ip: 0 })
    );
}

#[test]
fn test_working_memory_is_read_only_input() {
    let code = Assembler::new()
        .push_u32(0)
        .push_u32(3)
        .op(Opcode::LoadM)
        .push_u32(4)
        .op(Opcode::LoadM)
        .op(Opcode::BitXor)
        .op(Opcode::StoreUint)
        .finish();
    let mut state = enigma::ProgramState::new(code, Capacities::default()).with_m(&[0, 0, 0, 0xF0, 0x0F]);
    enigma::vm::execute(&mut state, &ExecutionOptions::default(), &NeverStop).unwrap();
    assert_eq!(state.memory().array(MemoryClass::Uint)[0].to_u32(), 0xFF);
}
