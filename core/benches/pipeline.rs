//! Benchmarks for the compiler and the interpreter.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. compile: tree-to-script conversion of a function with `n` statements
//! 2. execute: interpreting an opcode stream of `n` store/load/add rounds

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use enigma_core::{
    api::{Capacities, CompilationOptions, ExecutionOptions, NeverStop},
    ast::{AssignOp, BinOp, NodeId, Tree, TreeBuilder},
    compiler,
    types::NumericType,
    vm::{self, Assembler, Opcode, ProgramState},
};

/// `function verify() { i[k] = (i[k]) + (u[...]); ... }` with `n` statements.
fn generate_function(n: usize) -> (Tree, NodeId) {
    let mut b = TreeBuilder::new();
    let statements: Vec<_> = (0..n as u64)
        .map(|k| {
            let index = b.register(NumericType::I32, k);
            let read = b.register_at(NumericType::U32, index);
            let left = b.register(NumericType::I32, k);
            let sum = b.binary(BinOp::Add, left, read);
            let target = b.register(NumericType::I32, k);
            let stmt = b.assign(AssignOp::Assign, target, sum);
            b.statement(stmt)
        })
        .collect();
    let body = b.block(&statements);
    let root = b.function("verify", body);
    (b.finish(), root)
}

/// `u[k] = u[k] + k` for every `k < n`.
fn generate_code(n: u32) -> Vec<u8> {
    let mut asm = Assembler::new();
    for k in 0..n {
        asm = asm
            .push_u32(k)
            .push_u32(k)
            .op(Opcode::LoadUint)
            .push_u32(k)
            .op(Opcode::Add)
            .op(Opcode::StoreUint);
    }
    asm.finish()
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let options = CompilationOptions::default();

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let (tree, root) = generate_function(size);
            b.iter(|| {
                compiler::compile_function(black_box(&tree), root, &options, &NeverStop)
                    .expect("compile failed")
            });
        });
    }
    group.finish();
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");
    let options = ExecutionOptions::default();

    for size in [10u32, 100, 1000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let code = generate_code(size);
            b.iter(|| {
                let mut state = ProgramState::new(black_box(code.clone()), Capacities::default());
                vm::execute(&mut state, &options, &NeverStop).expect("execution failed");
                state
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_execute);
criterion_main!(benches);
