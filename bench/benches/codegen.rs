use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tartak::{codegen, parser::parse_program, Target};

static INPUT: &str = include_str!("../../demos/big.tartak");

fn criterion_benchmark(c: &mut Criterion) {
    let program = parse_program(INPUT).unwrap();

    for &target in Target::ALL {
        c.bench_function(&format!("codegen_{target}"), |b| {
            b.iter(|| {
                let code = codegen::generate(target, black_box(&program)).unwrap();
                black_box(code);
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
