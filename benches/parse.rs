use criterion::{criterion_group, criterion_main, Criterion};

const EXAMPLE: &str = include_str!("../src/example.patch");

fn parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| patch_reader::parse(std::hint::black_box(EXAMPLE)).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = parse
}
criterion_main!(benches);
