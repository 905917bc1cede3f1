use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dimensional::{systems, Formatter, Quantity};

fn quantities(inputs: &[&str]) -> Vec<Quantity> {
    let us = systems::us();
    inputs.iter().map(|s| us.parse(s).unwrap()).collect()
}

fn reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    let input = black_box(quantities(&[
        "1.5 gal",
        "2 lbf ft",
        "3 kcal/h",
        "300 mL",
        "20 ton mi/h^2",
    ]));

    group.bench_function("us-to-primitive", |b| {
        b.iter(|| {
            for q in &input {
                let _ = q.reduce();
            }
        })
    });
}

fn convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    let input = black_box(quantities(&["1.5 tsp", "3.5 Tbsp", "2 cp", "1.5 gal", "20 floz"]));
    let target = systems::si().parse("mL").unwrap();

    group.bench_function("volume-to-ml", |b| {
        b.iter(|| {
            for q in &input {
                let _ = q.convert(&target);
            }
        })
    });

    let speed = systems::us().parse("60 mi/h").unwrap();
    let mps = systems::si().parse("m/s").unwrap();
    group.bench_function("speed-to-mps", |b| b.iter(|| speed.try_convert(&mps)));
}

fn format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    let q = systems::si().parse("1.234 kg m/s^2").unwrap();
    let plain = Formatter::default();
    let unicode = Formatter::default().with_unicode();
    let latex = Formatter::default().with_latex();

    group.bench_function("plain", |b| b.iter(|| plain.format(&q)));
    group.bench_function("unicode", |b| b.iter(|| unicode.format(&q)));
    group.bench_function("latex", |b| b.iter(|| latex.format(&q)));
}

criterion_group!(benches, reduce, convert, format);
criterion_main!(benches);
