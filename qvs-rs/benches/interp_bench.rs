use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qvs::script::{normalize, Interpreter};

/// A script of `n` assignments, each expanding the previous variable, with a
/// comment of every kind sprinkled in.
fn make_script(n: usize) -> String {
    let mut src = String::from("/* generated */\nSET v0 = 'lib://root';\n");
    for i in 1..n {
        src.push_str(&format!("LET v{i} = $(v{});  // step {i}\r\n", i - 1));
        if i % 10 == 0 {
            src.push_str("REM checkpoint\n");
        }
    }
    src
}

fn bench_interp(c: &mut Criterion) {
    let small = make_script(100);
    let large = make_script(5_000);

    let mut g = c.benchmark_group("interp");

    g.bench_function("normalize_small", |b| b.iter(|| normalize(black_box(&small))));
    g.bench_function("normalize_large", |b| b.iter(|| normalize(black_box(&large))));

    g.bench_function("exec_small", |b| {
        b.iter(|| {
            let mut interp = Interpreter::new();
            interp.exec_script(black_box(&small))
        })
    });
    g.bench_function("exec_large", |b| {
        b.iter(|| {
            let mut interp = Interpreter::new();
            interp.exec_script(black_box(&large))
        })
    });

    g.finish();
}

criterion_group!(benches, bench_interp);
criterion_main!(benches);
