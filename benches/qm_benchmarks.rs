//! Benchmark suite for Quine-McCluskey minimization
//!
//! Functions are generated deterministically so runs are comparable: each
//! width gets a pseudo-random ON-set covering roughly a third of the indices
//! and a smaller don't-care set.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qm_logic::pla::PLAReader;
use qm_logic::{
    generate_terms, minimize, prime_implicants, Category, FunctionSpec, Minimizable, Pattern,
    TermList,
};

const WIDTHS: [usize; 5] = [4, 6, 8, 10, 12];

/// Simple LCG so every run sees the same functions
fn rows(width: usize, seed: u64) -> Vec<(String, Category)> {
    let mut state = seed;
    let mut rows = Vec::new();
    for index in 0..(1u32 << width) {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let category = match (state >> 33) % 9 {
            0..=2 => Category::Minterm,
            3 => Category::DontCare,
            _ => continue,
        };
        rows.push((Pattern::from_index(index, width).to_string(), category));
    }
    rows
}

fn function(width: usize) -> TermList {
    let inputs: Vec<String> = (0..width).map(|i| format!("x{}", i)).collect();
    generate_terms(&inputs, &rows(width, width as u64)).unwrap()
}

fn bench_prime_implicants(c: &mut Criterion) {
    let mut group = c.benchmark_group("prime_implicants");

    for width in WIDTHS {
        let terms = function(width);
        group.throughput(Throughput::Elements(terms.terms().len() as u64));
        group.bench_with_input(BenchmarkId::new("tabulate", width), &terms, |b, terms| {
            b.iter(|| black_box(prime_implicants(black_box(terms).terms().iter().cloned())));
        });
    }

    group.finish();
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");

    for width in WIDTHS {
        let terms = function(width);
        group.throughput(Throughput::Elements(terms.terms().len() as u64));
        group.bench_with_input(BenchmarkId::new("greedy", width), &terms, |b, terms| {
            b.iter(|| black_box(minimize(black_box(terms)).unwrap()));
        });
    }

    group.finish();
}

fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact");
    group.sample_size(20);

    // exact search grows quickly; stay with the small widths
    for width in [4, 6] {
        let terms = function(width);
        group.bench_with_input(BenchmarkId::new("branch_and_bound", width), &terms, |b, terms| {
            b.iter(|| black_box(black_box(terms).minimize_exact().unwrap()));
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for width in [4, 8] {
        let mut pla = format!(".i {}\n.o 1\n", width);
        for (pattern, category) in rows(width, 42) {
            let out = match category {
                Category::Minterm => '1',
                Category::DontCare => '-',
            };
            pla.push_str(&format!("{} {}\n", pattern, out));
        }
        pla.push_str(".e\n");

        group.bench_with_input(BenchmarkId::new("pla", width), &pla, |b, data| {
            b.iter(|| {
                let spec = FunctionSpec::from_pla_string(black_box(data)).unwrap();
                black_box(spec.minimize().unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_prime_implicants,
    bench_minimize,
    bench_exact,
    bench_full_pipeline
);
criterion_main!(benches);
