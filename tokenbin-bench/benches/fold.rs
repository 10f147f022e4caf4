//! Folding many small per-document tables into one corpus table is the workload this crate is
//! built for.  There are three ways to do it:
//!
//! - build every document's table up front, then `concat` them all
//! - "streaming": build one table, `concat` it, drop it, repeat
//! - `add_tokens` every document into one table in place
//!
//! This benchmark compares all three on the same synthetic corpus, along with the cost of just
//! building the per-document tables.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tokenbin::TokenTable;
use tokenbin_bench::corpus;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fold documents");

    // (documents, tokens per document, vocabulary)
    let test_cases = [(100, 50, 500), (1000, 200, 5000), (1000, 2000, 50_000)];

    for (i, &(documents, tokens_per_document, vocabulary)) in test_cases.iter().enumerate() {
        let docs = corpus::synthetic_documents(documents, tokens_per_document, vocabulary, i as u64);

        group.bench_with_input(BenchmarkId::new("build", i), &docs, |b, docs| {
            b.iter(|| {
                docs.iter()
                    .map(|tokens| TokenTable::build(tokens))
                    .collect::<Vec<_>>()
            })
        });

        group.bench_with_input(BenchmarkId::new("concat", i), &docs, |b, docs| {
            let tables = docs
                .iter()
                .map(|tokens| TokenTable::build(tokens))
                .collect::<Vec<_>>();

            b.iter(|| TokenTable::merge_all(&tables).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("streaming", i), &docs, |b, docs| {
            b.iter(|| {
                docs.iter().try_fold(TokenTable::default(), |total, tokens| {
                    total.concat(&TokenTable::build(tokens))
                })
            })
        });

        group.bench_with_input(BenchmarkId::new("add_tokens", i), &docs, |b, docs| {
            b.iter(|| {
                let mut total = TokenTable::default();
                for tokens in docs {
                    total.add_tokens(tokens).unwrap();
                }
                total.sort_entries();
                total
            })
        });
    }
    group.finish();
}
criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
