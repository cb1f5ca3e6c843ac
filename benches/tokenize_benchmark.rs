//! Benchmarks for tokenization throughput.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdftok::Tokenizer;

/// Build manual-like text of roughly `paragraphs` paragraphs.
fn sample_text(paragraphs: usize) -> String {
    let paragraph = "Section 4.2: Before operating the pump, verify that valve V-12 is \
                     closed (see Figure 7). Pressure must stay below 3.5 bar; otherwise, \
                     stop_the_unit immediately and contact support@example.com.\n\n";
    paragraph.repeat(paragraphs)
}

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();
    let mut group = c.benchmark_group("tokenize");

    for paragraphs in [1, 100, 10_000] {
        let text = sample_text(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| tokenizer.tokenize(black_box(text)).count())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
