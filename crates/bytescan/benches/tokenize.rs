//! Benchmark – tokenizing a large buffer of escaped, space-separated records.
#![allow(missing_docs)]

use bytescan::{ByteSet, Escaper, Tokenizer};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Builds a deterministic payload of newline-terminated records, three
/// space-separated words each, with one escaped space in the first word.
fn make_payload(target_len: usize) -> (Vec<u8>, usize) {
    let mut buf = Vec::with_capacity(target_len + 6000);
    let mut records = 0;
    while buf.len() < target_len {
        buf.extend_from_slice(br"foo ba\ rfle ");
        for _ in 0..1000 {
            buf.extend_from_slice(b"abcde");
        }
        buf.push(b'\n');
        records += 1;
    }
    (buf, records)
}

fn run_tokenizer(payload: &[u8], expect: usize) -> usize {
    let esc = Escaper::new(b" \t");
    let whitespace = ByteSet::new(b" \t");
    let word = ByteSet::new(b" \t\n").complement();

    let mut tok = Tokenizer::new(payload);
    let mut n = 0;
    'records: loop {
        tok.reset();
        for _ in 0..3 {
            if !tok.ensure(1) {
                break 'records;
            }
            black_box(tok.take_esc(&word, &esc));
            tok.take(&whitespace);
        }
        assert_eq!(tok.at(0), Some(b'\n'));
        tok.advance(1);
        n += 1;
    }
    assert_eq!(n, expect);
    n
}

fn bench_tokenize(c: &mut Criterion) {
    let (payload, records) = make_payload(8 * 1024 * 1024);

    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("words_with_escapes", |b| {
        b.iter(|| run_tokenizer(black_box(&payload), records));
    });
    group.finish();
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
