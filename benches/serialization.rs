use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lineput::escape::{decode, encode};
use lineput::{from_str, to_string, Document, Line, Ordered, Sub, Unique};

fn sample_document(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            format!(
                "player{}#p{}:|name#Thomas{}:|level#{}:|score#{}.5:|notes/com misc///row {}",
                i,
                i,
                i,
                i % 60,
                i * 10,
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn benchmark_parse_line(c: &mut Criterion) {
    let wire = "player:|name#Thomas1000:|level#3:|class#mage:|gold#10500:|trailing/com text";

    c.bench_function("parse_line_unique", |b| {
        b.iter(|| Line::<Unique>::parse(black_box(wire)))
    });
    c.bench_function("parse_line_ordered", |b| {
        b.iter(|| Line::<Ordered>::parse(black_box(wire)))
    });
}

fn benchmark_write_line(c: &mut Criterion) {
    let mut line: Line = Line::new("player");
    for i in 0..20 {
        line.add(Sub::with_value(format!("k{}", i), i));
    }

    c.bench_function("write_line_20_children", |b| {
        b.iter(|| black_box(&line).to_string())
    });
}

fn benchmark_load_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_document");

    for size in [10, 100, 1000].iter() {
        let text = sample_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Unique>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_write_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_document");

    for size in [10, 100, 1000].iter() {
        let doc: Document = from_str(&sample_document(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let plain = "nothing to escape here at all";
    let busy = "a|b/c:|d\te\nf\rg#h,i".repeat(8);
    let stored = encode(&busy);

    group.bench_function("encode_plain", |b| b.iter(|| encode(black_box(plain))));
    group.bench_function("encode_busy", |b| b.iter(|| encode(black_box(&busy))));
    group.bench_function("decode_busy", |b| b.iter(|| decode(black_box(&stored))));
    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_line,
    benchmark_write_line,
    benchmark_load_document,
    benchmark_write_document,
    benchmark_codec
);
criterion_main!(benches);
