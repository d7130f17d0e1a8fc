use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gifdoc::Document;

/// Build a 10x10 four-color GIF in memory
fn sample_gif() -> Vec<u8> {
    vec![
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x0A, 0x00, //
        0x0A, 0x00, 0x91, 0x00, 0x00, 0xFF, 0xFF, 0xFF, //
        0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, //
        0x00, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, //
        0x00, 0x2C, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x00, //
        0x0A, 0x00, 0x00, 0x02, 0x16, 0x8C, 0x2D, 0x99, //
        0x87, 0x2A, 0x1C, 0xDC, 0x33, 0xA0, 0x02, 0x75, //
        0xEC, 0x95, 0xFA, 0xA8, 0xDE, 0x60, 0x8C, 0x04, //
        0x91, 0x4C, 0x01, 0x00, 0x3B,
    ]
}

fn parse_document(crit: &mut Criterion) {
    let gif = sample_gif();

    crit.bench_function("parse_document", |b| {
        b.iter(|| {
            let doc = Document::parse(black_box(&gif)).unwrap();
            black_box(doc);
        })
    });
}

fn decode_frame(crit: &mut Criterion) {
    let gif = sample_gif();

    crit.bench_function("decode_frame", |b| {
        b.iter(|| {
            let mut doc = Document::parse(black_box(&gif)).unwrap();
            black_box(doc.to_image(0).unwrap());
        })
    });
}

criterion_group!(benches, parse_document, decode_frame);
criterion_main!(benches);
