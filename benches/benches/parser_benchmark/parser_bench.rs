//! Производительность разбора заголовка и чтения отсчётов.

use std::{hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use taffmat_benchmark::{make_data, make_header_text};
use taffmat_core::{parse_header, read_calibrated, write_header, DatReader};

fn bench_parse_header(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_header");

    for n in [2usize, 16, 128] {
        let text = make_header_text(n, 1000);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| parse_header(black_box(text.as_bytes()), "BENCH001").unwrap())
        });
    }

    group.finish();
}

fn bench_write_header(c: &mut Criterion) {
    let header = parse_header(make_header_text(16, 1000).as_bytes(), "BENCH001").unwrap();

    c.bench_function("write_header_16ch", |b| {
        b.iter(|| write_header(black_box(&header)).unwrap())
    });
}

fn bench_read_calibrated(c: &mut Criterion) {
    let header = parse_header(make_header_text(8, 100_000).as_bytes(), "BENCH001").unwrap();
    let data = make_data(&header).unwrap();

    let mut group = c.benchmark_group("read_calibrated");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("8ch_100k_frames", |b| {
        b.iter(|| {
            let mut reader = DatReader::new(Cursor::new(black_box(&data)), &header);
            read_calibrated(&mut reader, &header).unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_header,
    bench_write_header,
    bench_read_calibrated
);
criterion_main!(benches);
