use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use las2g::{Point, Record, Writer};
use std::{hint::black_box, io::Cursor};

fn archive(nrecords: usize, npoints: usize) -> Vec<Record> {
    (0..nrecords)
        .map(|i| Record::new(i as u64, vec![Point::default(); npoints]))
        .collect()
}

fn roundtrip(records: &[Record]) {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    for record in records {
        writer.write_record(record).unwrap();
    }
    let bytes = writer.into_inner().unwrap().into_inner();
    let (records, status) = las2g::decode_archive(Cursor::new(bytes));
    assert!(!status.is_partial());
    let _ = black_box(records);
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    for &(nrecords, npoints) in &[(1, 0), (1, 1), (10, 100), (100, 2048)] {
        let records = archive(nrecords, npoints);
        group.throughput(Throughput::Elements((nrecords * npoints) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{nrecords}x{npoints}")),
            &records,
            |b, records| b.iter(|| roundtrip(records)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
