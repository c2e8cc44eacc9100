use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jobring::{assign, HashRing, MAX_JOBS};

fn ids(count: usize) -> Vec<String> {
    (0..count).map(|i| i.to_string()).collect()
}

fn bench_assign(c: &mut Criterion) {
    let jobs = ids(MAX_JOBS);
    let mut group = c.benchmark_group("assign");

    for servers in [5, 100, 1000] {
        let servers = ids(servers);
        group.bench_with_input(
            BenchmarkId::from_parameter(servers.len()),
            &servers,
            |b, servers| {
                let mut ring = HashRing::new();
                b.iter(|| assign(&mut ring, black_box(&jobs), black_box(servers)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let mut ring = HashRing::new();
    for server in ids(1000) {
        ring.add_server(&server).unwrap();
    }
    c.bench_function("locate/1000", |b| b.iter(|| ring.locate(black_box("4095")).unwrap()));
}

criterion_group!(benches, bench_assign, bench_locate);
criterion_main!(benches);
