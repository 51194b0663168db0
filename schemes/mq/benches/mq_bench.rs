//! Benchmarks for UOV, MQDSS and MQAT.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::OsRng;

use pqsigs_mq::{
    field::{Field, Gf256, Gf31},
    mq::{DenseSystem, QuadraticMap},
    mqat, mqdss,
    params::{MQAT_DEMO, MQDSS_31_48, MQDSS_DEMO, UOV_DEMO, UOV_L1},
    uov,
};

/// Benchmark field operations.
fn bench_field_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("field");

    let (a, b) = (Gf256(0x57), Gf256(0x83));
    group.bench_function("gf256_mul", |bencher| {
        bencher.iter(|| black_box(a) * black_box(b))
    });
    group.bench_function("gf256_inverse", |bencher| {
        bencher.iter(|| black_box(a).inverse())
    });

    let (x, y) = (Gf31::new(17), Gf31::new(29));
    group.bench_function("gf31_mul", |bencher| {
        bencher.iter(|| black_box(x) * black_box(y))
    });
    group.bench_function("gf31_inverse", |bencher| {
        bencher.iter(|| black_box(x).inverse())
    });

    group.finish();
}

/// Benchmark evaluation of a dense quadratic system.
fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("mq_eval");

    for n in [16usize, 48, 96] {
        let system: DenseSystem<Gf256> = DenseSystem::from_seed(b"bench", n, n / 2);
        let x = vec![Gf256(0x3C); n];
        group.bench_with_input(BenchmarkId::new("gf256", n), &x, |bencher, x| {
            bencher.iter(|| system.eval(black_box(x)))
        });
    }

    group.finish();
}

/// Benchmark UOV key generation, signing and verification.
fn bench_uov(c: &mut Criterion) {
    let mut group = c.benchmark_group("uov");

    let (pk, sk) = uov::keygen(&mut OsRng, UOV_DEMO).unwrap();
    let target = uov::hash_message(&UOV_DEMO, b"benchmark message");
    let sig = uov::sign(&sk, &target).unwrap();

    group.bench_function("keygen_demo", |bencher| {
        bencher.iter(|| uov::keygen(&mut OsRng, black_box(UOV_DEMO)))
    });
    group.bench_function("sign_demo", |bencher| {
        bencher.iter(|| uov::sign(&sk, black_box(&target)))
    });
    group.bench_function("verify_demo", |bencher| {
        bencher.iter(|| uov::verify(&pk, black_box(&target), &sig))
    });

    // L1 is slower, so we use fewer samples
    group.sample_size(10);
    let (pk_l1, sk_l1) = uov::keygen(&mut OsRng, UOV_L1).unwrap();
    let target_l1 = uov::hash_message(&UOV_L1, b"benchmark message");
    let sig_l1 = uov::sign(&sk_l1, &target_l1).unwrap();

    group.bench_function("keygen_l1", |bencher| {
        bencher.iter(|| uov::keygen(&mut OsRng, black_box(UOV_L1)))
    });
    group.bench_function("sign_l1", |bencher| {
        bencher.iter(|| uov::sign(&sk_l1, black_box(&target_l1)))
    });
    group.bench_function("verify_l1", |bencher| {
        bencher.iter(|| uov::verify(&pk_l1, black_box(&target_l1), &sig_l1))
    });

    group.finish();
}

/// Benchmark MQDSS over both fields.
fn bench_mqdss(c: &mut Criterion) {
    let mut group = c.benchmark_group("mqdss");
    let msg = b"benchmark message for mqdss";

    let (pk, sk) = mqdss::keygen::<Gf256, _>(&mut OsRng, MQDSS_DEMO).unwrap();
    let sig = mqdss::sign(&sk, msg).unwrap();
    group.bench_function("sign_gf256_demo", |bencher| {
        bencher.iter(|| mqdss::sign(&sk, black_box(msg)))
    });
    group.bench_function("verify_gf256_demo", |bencher| {
        bencher.iter(|| mqdss::verify(&pk, black_box(msg), &sig))
    });

    group.sample_size(10);
    group.bench_function("keygen_gf31_48", |bencher| {
        bencher.iter(|| mqdss::keygen::<Gf31, _>(&mut OsRng, black_box(MQDSS_31_48)))
    });

    let (pk31, sk31) = mqdss::keygen::<Gf31, _>(&mut OsRng, MQDSS_31_48).unwrap();
    let sig31 = mqdss::sign(&sk31, msg).unwrap();
    group.bench_function("sign_gf31_48", |bencher| {
        bencher.iter(|| mqdss::sign(&sk31, black_box(msg)))
    });
    group.bench_function("verify_gf31_48", |bencher| {
        bencher.iter(|| mqdss::verify(&pk31, black_box(msg), &sig31))
    });

    group.finish();
}

/// Benchmark MQDSS signing with varying message sizes.
fn bench_message_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_size");

    let (_, sk) = mqdss::keygen::<Gf256, _>(&mut OsRng, MQDSS_DEMO).unwrap();

    for size in [64, 256, 1024, 4096].iter() {
        let msg = vec![0xABu8; *size];

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &msg, |bencher, msg| {
            bencher.iter(|| mqdss::sign(&sk, black_box(msg)))
        });
    }

    group.finish();
}

/// Benchmark a full MQAT issuance: query, response, unblind, verify.
fn bench_mqat(c: &mut Criterion) {
    let mut group = c.benchmark_group("mqat");

    let (pk, sk) = mqat::keygen(&mut OsRng, MQAT_DEMO).unwrap();

    group.bench_function("issue_demo", |bencher| {
        bencher.iter(|| {
            let (session, query) = mqat::user0(&mut OsRng, &pk).unwrap();
            let response = mqat::sign0(&sk, &query).unwrap();
            let token = mqat::user1(&pk, &session, &response).unwrap();
            mqat::verify(&pk, &token)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_ops,
    bench_eval,
    bench_uov,
    bench_mqdss,
    bench_message_sizes,
    bench_mqat,
);
criterion_main!(benches);
