use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigUint;
use threshold_ecc::{
    harness::{BcEctssSystem, ElGamalSystem, ThresholdCryptosystem},
    params::SystemParams,
    scalar::Scalar,
};

const MESSAGE: u64 = 5234583490578210874;

fn ids(params: &SystemParams, n: u64) -> Vec<Scalar> {
    (1..=n).map(|i| params.field().from_u64(i)).collect()
}

fn bench_bc_ectss(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc_ectss");
    group.sample_size(10);
    let message = BigUint::from(MESSAGE);
    let tag = BigUint::from(124353464568757742u64);

    for n in [4u64, 7] {
        let params = SystemParams::secp256k1(3).unwrap();
        let mut sys = BcEctssSystem::new(params.clone(), ids(&params, n), ids(&params, 3), tag.clone()).unwrap();

        group.bench_with_input(BenchmarkId::new("setup", n), &n, |b, _| {
            b.iter(|| sys.setup().unwrap());
        });
        let ct = sys.encrypt(&message).unwrap();
        group.bench_with_input(BenchmarkId::new("encrypt", n), &n, |b, _| {
            b.iter(|| sys.encrypt(&message).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decrypt", n), &n, |b, _| {
            b.iter(|| sys.decrypt(&ct).unwrap());
        });
    }

    group.finish();
}

fn bench_elgamal(c: &mut Criterion) {
    let mut group = c.benchmark_group("elgamal");
    group.sample_size(10);
    let message = BigUint::from(MESSAGE);

    for n in [4u64, 7] {
        let params = SystemParams::secp256k1(3).unwrap();
        let mut sys = ElGamalSystem::new(params.clone(), ids(&params, n), ids(&params, 3)).unwrap();

        group.bench_with_input(BenchmarkId::new("setup", n), &n, |b, _| {
            b.iter(|| sys.setup().unwrap());
        });
        let ct = sys.encrypt(&message).unwrap();
        group.bench_with_input(BenchmarkId::new("encrypt", n), &n, |b, _| {
            b.iter(|| sys.encrypt(&message).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decrypt", n), &n, |b, _| {
            b.iter(|| sys.decrypt(&ct).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bc_ectss, bench_elgamal);
criterion_main!(benches);
