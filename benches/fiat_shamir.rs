use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use k256::{elliptic_curve::Field, ProjectivePoint, Scalar};
use rand_core::OsRng;
use sigma_nizk::{
    dev::{Schnorr, ToyDlog},
    FiatShamirProofSystem,
};

fn bench_schnorr(c: &mut Criterion) {
    let mut group = c.benchmark_group("Schnorr proof (secp256k1)");

    let system = FiatShamirProofSystem::new(Schnorr::<ProjectivePoint>::new());
    let secret = Scalar::random(&mut OsRng);
    let public = Schnorr::<ProjectivePoint>::statement(&secret);

    group.bench_function("prove", |b| {
        b.iter(|| system.create_proof_with_additional_data(&mut OsRng, &public, &secret, b"bench"))
    });

    group.bench_function("verify", |b| {
        b.iter_batched(
            || {
                system
                    .create_proof_with_additional_data(&mut OsRng, &public, &secret, b"bench")
                    .unwrap()
            },
            |proof| system.check_proof_with_additional_data(&public, &proof, b"bench"),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("verify encoded", |b| {
        b.iter_batched(
            || {
                let proof = system
                    .create_proof_with_additional_data(&mut OsRng, &public, &secret, b"bench")
                    .unwrap();
                system.encode_proof(&public, &proof).to_bytes().unwrap()
            },
            |bytes| system.check_encoded_proof_with_additional_data(&public, &bytes, b"bench"),
            BatchSize::SmallInput,
        )
    });
}

fn bench_toy(c: &mut Criterion) {
    let mut group = c.benchmark_group("Toy discrete log proof");

    let system = FiatShamirProofSystem::new(ToyDlog);
    let witness = 7;
    let statement = ToyDlog::statement(witness);

    group.bench_function("prove", |b| {
        b.iter(|| system.create_proof(&mut OsRng, &statement, &witness))
    });

    group.bench_function("verify", |b| {
        b.iter_batched(
            || system.create_proof(&mut OsRng, &statement, &witness).unwrap(),
            |proof| system.check_proof(&statement, &proof),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_schnorr, bench_toy);
criterion_main!(benches);
