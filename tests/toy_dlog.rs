use impls::impls;
use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_assert::{Deserializer, Serializer};

use sigma_nizk::{
    dev::{ToyDlog, TOY_GROUP_ORDER},
    ChallengeSpace, EncodedFiatShamirProof, Error, FiatShamirProof, FiatShamirProofSystem, SigmaProtocol,
};

const WITNESS: u64 = 7;

fn setup() -> (FiatShamirProofSystem<ToyDlog>, u64) {
    (FiatShamirProofSystem::new(ToyDlog), ToyDlog::statement(WITNESS))
}

#[test_log::test]
fn roundtrip_for_any_additional_data() {
    let (system, statement) = setup();
    let additional_data: [&[u8]; 4] = [b"", b"a", b"some context", &[0u8; 1000]];
    for data in additional_data {
        let proof = system
            .create_proof_with_additional_data(&mut OsRng, &statement, &WITNESS, data)
            .unwrap();
        assert!(system.check_proof_with_additional_data(&statement, &proof, data));
    }
}

#[test]
fn additional_data_mismatch_fails() {
    let (system, statement) = setup();
    let proof = system
        .create_proof_with_additional_data(&mut OsRng, &statement, &WITNESS, b"data")
        .unwrap();
    let others: [&[u8]; 4] = [b"", b"dat", b"data\0", b"Data"];
    for other in others {
        assert!(!system.check_proof_with_additional_data(&statement, &proof, other));
    }
}

#[test]
fn determinism() {
    let (system, statement) = setup();
    let create = |seed| {
        let proof = system
            .create_proof_with_additional_data(&mut ChaCha8Rng::seed_from_u64(seed), &statement, &WITNESS, b"data")
            .unwrap();
        system.encode_proof(&statement, &proof).to_bytes().unwrap()
    };
    assert_eq!(create(1), create(1));
    assert_ne!(create(1), create(2));
}

#[test_log::test]
fn every_bit_flip_is_rejected() {
    let (system, statement) = setup();
    let proof = system
        .create_proof(&mut ChaCha8Rng::seed_from_u64(42), &statement, &WITNESS)
        .unwrap();
    let bytes = system.encode_proof(&statement, &proof).to_bytes().unwrap();
    assert!(system.check_encoded_proof(&statement, &bytes));

    for position in 0..bytes.len() * 8 {
        let mut corrupted = bytes.to_vec();
        corrupted[position / 8] ^= 1 << (position % 8);
        assert!(
            !system.check_encoded_proof(&statement, &corrupted),
            "flipping bit {position} was not detected"
        );
    }
}

#[test]
fn compression_roundtrip() {
    let (system, statement) = setup();
    let protocol = system.protocol();
    for _ in 0..16 {
        let proof = system.create_proof(&mut OsRng, &statement, &WITNESS).unwrap();
        let transcript = protocol
            .decompress_transcript(&statement, proof.challenge(), proof.compressed_transcript())
            .unwrap();
        assert_eq!(transcript.challenge(), proof.challenge());
        assert!(protocol.check_transcript(&statement, &transcript));
        assert_eq!(
            &protocol.compress_transcript(&statement, &transcript).unwrap(),
            proof.compressed_transcript()
        );
    }
}

#[test]
fn challenge_roundtrip() {
    let (system, statement) = setup();
    let space = system.protocol().challenge_space(&statement);
    for challenge in [0, 1, WITNESS, TOY_GROUP_ORDER - 1] {
        let encoded = space.encode_challenge(&challenge);
        assert_eq!(system.protocol().restore_challenge(&statement, &encoded).unwrap(), challenge);
    }
    assert!(matches!(
        system.protocol().restore_challenge(&statement, &u64::MAX.to_be_bytes()),
        Err(Error::MalformedChallenge(_))
    ));
}

#[test]
fn wrong_witness() {
    let (system, statement) = setup();
    assert_eq!(
        system.create_proof(&mut OsRng, &statement, &(WITNESS + 1)).unwrap_err(),
        Error::InconsistentWitness
    );

    // A proof for one statement does not convince a verifier of another
    let other_statement = ToyDlog::statement(WITNESS + 1);
    let proof = system.create_proof(&mut OsRng, &statement, &WITNESS).unwrap();
    assert!(!system.check_proof(&other_statement, &proof));
}

#[test]
fn encoded_proof_serde() {
    let (system, statement) = setup();
    let proof = system.create_proof(&mut OsRng, &statement, &WITNESS).unwrap();
    let encoded = system.encode_proof(&statement, &proof);

    for human_readable in [true, false] {
        let serializer = Serializer::builder().is_human_readable(human_readable).build();
        let tokens = encoded.serialize(&serializer).unwrap();
        let mut deserializer = Deserializer::builder(tokens).is_human_readable(human_readable).build();
        let restored = EncodedFiatShamirProof::deserialize(&mut deserializer).unwrap();
        assert_eq!(system.restore_proof(&statement, &restored).unwrap(), proof);
    }

    assert_eq!(hex::encode(&encoded.challenge), hex::encode(proof.challenge().to_be_bytes()));
}

#[test]
fn concurrent_proofs() {
    assert!(impls!(FiatShamirProofSystem<ToyDlog>: Send & Sync));
    assert!(impls!(FiatShamirProof<ToyDlog>: Send & Sync));

    let (system, statement) = setup();
    let proofs = std::thread::scope(|scope| {
        let handles = (0..4u64)
            .map(|seed| {
                let system = &system;
                scope.spawn(move || {
                    let data = seed.to_be_bytes();
                    let proof = system
                        .create_proof_with_additional_data(
                            &mut ChaCha8Rng::seed_from_u64(seed),
                            &statement,
                            &WITNESS,
                            &data,
                        )
                        .unwrap();
                    assert!(system.check_proof_with_additional_data(&statement, &proof, &data));
                    proof
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    for (seed, proof) in proofs.iter().enumerate() {
        let data = (seed as u64).to_be_bytes();
        assert!(system.check_proof_with_additional_data(&statement, proof, &data));
    }
}
