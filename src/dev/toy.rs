use alloc::{boxed::Box, format};

use digest::XofReader;
use rand_core::CryptoRngCore;

use crate::{
    challenge::ChallengeSpace,
    errors::Error,
    params::Shake256Params,
    sigma::{Challenge, SigmaProtocol, SigmaProtocolSimulator, SigmaProtocolTranscript},
    tools::{
        hashing::{Chain, XofHasher},
        Secret,
    },
};

/// The order `q` of the toy group (a 3-byte prime).
pub const TOY_GROUP_ORDER: u64 = 16776899;

/// The modulus `p = 2q + 1`; the toy group is the subgroup of squares modulo `p`.
pub const TOY_MODULUS: u64 = 2 * TOY_GROUP_ORDER + 1;

/// The generator of the toy group.
pub const TOY_GENERATOR: u64 = 4;

fn mul_mod(lhs: u64, rhs: u64, modulus: u64) -> u64 {
    // The result is less than the modulus, so the cast is lossless.
    (u128::from(lhs) * u128::from(rhs) % u128::from(modulus)) as u64
}

fn pow_mod(base: u64, exponent: u64, modulus: u64) -> u64 {
    let mut result = 1;
    let mut base = base % modulus;
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exponent >>= 1;
    }
    result
}

fn reduce_wide(bytes: [u8; 16]) -> u64 {
    (u128::from_be_bytes(bytes) % u128::from(TOY_GROUP_ORDER)) as u64
}

fn random_exponent(rng: &mut impl CryptoRngCore) -> u64 {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    reduce_wide(bytes)
}

fn is_group_element(value: u64) -> bool {
    value != 0 && value < TOY_MODULUS && pow_mod(value, TOY_GROUP_ORDER, TOY_MODULUS) == 1
}

/// Challenges are exponents of the toy group, encoded as 8 big-endian bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToyChallengeSpace;

impl ChallengeSpace for ToyChallengeSpace {
    type Challenge = u64;

    fn random_challenge(&self, rng: &mut impl CryptoRngCore) -> u64 {
        random_exponent(rng)
    }

    fn hash_into_challenge_space(&self, bytes: &[u8]) -> u64 {
        let mut reader = XofHasher::<Shake256Params>::new_with_dst(b"ToyChallengeSpace")
            .chain_bytes(bytes)
            .finalize_to_reader();
        let mut wide = [0u8; 16];
        reader.read(&mut wide);
        reduce_wide(wide)
    }

    fn encode_challenge(&self, challenge: &u64) -> Box<[u8]> {
        challenge.to_be_bytes().into()
    }

    fn restore_challenge(&self, encoded: &[u8]) -> Result<u64, Error> {
        let bytes = <[u8; 8]>::try_from(encoded)
            .map_err(|_| Error::MalformedChallenge(format!("expected 8 bytes, got {}", encoded.len())))?;
        let challenge = u64::from_be_bytes(bytes);
        if challenge >= TOY_GROUP_ORDER {
            return Err(Error::MalformedChallenge("out of range".into()));
        }
        Ok(challenge)
    }
}

/// Proof of knowledge of a discrete logarithm in a toy group of 3-byte order.
///
/// The statement is `X = g^w mod p`, the witness is `w < q`.
/// The announcement is `A = g^r`, the response is `z = r + c * w mod q`,
/// and the verifier checks that `g^z == A * X^c`.
///
/// Uses the default (full) transcript compression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToyDlog;

impl ToyDlog {
    /// Returns the statement `g^w mod p` for the witness `w`.
    pub fn statement(witness: u64) -> u64 {
        pow_mod(TOY_GENERATOR, witness, TOY_MODULUS)
    }
}

impl SigmaProtocol for ToyDlog {
    type CommonInput = u64;
    type SecretInput = u64;
    type AnnouncementSecret = Secret<u64>;
    type Announcement = u64;
    type Response = u64;
    type ChallengeSpace = ToyChallengeSpace;

    fn generate_announcement_secret(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &u64,
        secret: &u64,
    ) -> Result<Secret<u64>, Error> {
        if *secret >= TOY_GROUP_ORDER || !is_group_element(*common) || Self::statement(*secret) != *common {
            return Err(Error::InconsistentWitness);
        }
        Ok(Secret::new(random_exponent(rng)))
    }

    fn generate_announcement(&self, _common: &u64, _secret: &u64, announcement_secret: &Secret<u64>) -> u64 {
        pow_mod(TOY_GENERATOR, *announcement_secret.expose_secret(), TOY_MODULUS)
    }

    fn generate_response(
        &self,
        _common: &u64,
        secret: &u64,
        _announcement: &u64,
        announcement_secret: Secret<u64>,
        challenge: &u64,
    ) -> u64 {
        let blinded = mul_mod(*challenge, *secret, TOY_GROUP_ORDER);
        (announcement_secret.expose_secret() + blinded) % TOY_GROUP_ORDER
    }

    fn check_transcript(&self, common: &u64, transcript: &SigmaProtocolTranscript<Self>) -> bool {
        let announcement = *transcript.announcement();
        let challenge = *transcript.challenge();
        let response = *transcript.response();

        if !is_group_element(*common)
            || !is_group_element(announcement)
            || challenge >= TOY_GROUP_ORDER
            || response >= TOY_GROUP_ORDER
        {
            return false;
        }

        let lhs = pow_mod(TOY_GENERATOR, response, TOY_MODULUS);
        let rhs = mul_mod(announcement, pow_mod(*common, challenge, TOY_MODULUS), TOY_MODULUS);
        lhs == rhs
    }

    fn challenge_space(&self, _common: &u64) -> ToyChallengeSpace {
        ToyChallengeSpace
    }
}

impl SigmaProtocolSimulator for ToyDlog {
    fn simulate_transcript(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &u64,
        challenge: &Challenge<Self>,
    ) -> SigmaProtocolTranscript<Self> {
        // A = g^z * X^(-c), where X^(-c) = X^(q - c) since X has order q.
        let response = random_exponent(rng);
        let inverse_power = pow_mod(*common, TOY_GROUP_ORDER - challenge % TOY_GROUP_ORDER, TOY_MODULUS);
        let announcement = mul_mod(pow_mod(TOY_GENERATOR, response, TOY_MODULUS), inverse_power, TOY_MODULUS);
        SigmaProtocolTranscript::new(announcement, *challenge, response)
    }
}
