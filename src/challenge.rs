//! Challenge spaces.

use alloc::{boxed::Box, format};
use core::{fmt::Debug, marker::PhantomData};

use digest::XofReader;
use elliptic_curve::ff::PrimeField;
use rand_core::CryptoRngCore;

use crate::{
    errors::Error,
    params::{HashParams, Shake256Params},
    tools::{
        hashing::{Chain, XofHasher},
        BitVec,
    },
};

/// The domain challenges of a Sigma protocol are drawn from.
pub trait ChallengeSpace {
    /// The challenge type.
    type Challenge: 'static + Debug + Clone + PartialEq + Eq + Send + Sync;

    /// Samples a uniformly random challenge (for interactive use).
    fn random_challenge(&self, rng: &mut impl CryptoRngCore) -> Self::Challenge;

    /// Deterministically maps an arbitrary byte string into the space.
    ///
    /// The map must be collision-resistant: this is the only way
    /// the Fiat-Shamir transform derives challenges.
    fn hash_into_challenge_space(&self, bytes: &[u8]) -> Self::Challenge;

    /// Returns the canonical encoding of a challenge.
    fn encode_challenge(&self, challenge: &Self::Challenge) -> Box<[u8]>;

    /// Restores a challenge from its canonical encoding.
    ///
    /// Must reject any byte string that is not the output of [`Self::encode_challenge`].
    fn restore_challenge(&self, encoded: &[u8]) -> Result<Self::Challenge, Error>;
}

const PRIME_FIELD_DST: &[u8] = b"PrimeFieldChallengeSpace";

/// Challenges are elements of a prime field `F` (typically the scalar field of a group).
///
/// Hashing reads `SECURITY_BITS` more bits than the field size from the XOF of `H`
/// and reduces them modulo the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeFieldChallengeSpace<F, H = Shake256Params>(PhantomData<(F, H)>);

impl<F, H> PrimeFieldChallengeSpace<F, H> {
    /// Creates the challenge space.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<F, H> Default for PrimeFieldChallengeSpace<F, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField, H: HashParams> PrimeFieldChallengeSpace<F, H> {
    fn from_wide_bytes(bytes: &[u8]) -> F {
        let radix = F::from(256u64);
        bytes
            .iter()
            .fold(F::ZERO, |acc, byte| acc * radix + F::from(u64::from(*byte)))
    }
}

impl<F, H> ChallengeSpace for PrimeFieldChallengeSpace<F, H>
where
    F: PrimeField,
    H: HashParams,
{
    type Challenge = F;

    fn random_challenge(&self, rng: &mut impl CryptoRngCore) -> F {
        F::random(rng)
    }

    fn hash_into_challenge_space(&self, bytes: &[u8]) -> F {
        let mut reader = XofHasher::<H>::new_with_dst(PRIME_FIELD_DST)
            .chain_bytes(bytes)
            .finalize_to_reader();
        let len = (F::NUM_BITS as usize).div_ceil(8) + H::SECURITY_BITS.div_ceil(8);
        let mut wide = alloc::vec![0u8; len];
        reader.read(&mut wide);
        Self::from_wide_bytes(&wide)
    }

    fn encode_challenge(&self, challenge: &F) -> Box<[u8]> {
        challenge.to_repr().as_ref().into()
    }

    fn restore_challenge(&self, encoded: &[u8]) -> Result<F, Error> {
        let mut repr = F::Repr::default();
        if repr.as_ref().len() != encoded.len() {
            return Err(Error::MalformedChallenge(format!(
                "expected {} bytes, got {}",
                repr.as_ref().len(),
                encoded.len()
            )));
        }
        repr.as_mut().copy_from_slice(encoded);
        Option::from(F::from_repr(repr))
            .ok_or_else(|| Error::MalformedChallenge("not a canonical field element".into()))
    }
}

const BIT_DST: &[u8] = b"BitChallengeSpace";

/// Challenges are bit strings of a fixed length.
///
/// Suits protocols with binary challenges that are repeated in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitChallengeSpace<H = Shake256Params> {
    bits: u32,
    phantom: PhantomData<H>,
}

impl<H> BitChallengeSpace<H> {
    /// Creates a space of `bits`-long bit strings.
    pub const fn new(bits: u32) -> Self {
        Self {
            bits,
            phantom: PhantomData,
        }
    }

    /// The length of the challenges in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    fn len(&self) -> usize {
        self.bits as usize
    }
}

impl<H: HashParams> ChallengeSpace for BitChallengeSpace<H> {
    type Challenge = BitVec;

    fn random_challenge(&self, rng: &mut impl CryptoRngCore) -> BitVec {
        BitVec::random(rng, self.len())
    }

    fn hash_into_challenge_space(&self, bytes: &[u8]) -> BitVec {
        let mut reader = XofHasher::<H>::new_with_dst(BIT_DST)
            .chain_constant_sized_bytes(&u64::from(self.bits).to_be_bytes())
            .chain_bytes(bytes)
            .finalize_to_reader();
        BitVec::from_xof_reader(&mut reader, self.len())
    }

    fn encode_challenge(&self, challenge: &BitVec) -> Box<[u8]> {
        challenge.to_bytes()
    }

    fn restore_challenge(&self, encoded: &[u8]) -> Result<BitVec, Error> {
        BitVec::from_bytes(self.len(), encoded)
    }
}
