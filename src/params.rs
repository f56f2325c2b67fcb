use core::fmt::Debug;

use digest::{ExtendableOutput, Update};

/// Hashing parameters of a challenge space.
pub trait HashParams: 'static + Debug + Clone + Copy + Send + Sync + PartialEq + Eq {
    /// The extendable-output hash used to map byte strings into the challenge space.
    type Digest: ExtendableOutput + Default + Update + Clone;

    /// The statistical security in bits.
    ///
    /// When reducing hash output into a field, this many extra bits are read
    /// to bound the bias of the resulting distribution by `2^-SECURITY_BITS`.
    const SECURITY_BITS: usize;
}

/// SHAKE256 with 128 bits of statistical security (the default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shake256Params;

impl HashParams for Shake256Params {
    type Digest = sha3::Shake256;
    const SECURITY_BITS: usize = 128;
}

/// SHAKE128 with 128 bits of statistical security.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shake128Params;

impl HashParams for Shake128Params {
    type Digest = sha3::Shake128;
    const SECURITY_BITS: usize = 128;
}
