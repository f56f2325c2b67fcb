use alloc::{boxed::Box, vec, vec::Vec};

use digest::XofReader;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use serde_encoded_bytes::{Hex, SliceLike};

use crate::errors::Error;

#[derive(Serialize, Deserialize)]
struct PackedBitVec {
    bits: u32,
    #[serde(with = "SliceLike::<Hex>")]
    byte_vec: Box<[u8]>,
}

impl TryFrom<PackedBitVec> for BitVec {
    type Error = Error;
    fn try_from(source: PackedBitVec) -> Result<Self, Self::Error> {
        let bits = source
            .bits
            .try_into()
            .map_err(|_| Error::MalformedChallenge("the number of bits does not fit into `usize`".into()))?;
        BitVec::from_bytes(bits, &source.byte_vec)
    }
}

impl From<BitVec> for PackedBitVec {
    fn from(source: BitVec) -> Self {
        Self {
            // Lengths are bounded by `MAX_BITS` on construction.
            bits: u32::try_from(source.0.len()).unwrap_or(u32::MAX),
            byte_vec: source.to_bytes(),
        }
    }
}

/// The maximum length of a [`BitVec`].
const MAX_BITS: usize = u32::MAX as usize;

/// A fixed-length string of bits, packed most significant bit first.
///
/// The length is at most `u32::MAX` bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PackedBitVec", into = "PackedBitVec")]
pub struct BitVec(Box<[bool]>);

impl BitVec {
    fn from_bytes_unchecked(bits: usize, byte_vec: &[u8]) -> Self {
        debug_assert!(bits.div_ceil(8) <= byte_vec.len());
        let mut bit_vec = Vec::with_capacity(bits);

        // Allowing direct indexing since we checked the vector length above.
        #[allow(clippy::indexing_slicing)]
        for i in 0..bits {
            let byte_position = i / 8;
            let bit_mask = 1 << (7 - (i % 8));
            bit_vec.push(byte_vec[byte_position] & bit_mask != 0);
        }

        Self(bit_vec.into())
    }

    /// Decodes exactly `bits` bits from their packed form.
    ///
    /// The byte string must have the minimal length and the padding bits must be zero,
    /// so that every bit string has exactly one encoding.
    pub fn from_bytes(bits: usize, byte_vec: &[u8]) -> Result<Self, Error> {
        if bits > MAX_BITS {
            return Err(Error::MalformedChallenge(alloc::format!(
                "{bits} bits exceed the maximum of {MAX_BITS}"
            )));
        }
        if byte_vec.len() != bits.div_ceil(8) {
            return Err(Error::MalformedChallenge(alloc::format!(
                "expected {} bytes for {} bits, got {}",
                bits.div_ceil(8),
                bits,
                byte_vec.len()
            )));
        }
        let result = Self::from_bytes_unchecked(bits, byte_vec);
        if *result.to_bytes() != *byte_vec {
            return Err(Error::MalformedChallenge("non-zero padding bits".into()));
        }
        Ok(result)
    }

    /// Packs the bits, most significant bit of the first byte first, zero-padded.
    pub fn to_bytes(&self) -> Box<[u8]> {
        let bytes = self.0.len().div_ceil(8);
        let mut byte_vec = vec![0u8; bytes];

        // Allowing direct indexing since we set the correct vector length above.
        #[allow(clippy::indexing_slicing)]
        for (i, bit) in self.0.iter().enumerate() {
            let byte_position = i / 8;
            let bit_mask = 1 << (7 - (i % 8));
            if *bit {
                byte_vec[byte_position] |= bit_mask;
            }
        }

        byte_vec.into()
    }

    pub(crate) fn random(rng: &mut impl CryptoRngCore, bits: usize) -> Self {
        let bytes = bits.div_ceil(8);
        let mut byte_vec = vec![0; bytes];
        rng.fill_bytes(&mut byte_vec);
        Self::from_bytes_unchecked(bits, &byte_vec)
    }

    pub(crate) fn from_xof_reader(reader: &mut impl XofReader, bits: usize) -> Self {
        let bytes = bits.div_ceil(8);
        let mut byte_vec = vec![0u8; bytes];
        reader.read(&mut byte_vec);
        Self::from_bytes_unchecked(bits, &byte_vec)
    }

    /// The bits, in order.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// The number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
