use alloc::{boxed::Box, format, vec::Vec};

use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use serde_encoded_bytes::{Hex, SliceLike};

use crate::{
    errors::Error,
    sigma::{Challenge, CompressedTranscript, SigmaProtocol},
};

/// A non-interactive proof: a compressed transcript together with its challenge.
///
/// The challenge is stored explicitly so that the transcript can omit
/// everything recomputable from it.
#[derive_where(Debug, Clone, PartialEq)]
pub struct FiatShamirProof<P: SigmaProtocol> {
    compressed_transcript: CompressedTranscript,
    challenge: Challenge<P>,
}

impl<P: SigmaProtocol> FiatShamirProof<P> {
    /// Assembles a proof out of its parts.
    ///
    /// No checks are performed; use the proof system to verify the result.
    pub fn new(compressed_transcript: CompressedTranscript, challenge: Challenge<P>) -> Self {
        Self {
            compressed_transcript,
            challenge,
        }
    }

    /// The protocol-specific encoding of the transcript.
    pub fn compressed_transcript(&self) -> &CompressedTranscript {
        &self.compressed_transcript
    }

    /// The challenge the transcript was produced for.
    pub fn challenge(&self) -> &Challenge<P> {
        &self.challenge
    }
}

/// The encoded form of a [`FiatShamirProof`], suitable for storage and transmission.
///
/// Human-readable serde formats represent both fields as hex strings.
/// The binary form produced by [`to_bytes`](`Self::to_bytes`) is each field
/// prefixed with its length as a big-endian `u32`, transcript first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFiatShamirProof {
    /// The compressed transcript.
    pub transcript: CompressedTranscript,
    /// The canonical encoding of the challenge.
    #[serde(with = "SliceLike::<Hex>")]
    pub challenge: Box<[u8]>,
}

fn push_field(buffer: &mut Vec<u8>, field: &[u8]) -> Result<(), Error> {
    let len = u32::try_from(field.len())
        .map_err(|_| Error::Encoding(format!("a proof field of {} bytes is too long", field.len())))?;
    buffer.extend_from_slice(&len.to_be_bytes());
    buffer.extend_from_slice(field);
    Ok(())
}

fn take_field<'a>(bytes: &mut &'a [u8], name: &str) -> Result<&'a [u8], Error> {
    let (len, rest) = bytes
        .split_first_chunk::<4>()
        .ok_or_else(|| Error::MalformedProof(format!("missing the length of `{name}`")))?;
    let len = usize::try_from(u32::from_be_bytes(*len))
        .map_err(|_| Error::MalformedProof(format!("the length of `{name}` does not fit into `usize`")))?;
    if rest.len() < len {
        return Err(Error::MalformedProof(format!(
            "`{name}` needs {len} bytes, only {} left",
            rest.len()
        )));
    }
    let (field, rest) = rest.split_at(len);
    *bytes = rest;
    Ok(field)
}

impl EncodedFiatShamirProof {
    /// Serializes the proof into its binary form.
    pub fn to_bytes(&self) -> Result<Box<[u8]>, Error> {
        let transcript = self.transcript.as_bytes();
        let mut buffer = Vec::with_capacity(8 + transcript.len() + self.challenge.len());
        push_field(&mut buffer, transcript)?;
        push_field(&mut buffer, &self.challenge)?;
        Ok(buffer.into())
    }

    /// Deserializes the proof from its binary form.
    ///
    /// The whole of `bytes` must be consumed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut remainder = bytes;
        let transcript = take_field(&mut remainder, "transcript")?;
        let challenge = take_field(&mut remainder, "challenge")?;
        if !remainder.is_empty() {
            return Err(Error::MalformedProof(format!("{} trailing bytes", remainder.len())));
        }
        Ok(Self {
            transcript: CompressedTranscript::from_bytes(transcript),
            challenge: challenge.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_assert::{Deserializer, Serializer};

    use super::EncodedFiatShamirProof;
    use crate::{errors::Error, sigma::CompressedTranscript};

    fn proof() -> EncodedFiatShamirProof {
        EncodedFiatShamirProof {
            transcript: CompressedTranscript::from_bytes([1u8, 2, 3]),
            challenge: [0xffu8, 0x00].into(),
        }
    }

    #[test]
    fn binary_layout() {
        let bytes = proof().to_bytes().unwrap();
        assert_eq!(&*bytes, &[0, 0, 0, 3, 1, 2, 3, 0, 0, 0, 2, 0xff, 0x00]);
        assert_eq!(EncodedFiatShamirProof::from_bytes(&bytes).unwrap(), proof());
    }

    #[test]
    fn empty_fields() {
        let empty = EncodedFiatShamirProof {
            transcript: CompressedTranscript::from_bytes([0u8; 0]),
            challenge: [0u8; 0].into(),
        };
        let bytes = empty.to_bytes().unwrap();
        assert_eq!(&*bytes, &[0u8; 8]);
        assert_eq!(EncodedFiatShamirProof::from_bytes(&bytes).unwrap(), empty);
    }

    #[test]
    fn rejects_malformed() {
        let bytes = proof().to_bytes().unwrap();

        // Every truncation
        for len in 0..bytes.len() {
            assert!(matches!(
                EncodedFiatShamirProof::from_bytes(&bytes[..len]),
                Err(Error::MalformedProof(_))
            ));
        }

        // Trailing bytes
        let mut extended = bytes.into_vec();
        extended.push(0);
        assert!(matches!(
            EncodedFiatShamirProof::from_bytes(&extended),
            Err(Error::MalformedProof(_))
        ));

        // A length that runs past the end
        assert!(matches!(
            EncodedFiatShamirProof::from_bytes(&[0xff, 0xff, 0xff, 0xff, 0]),
            Err(Error::MalformedProof(_))
        ));
    }

    #[test]
    fn serde_roundtrip() {
        for human_readable in [true, false] {
            let serializer = Serializer::builder().is_human_readable(human_readable).build();
            let tokens = proof().serialize(&serializer).unwrap();
            let mut deserializer = Deserializer::builder(tokens).is_human_readable(human_readable).build();
            assert_eq!(EncodedFiatShamirProof::deserialize(&mut deserializer).unwrap(), proof());
        }
    }
}
