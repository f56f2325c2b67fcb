use alloc::boxed::Box;

use derive_where::derive_where;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_encoded_bytes::{Hex, SliceLike};

use super::{Challenge, SigmaProtocol};
use crate::{errors::Error, tools::encoding};

/// The record of one run of a Sigma protocol.
#[derive_where(Debug, Clone, PartialEq)]
pub struct SigmaProtocolTranscript<P: SigmaProtocol> {
    announcement: P::Announcement,
    challenge: Challenge<P>,
    response: P::Response,
}

impl<P: SigmaProtocol> SigmaProtocolTranscript<P> {
    /// Creates a transcript out of the three messages.
    pub fn new(announcement: P::Announcement, challenge: Challenge<P>, response: P::Response) -> Self {
        Self {
            announcement,
            challenge,
            response,
        }
    }

    /// The first message of the prover.
    pub fn announcement(&self) -> &P::Announcement {
        &self.announcement
    }

    /// The challenge of the verifier.
    pub fn challenge(&self) -> &Challenge<P> {
        &self.challenge
    }

    /// The second message of the prover.
    pub fn response(&self) -> &P::Response {
        &self.response
    }

    /// Splits the transcript into the announcement, the challenge, and the response.
    pub fn into_parts(self) -> (P::Announcement, Challenge<P>, P::Response) {
        (self.announcement, self.challenge, self.response)
    }
}

/// The protocol-specific minimal encoding of a transcript, without the challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedTranscript(#[serde(with = "SliceLike::<Hex>")] Box<[u8]>);

impl CompressedTranscript {
    /// Wraps an already encoded transcript.
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Encodes `value` with the canonical encoding.
    pub fn encode<T: Serialize>(value: &T) -> Result<Self, Error> {
        encoding::to_bytes(value).map(Self)
    }

    /// Decodes a value encoded with [`encode`](`Self::encode`).
    ///
    /// Fails with [`Error::MalformedTranscript`] on malformed input or trailing bytes.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        encoding::from_bytes(&self.0)
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_assert::{Deserializer, Serializer};

    use super::CompressedTranscript;
    use crate::errors::Error;

    #[test]
    fn encode_decode() {
        let compressed = CompressedTranscript::encode(&(3u64, 4u64)).unwrap();
        assert_eq!(compressed.as_bytes().len(), 16);
        assert_eq!(compressed.decode::<(u64, u64)>().unwrap(), (3, 4));
        assert!(matches!(compressed.decode::<u64>(), Err(Error::MalformedTranscript(_))));
        assert!(matches!(
            compressed.decode::<(u64, u64, u64)>(),
            Err(Error::MalformedTranscript(_))
        ));
    }

    #[test]
    fn serde_roundtrip() {
        let compressed = CompressedTranscript::from_bytes([0xabu8, 0x01]);

        for human_readable in [true, false] {
            let serializer = Serializer::builder().is_human_readable(human_readable).build();
            let tokens = compressed.serialize(&serializer).unwrap();
            let mut deserializer = Deserializer::builder(tokens).is_human_readable(human_readable).build();
            assert_eq!(CompressedTranscript::deserialize(&mut deserializer).unwrap(), compressed);
        }
    }
}
