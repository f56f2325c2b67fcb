use alloc::{
    format,
    string::{String, ToString},
};
use core::marker::PhantomData;

use derive_where::derive_where;
use elliptic_curve::{
    ff::{Field, PrimeField},
    group::{Group, GroupEncoding},
};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_encoded_bytes::{Hex, SliceLike};
use zeroize::Zeroize;

use crate::{
    challenge::PrimeFieldChallengeSpace,
    errors::Error,
    sigma::{Challenge, CompressedTranscript, SigmaProtocol, SigmaProtocolSimulator, SigmaProtocolTranscript},
    tools::Secret,
};

/// A group element serialized with its canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point<G>(pub G);

impl<'a, G: GroupEncoding> TryFrom<&'a [u8]> for Point<G> {
    type Error = String;
    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        let mut repr = G::Repr::default();
        if repr.as_ref().len() != bytes.len() {
            return Err(format!(
                "expected {} bytes, got {}",
                repr.as_ref().len(),
                bytes.len()
            ));
        }
        repr.as_mut().copy_from_slice(bytes);
        Option::<G>::from(G::from_bytes(&repr))
            .map(Self)
            .ok_or_else(|| "invalid group element encoding".to_string())
    }
}

impl<G: GroupEncoding> Serialize for Point<G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.0.to_bytes(), serializer)
    }
}

impl<'de, G: GroupEncoding> Deserialize<'de> for Point<G> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}

/// A field element serialized with its canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar<F>(pub F);

impl<'a, F: PrimeField> TryFrom<&'a [u8]> for Scalar<F> {
    type Error = String;
    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        let mut repr = F::Repr::default();
        if repr.as_ref().len() != bytes.len() {
            return Err(format!(
                "expected {} bytes, got {}",
                repr.as_ref().len(),
                bytes.len()
            ));
        }
        repr.as_mut().copy_from_slice(bytes);
        Option::<F>::from(F::from_repr(repr))
            .map(Self)
            .ok_or_else(|| "not a canonical field element".to_string())
    }
}

impl<F: PrimeField> Serialize for Scalar<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.0.to_repr(), serializer)
    }
}

impl<'de, F: PrimeField> Deserialize<'de> for Scalar<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}

/// Schnorr proof of knowledge of a discrete logarithm in a prime-order group `G`.
///
/// Publish `X` and prove that we know a secret `x` such that `g * x = X`,
/// where `g` is the generator of `G`.
///
/// The compressed transcript only contains the response,
/// since the announcement is recomputable as `g * z - X * c`.
#[derive_where(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schnorr<G>(PhantomData<G>);

impl<G> Schnorr<G> {
    /// Creates the protocol.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<G: Group> Schnorr<G> {
    /// Returns the statement `g * x` for the witness `x`.
    pub fn statement(witness: &G::Scalar) -> G {
        G::generator() * witness
    }

    fn recompute_announcement(common: &G, challenge: &G::Scalar, response: &G::Scalar) -> G {
        G::generator() * response - *common * challenge
    }
}

impl<G> SigmaProtocol for Schnorr<G>
where
    G: Group + GroupEncoding,
    G::Scalar: Zeroize,
{
    type CommonInput = G;
    type SecretInput = G::Scalar;
    type AnnouncementSecret = Secret<G::Scalar>;
    type Announcement = Point<G>;
    type Response = Scalar<G::Scalar>;
    type ChallengeSpace = PrimeFieldChallengeSpace<G::Scalar>;

    fn generate_announcement_secret(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &G,
        secret: &G::Scalar,
    ) -> Result<Self::AnnouncementSecret, Error> {
        if Self::statement(secret) != *common {
            return Err(Error::InconsistentWitness);
        }
        Ok(Secret::new(G::Scalar::random(rng)))
    }

    fn generate_announcement(
        &self,
        _common: &G,
        _secret: &G::Scalar,
        announcement_secret: &Self::AnnouncementSecret,
    ) -> Point<G> {
        Point(G::generator() * announcement_secret.expose_secret())
    }

    fn generate_response(
        &self,
        _common: &G,
        secret: &G::Scalar,
        _announcement: &Point<G>,
        announcement_secret: Self::AnnouncementSecret,
        challenge: &G::Scalar,
    ) -> Scalar<G::Scalar> {
        Scalar(*announcement_secret.expose_secret() + *challenge * secret)
    }

    fn check_transcript(&self, common: &G, transcript: &SigmaProtocolTranscript<Self>) -> bool {
        let expected = Self::recompute_announcement(common, transcript.challenge(), &transcript.response().0);
        expected == transcript.announcement().0
    }

    fn challenge_space(&self, _common: &G) -> Self::ChallengeSpace {
        PrimeFieldChallengeSpace::new()
    }

    fn compress_transcript(
        &self,
        _common: &G,
        transcript: &SigmaProtocolTranscript<Self>,
    ) -> Result<CompressedTranscript, Error> {
        CompressedTranscript::encode(transcript.response())
    }

    fn decompress_transcript(
        &self,
        common: &G,
        challenge: &G::Scalar,
        compressed: &CompressedTranscript,
    ) -> Result<SigmaProtocolTranscript<Self>, Error> {
        let response = compressed.decode::<Scalar<G::Scalar>>()?;
        let announcement = Self::recompute_announcement(common, challenge, &response.0);
        Ok(SigmaProtocolTranscript::new(Point(announcement), *challenge, response))
    }
}

impl<G> SigmaProtocolSimulator for Schnorr<G>
where
    G: Group + GroupEncoding,
    G::Scalar: Zeroize,
{
    fn simulate_transcript(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &G,
        challenge: &Challenge<Self>,
    ) -> SigmaProtocolTranscript<Self> {
        let response = G::Scalar::random(rng);
        let announcement = Self::recompute_announcement(common, challenge, &response);
        SigmaProtocolTranscript::new(Point(announcement), *challenge, Scalar(response))
    }
}
