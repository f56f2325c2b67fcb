//! Sigma protocols: three-move arguments of knowledge.

mod interactive;
mod transcript;

use alloc::boxed::Box;
use core::fmt::Debug;

use rand_core::CryptoRngCore;
use serde::{de::DeserializeOwned, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::{challenge::ChallengeSpace, errors::Error, tools::encoding};

pub use interactive::{run_interactive, InteractiveRun};
pub use transcript::{CompressedTranscript, SigmaProtocolTranscript};

/// The challenge type of a Sigma protocol.
pub type Challenge<P> = <<P as SigmaProtocol>::ChallengeSpace as ChallengeSpace>::Challenge;

/// A three-move argument of knowledge: announcement, challenge, response.
///
/// Implementations are pure value transforms: all the state of a run lives in
/// the values passed between the methods, so a single protocol object can serve
/// any number of independent (and concurrent) runs.
///
/// The announcement secret is moved into [`generate_response`](`Self::generate_response`),
/// so it cannot be reused for a second run.
/// Reusing it would reveal the witness.
pub trait SigmaProtocol: Sized {
    /// The public statement.
    type CommonInput;
    /// The witness.
    type SecretInput;
    /// The per-run randomness of the prover.
    type AnnouncementSecret: ZeroizeOnDrop;
    /// The first message of the prover.
    type Announcement: Debug + Clone + PartialEq + Serialize + DeserializeOwned;
    /// The second message of the prover.
    type Response: Debug + Clone + PartialEq + Serialize + DeserializeOwned;
    /// The space challenges are drawn from.
    type ChallengeSpace: ChallengeSpace;

    /// Generates the per-run randomness.
    ///
    /// Fails with [`Error::InconsistentWitness`] if the protocol can tell that
    /// `secret` does not satisfy `common`.
    fn generate_announcement_secret(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &Self::CommonInput,
        secret: &Self::SecretInput,
    ) -> Result<Self::AnnouncementSecret, Error>;

    /// Computes the announcement.
    fn generate_announcement(
        &self,
        common: &Self::CommonInput,
        secret: &Self::SecretInput,
        announcement_secret: &Self::AnnouncementSecret,
    ) -> Self::Announcement;

    /// Computes the response to `challenge`, consuming the announcement secret.
    fn generate_response(
        &self,
        common: &Self::CommonInput,
        secret: &Self::SecretInput,
        announcement: &Self::Announcement,
        announcement_secret: Self::AnnouncementSecret,
        challenge: &Challenge<Self>,
    ) -> Self::Response;

    /// The verification predicate of the interactive verifier.
    fn check_transcript(&self, common: &Self::CommonInput, transcript: &SigmaProtocolTranscript<Self>) -> bool;

    /// Returns the challenge space for the given statement.
    fn challenge_space(&self, common: &Self::CommonInput) -> Self::ChallengeSpace;

    /// Returns the canonical encoding of an announcement (used as the hash input for challenges).
    fn encode_announcement(&self, announcement: &Self::Announcement) -> Result<Box<[u8]>, Error> {
        encoding::to_bytes(announcement)
    }

    /// Produces the minimal encoding of a transcript this protocol produced for `common`.
    ///
    /// Must be left inverse to [`decompress_transcript`](`Self::decompress_transcript`).
    /// The challenge is always stored alongside, so it never needs to be included.
    ///
    /// The default implementation encodes the announcement and the response.
    /// Protocols where the announcement is recomputable from the challenge and the response
    /// should override this to omit it.
    fn compress_transcript(
        &self,
        _common: &Self::CommonInput,
        transcript: &SigmaProtocolTranscript<Self>,
    ) -> Result<CompressedTranscript, Error> {
        CompressedTranscript::encode(&(transcript.announcement(), transcript.response()))
    }

    /// Reconstructs a transcript from its compressed form and the challenge.
    ///
    /// Fails on a malformed compressed transcript.
    /// The returned transcript must carry `challenge`.
    fn decompress_transcript(
        &self,
        _common: &Self::CommonInput,
        challenge: &Challenge<Self>,
        compressed: &CompressedTranscript,
    ) -> Result<SigmaProtocolTranscript<Self>, Error> {
        let (announcement, response) = compressed.decode::<(Self::Announcement, Self::Response)>()?;
        Ok(SigmaProtocolTranscript::new(announcement, challenge.clone(), response))
    }

    /// Restores a challenge from its canonical encoding.
    fn restore_challenge(&self, common: &Self::CommonInput, encoded: &[u8]) -> Result<Challenge<Self>, Error> {
        self.challenge_space(common).restore_challenge(encoded)
    }
}

/// A Sigma protocol that is special honest-verifier zero-knowledge.
pub trait SigmaProtocolSimulator: SigmaProtocol {
    /// Produces an accepting transcript for `challenge` without the witness,
    /// distributed as a real run with this challenge.
    fn simulate_transcript(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &Self::CommonInput,
        challenge: &Challenge<Self>,
    ) -> SigmaProtocolTranscript<Self>;
}
