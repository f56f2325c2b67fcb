//! The Fiat-Shamir transform of Sigma protocols into non-interactive proofs.

mod proof;

use alloc::boxed::Box;

use rand_core::CryptoRngCore;

use crate::{
    challenge::ChallengeSpace,
    errors::Error,
    sigma::{Challenge, SigmaProtocol, SigmaProtocolTranscript},
    tools::hashing::{ByteAccumulator, Chain},
};

pub use proof::{EncodedFiatShamirProof, FiatShamirProof};

/// The domain separation tag used by [`FiatShamirProofSystem::new`].
pub const DEFAULT_DOMAIN_SEPARATOR: &[u8] = b"sigma-nizk/FiatShamirProofSystem";

/// Turns a Sigma protocol into a non-interactive proof system.
///
/// The challenge is the hash (into the challenge space of the protocol) of
/// the domain separation tag, the encoded announcement, and the additional data,
/// each prefixed with its length as a big-endian `u64`.
///
/// Note that the statement itself is not part of the hash.
/// Protocols that need the challenge bound to the statement should commit to it
/// in the announcement encoding, or the callers should pass it as additional data.
#[derive(Debug, Clone)]
pub struct FiatShamirProofSystem<P> {
    protocol: P,
    domain_separator: Box<[u8]>,
}

impl<P: SigmaProtocol> FiatShamirProofSystem<P> {
    /// Creates a proof system with the [default domain separator](`DEFAULT_DOMAIN_SEPARATOR`).
    pub fn new(protocol: P) -> Self {
        Self::with_domain_separator(protocol, DEFAULT_DOMAIN_SEPARATOR)
    }

    /// Creates a proof system with a custom domain separation tag.
    ///
    /// Proofs created with one tag do not verify under another.
    pub fn with_domain_separator(protocol: P, domain_separator: &[u8]) -> Self {
        Self {
            protocol,
            domain_separator: domain_separator.into(),
        }
    }

    /// The underlying Sigma protocol.
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// The domain separation tag.
    pub fn domain_separator(&self) -> &[u8] {
        &self.domain_separator
    }

    fn derive_challenge(
        &self,
        common: &P::CommonInput,
        announcement: &P::Announcement,
        additional_data: &[u8],
    ) -> Result<Challenge<P>, Error> {
        let encoded_announcement = self.protocol.encode_announcement(announcement)?;
        let preimage = ByteAccumulator::new_with_dst(&self.domain_separator)
            .chain_bytes(&encoded_announcement)
            .chain_bytes(additional_data)
            .finalize();
        Ok(self
            .protocol
            .challenge_space(common)
            .hash_into_challenge_space(&preimage))
    }

    /// Creates a proof of knowledge of `secret` for the statement `common`.
    pub fn create_proof(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &P::CommonInput,
        secret: &P::SecretInput,
    ) -> Result<FiatShamirProof<P>, Error> {
        self.create_proof_with_additional_data(rng, common, secret, &[])
    }

    /// Creates a proof of knowledge of `secret` for the statement `common`,
    /// bound to `additional_data`.
    ///
    /// The same additional data must be supplied for the proof to verify.
    pub fn create_proof_with_additional_data(
        &self,
        rng: &mut impl CryptoRngCore,
        common: &P::CommonInput,
        secret: &P::SecretInput,
        additional_data: &[u8],
    ) -> Result<FiatShamirProof<P>, Error> {
        let announcement_secret = self.protocol.generate_announcement_secret(rng, common, secret)?;
        let announcement = self
            .protocol
            .generate_announcement(common, secret, &announcement_secret);
        let challenge = self.derive_challenge(common, &announcement, additional_data)?;
        let response =
            self.protocol
                .generate_response(common, secret, &announcement, announcement_secret, &challenge);

        let transcript = SigmaProtocolTranscript::new(announcement, challenge, response);
        let compressed_transcript = self.protocol.compress_transcript(common, &transcript)?;
        let (_announcement, challenge, _response) = transcript.into_parts();

        tracing::trace!(
            "Created a proof with a {}-byte transcript",
            compressed_transcript.as_bytes().len()
        );
        Ok(FiatShamirProof::new(compressed_transcript, challenge))
    }

    /// Checks a proof created without additional data.
    pub fn check_proof(&self, common: &P::CommonInput, proof: &FiatShamirProof<P>) -> bool {
        self.check_proof_with_additional_data(common, proof, &[])
    }

    /// Checks a proof against the statement and the additional data it was created with.
    ///
    /// Returns `false` on any failure, including malformed proofs.
    pub fn check_proof_with_additional_data(
        &self,
        common: &P::CommonInput,
        proof: &FiatShamirProof<P>,
        additional_data: &[u8],
    ) -> bool {
        log_rejection(self.verify_proof_with_additional_data(common, proof, additional_data))
    }

    /// Verifies a proof, returning the reason of rejection on failure.
    pub fn verify_proof_with_additional_data(
        &self,
        common: &P::CommonInput,
        proof: &FiatShamirProof<P>,
        additional_data: &[u8],
    ) -> Result<(), Error> {
        let transcript =
            self.protocol
                .decompress_transcript(common, proof.challenge(), proof.compressed_transcript())?;

        if transcript.challenge() != proof.challenge() {
            return Err(Error::ChallengeMismatch);
        }

        if !self.protocol.check_transcript(common, &transcript) {
            return Err(Error::InvalidTranscript);
        }

        let recomputed = self.derive_challenge(common, transcript.announcement(), additional_data)?;
        if &recomputed != transcript.challenge() {
            return Err(Error::ChallengeHashMismatch);
        }

        Ok(())
    }

    /// Converts a proof into its encoded form.
    pub fn encode_proof(&self, common: &P::CommonInput, proof: &FiatShamirProof<P>) -> EncodedFiatShamirProof {
        EncodedFiatShamirProof {
            transcript: proof.compressed_transcript().clone(),
            challenge: self.protocol.challenge_space(common).encode_challenge(proof.challenge()),
        }
    }

    /// Restores a proof from its encoded form.
    ///
    /// Only the challenge is decoded here; the transcript is decoded during verification.
    pub fn restore_proof(
        &self,
        common: &P::CommonInput,
        encoded: &EncodedFiatShamirProof,
    ) -> Result<FiatShamirProof<P>, Error> {
        let challenge = self.protocol.restore_challenge(common, &encoded.challenge)?;
        Ok(FiatShamirProof::new(encoded.transcript.clone(), challenge))
    }

    /// Checks a proof in the binary form of [`EncodedFiatShamirProof::to_bytes`]
    /// created without additional data.
    pub fn check_encoded_proof(&self, common: &P::CommonInput, proof_bytes: &[u8]) -> bool {
        self.check_encoded_proof_with_additional_data(common, proof_bytes, &[])
    }

    /// Checks a proof in the binary form of [`EncodedFiatShamirProof::to_bytes`].
    ///
    /// Decoding failures count as rejection.
    pub fn check_encoded_proof_with_additional_data(
        &self,
        common: &P::CommonInput,
        proof_bytes: &[u8],
        additional_data: &[u8],
    ) -> bool {
        let result = EncodedFiatShamirProof::from_bytes(proof_bytes)
            .and_then(|encoded| self.restore_proof(common, &encoded))
            .and_then(|proof| self.verify_proof_with_additional_data(common, &proof, additional_data));
        log_rejection(result)
    }
}

fn log_rejection(result: Result<(), Error>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!("Proof rejected: {err}");
            false
        }
    }
}
