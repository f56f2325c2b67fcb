//! Signatures of knowledge: Fiat-Shamir proofs with the message as additional data.

use derive_where::derive_where;
use rand_core::CryptoRngCore;
use signature::{RandomizedSigner, Verifier};

use crate::{
    fiat_shamir::{FiatShamirProof, FiatShamirProofSystem},
    sigma::SigmaProtocol,
};

/// Signs messages by proving knowledge of a witness for a fixed statement.
#[derive_where(Clone, Copy)]
pub struct KnowledgeSigner<'a, P: SigmaProtocol> {
    system: &'a FiatShamirProofSystem<P>,
    common: &'a P::CommonInput,
    secret: &'a P::SecretInput,
}

impl<'a, P: SigmaProtocol> KnowledgeSigner<'a, P> {
    /// Creates a signer for the statement `common` with the witness `secret`.
    pub fn new(system: &'a FiatShamirProofSystem<P>, common: &'a P::CommonInput, secret: &'a P::SecretInput) -> Self {
        Self { system, common, secret }
    }

    /// Returns the verifier for the signatures of this signer.
    pub fn verifier(&self) -> KnowledgeVerifier<'a, P> {
        KnowledgeVerifier::new(self.system, self.common)
    }
}

impl<P: SigmaProtocol> RandomizedSigner<FiatShamirProof<P>> for KnowledgeSigner<'_, P> {
    fn try_sign_with_rng(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<FiatShamirProof<P>, signature::Error> {
        self.system
            .create_proof_with_additional_data(rng, self.common, self.secret, msg)
            .map_err(|err| {
                tracing::debug!("Failed to create a signature of knowledge: {err}");
                signature::Error::new()
            })
    }
}

/// Verifies signatures of knowledge for a fixed statement.
#[derive_where(Clone, Copy)]
pub struct KnowledgeVerifier<'a, P: SigmaProtocol> {
    system: &'a FiatShamirProofSystem<P>,
    common: &'a P::CommonInput,
}

impl<'a, P: SigmaProtocol> KnowledgeVerifier<'a, P> {
    /// Creates a verifier for the statement `common`.
    pub fn new(system: &'a FiatShamirProofSystem<P>, common: &'a P::CommonInput) -> Self {
        Self { system, common }
    }
}

impl<P: SigmaProtocol> Verifier<FiatShamirProof<P>> for KnowledgeVerifier<'_, P> {
    fn verify(&self, msg: &[u8], signature: &FiatShamirProof<P>) -> Result<(), signature::Error> {
        self.system
            .verify_proof_with_additional_data(self.common, signature, msg)
            .map_err(|err| {
                tracing::debug!("Signature of knowledge rejected: {err}");
                signature::Error::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use rand_core::OsRng;
    use signature::{RandomizedSigner, Verifier};

    use super::{KnowledgeSigner, KnowledgeVerifier};
    use crate::{dev::ToyDlog, fiat_shamir::FiatShamirProofSystem};

    #[test_log::test]
    fn sign_and_verify() {
        let system = FiatShamirProofSystem::new(ToyDlog);
        let witness = 7;
        let statement = ToyDlog::statement(witness);

        let signer = KnowledgeSigner::new(&system, &statement, &witness);
        let signature = signer.sign_with_rng(&mut OsRng, b"message");

        let verifier = signer.verifier();
        assert!(verifier.verify(b"message", &signature).is_ok());
        assert!(verifier.verify(b"massage", &signature).is_err());

        let other_statement = ToyDlog::statement(witness + 1);
        let other_verifier = KnowledgeVerifier::new(&system, &other_statement);
        assert!(other_verifier.verify(b"message", &signature).is_err());
    }

    #[test]
    fn signing_with_wrong_witness_fails() {
        let system = FiatShamirProofSystem::new(ToyDlog);
        let statement = ToyDlog::statement(7);
        let witness = 8;
        let signer = KnowledgeSigner::new(&system, &statement, &witness);
        assert!(signer.try_sign_with_rng(&mut OsRng, b"message").is_err());
    }
}
