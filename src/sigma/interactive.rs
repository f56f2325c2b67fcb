use derive_where::derive_where;
use rand_core::CryptoRngCore;

use super::{SigmaProtocol, SigmaProtocolTranscript};
use crate::{challenge::ChallengeSpace, errors::Error};

/// The outcome of an interactive run with an honest verifier.
#[derive_where(Debug, Clone)]
pub struct InteractiveRun<P: SigmaProtocol> {
    /// The messages exchanged.
    pub transcript: SigmaProtocolTranscript<P>,
    /// The decision of the verifier.
    pub accepted: bool,
}

/// Runs the prover against an honest verifier that samples a uniformly random challenge.
pub fn run_interactive<P: SigmaProtocol>(
    protocol: &P,
    rng: &mut impl CryptoRngCore,
    common: &P::CommonInput,
    secret: &P::SecretInput,
) -> Result<InteractiveRun<P>, Error> {
    // Prover
    let announcement_secret = protocol.generate_announcement_secret(rng, common, secret)?;
    let announcement = protocol.generate_announcement(common, secret, &announcement_secret);

    // Verifier
    let challenge = protocol.challenge_space(common).random_challenge(rng);

    // Prover
    let response = protocol.generate_response(common, secret, &announcement, announcement_secret, &challenge);

    // Verifier
    let transcript = SigmaProtocolTranscript::new(announcement, challenge, response);
    let accepted = protocol.check_transcript(common, &transcript);

    Ok(InteractiveRun { transcript, accepted })
}
