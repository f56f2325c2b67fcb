use alloc::string::String;

/// Errors of proof creation, verification, and message decoding.
#[derive(displaydoc::Display, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The secret input does not satisfy the common input.
    InconsistentWitness,
    /// Failed to encode a protocol message: {0}
    Encoding(String),
    /// Malformed proof encoding: {0}
    MalformedProof(String),
    /// Malformed challenge encoding: {0}
    MalformedChallenge(String),
    /// Malformed compressed transcript: {0}
    MalformedTranscript(String),
    /// The decompressed transcript does not carry the challenge of the proof.
    ChallengeMismatch,
    /// The transcript does not satisfy the verification predicate of the protocol.
    InvalidTranscript,
    /// The challenge does not match the hash of the announcement and the additional data.
    ChallengeHashMismatch,
}

impl core::error::Error for Error {}

impl Error {
    /// Returns `true` if the error means the verified input was malformed,
    /// as opposed to well-formed but rejected.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedProof(_) | Self::MalformedChallenge(_) | Self::MalformedTranscript(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Error;

    #[test]
    fn messages() {
        assert_eq!(
            Error::MalformedChallenge("out of range".into()).to_string(),
            "Malformed challenge encoding: out of range"
        );
        assert_eq!(
            Error::InconsistentWitness.to_string(),
            "The secret input does not satisfy the common input."
        );
    }

    #[test]
    fn malformed_input_classification() {
        assert!(Error::MalformedTranscript("short".into()).is_malformed_input());
        assert!(!Error::ChallengeHashMismatch.is_malformed_input());
        assert!(!Error::InconsistentWitness.is_malformed_input());
    }
}
