#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    missing_docs,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::indexing_slicing))]

/*!
## Features

`dev`: Non-production protocols ([`dev::ToyDlog`], [`dev::Schnorr`]) for testing and benchmarking.
See the [`dev`] module.
*/

extern crate alloc;

mod challenge;
mod errors;
mod fiat_shamir;
mod params;
mod sigma;
mod signature_of_knowledge;
mod tools;

#[cfg(any(test, feature = "dev"))]
pub mod dev;

pub use challenge::{BitChallengeSpace, ChallengeSpace, PrimeFieldChallengeSpace};
pub use errors::Error;
pub use fiat_shamir::{EncodedFiatShamirProof, FiatShamirProof, FiatShamirProofSystem, DEFAULT_DOMAIN_SEPARATOR};
pub use params::{HashParams, Shake128Params, Shake256Params};
pub use sigma::{
    run_interactive, Challenge, CompressedTranscript, InteractiveRun, SigmaProtocol, SigmaProtocolSimulator,
    SigmaProtocolTranscript,
};
pub use signature_of_knowledge::{KnowledgeSigner, KnowledgeVerifier};
pub use tools::{BitVec, Secret};

// Some re-exports to avoid the need for version-matching
pub use signature;
