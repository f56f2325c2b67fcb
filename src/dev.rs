//! Non-production Sigma protocols, for testing and benchmarking.

mod schnorr;
mod toy;

pub use schnorr::{Point, Scalar, Schnorr};
pub use toy::{ToyChallengeSpace, ToyDlog, TOY_GENERATOR, TOY_GROUP_ORDER, TOY_MODULUS};
