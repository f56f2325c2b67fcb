pub(crate) mod bitvec;
pub(crate) mod encoding;
pub(crate) mod hashing;
mod secret;

pub use bitvec::BitVec;
pub use secret::Secret;
