use alloc::{boxed::Box, vec::Vec};

use digest::{ExtendableOutput, Update};

use crate::params::HashParams;

/// A digest object that takes byte slices.
pub(crate) trait Chain: Sized {
    /// Hash raw bytes.
    ///
    /// Note: only for impls in specific types, do not use directly.
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self;

    /// Hash a bytestring that is known to be constant-sized
    /// (e.g. byte representation of a built-in integer).
    fn chain_constant_sized_bytes(self, bytes: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        self.chain_raw_bytes(bytes.as_ref())
    }

    /// Hash raw bytes in a collision-resistant way.
    fn chain_bytes(self, bytes: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        // Hash the length too to prevent hash conflicts. (e.g. H(AB|CD) == H(ABC|D)).
        // Not strictly necessary for fixed-size arrays, but it's easier to just always do it.
        let len = (bytes.as_ref().len() as u64).to_be_bytes();
        self.chain_constant_sized_bytes(&len)
            .chain_raw_bytes(bytes.as_ref())
    }
}

/// Wraps an extendable output hash for easier replacement, and standardizes the use of DST.
pub(crate) struct XofHasher<H: HashParams>(H::Digest);

impl<H: HashParams> Chain for XofHasher<H> {
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self {
        let mut digest = self.0;
        digest.update(bytes);
        Self(digest)
    }
}

impl<H: HashParams> XofHasher<H> {
    fn new() -> Self {
        Self(H::Digest::default())
    }

    pub fn new_with_dst(dst: &[u8]) -> Self {
        Self::new().chain_bytes(dst)
    }

    pub fn finalize_to_reader(self) -> <H::Digest as ExtendableOutput>::Reader {
        self.0.finalize_xof()
    }
}

/// Collects an unambiguous byte string out of chained fields.
///
/// Used where a collaborator expects a single byte string (e.g. a challenge space)
/// instead of a digest object.
#[derive(Debug, Clone, Default)]
pub(crate) struct ByteAccumulator(Vec<u8>);

impl Chain for ByteAccumulator {
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self {
        let mut acc = self.0;
        acc.extend_from_slice(bytes);
        Self(acc)
    }
}

impl ByteAccumulator {
    pub fn new_with_dst(dst: &[u8]) -> Self {
        Self::default().chain_bytes(dst)
    }

    pub fn finalize(self) -> Box<[u8]> {
        self.0.into()
    }
}

#[cfg(test)]
mod tests {
    use digest::XofReader;

    use super::{ByteAccumulator, Chain, XofHasher};
    use crate::params::Shake256Params;

    #[test]
    fn length_prefixing_prevents_boundary_shifts() {
        let ab_cd = ByteAccumulator::new_with_dst(b"test")
            .chain_bytes(b"AB")
            .chain_bytes(b"CD")
            .finalize();
        let abc_d = ByteAccumulator::new_with_dst(b"test")
            .chain_bytes(b"ABC")
            .chain_bytes(b"D")
            .finalize();
        assert_ne!(ab_cd, abc_d);
    }

    #[test]
    fn accumulator_layout() {
        let bytes = ByteAccumulator::new_with_dst(b"d").chain_bytes(b"xy").finalize();
        assert_eq!(
            &*bytes,
            &[0, 0, 0, 0, 0, 0, 0, 1, b'd', 0, 0, 0, 0, 0, 0, 0, 2, b'x', b'y']
        );
    }

    #[test]
    fn xof_is_deterministic_and_separated() {
        let read = |dst: &[u8], msg: &[u8]| {
            let mut reader = XofHasher::<Shake256Params>::new_with_dst(dst)
                .chain_bytes(msg)
                .finalize_to_reader();
            let mut out = [0u8; 32];
            reader.read(&mut out);
            out
        };
        assert_eq!(read(b"a", b"msg"), read(b"a", b"msg"));
        assert_ne!(read(b"a", b"msg"), read(b"b", b"msg"));
        assert_ne!(read(b"a", b"msg"), read(b"a", b"msh"));
    }
}
