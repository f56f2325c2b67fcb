//! The canonical binary encoding of protocol messages.

use alloc::{boxed::Box, format};

use bincode::config::{BigEndian, Configuration, Fixint, Limit};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Error;

/// The upper bound on the size of a single encoded message.
pub(crate) const MAX_ENCODED_LEN: usize = 1 << 20;

// Fixed-width integers make the encoding of a given type independent of the values,
// and the limit prevents allocations driven by adversarial length prefixes.
const CONFIG: Configuration<BigEndian, Fixint, Limit<MAX_ENCODED_LEN>> = bincode::config::standard()
    .with_big_endian()
    .with_fixed_int_encoding()
    .with_limit::<MAX_ENCODED_LEN>();

/// Encodes a value into its canonical byte representation.
pub(crate) fn to_bytes<T: Serialize>(value: &T) -> Result<Box<[u8]>, Error> {
    bincode::serde::encode_to_vec(value, CONFIG)
        .map(Into::into)
        .map_err(|err| Error::Encoding(format!("{err}")))
}

/// Decodes a value from its canonical byte representation, rejecting trailing bytes.
///
/// Errors are reported as [`Error::MalformedTranscript`] since this is how
/// the decoded messages arrive from the other party.
pub(crate) fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    let (value, read) = bincode::serde::decode_from_slice::<T, _>(bytes, CONFIG)
        .map_err(|err| Error::MalformedTranscript(format!("{err}")))?;
    if read != bytes.len() {
        return Err(Error::MalformedTranscript(format!(
            "{} trailing bytes",
            bytes.len() - read
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{from_bytes, to_bytes};
    use crate::errors::Error;

    #[test]
    fn fixed_width_big_endian() {
        let bytes = to_bytes(&(1u64, 2u32)).unwrap();
        assert_eq!(&*bytes, &[0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 2]);
        assert_eq!(from_bytes::<(u64, u32)>(&bytes).unwrap(), (1, 2));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = to_bytes(&7u64).unwrap().into_vec();
        bytes.push(0);
        assert!(matches!(from_bytes::<u64>(&bytes), Err(Error::MalformedTranscript(_))));
    }

    #[test]
    fn rejects_oversized_length_prefix() {
        // A `Vec<u8>` claiming `u64::MAX` elements.
        let bytes = [0xffu8; 8];
        assert!(matches!(
            from_bytes::<Vec<u8>>(&bytes),
            Err(Error::MalformedTranscript(_))
        ));
    }
}
