use alloc::boxed::Box;
use core::fmt::Debug;

use secrecy::{ExposeSecret, SecretBox};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A helper wrapper for managing ephemeral secret values.
///
/// On top of `secrecy::SecretBox` functionality, it provides:
/// - Safe `Debug` implementation
/// - Single-use semantics: the wrapper is deliberately neither `Clone` nor `Copy`,
///   so a value moved into a consuming function cannot be used again.
///
/// The wrapped value is zeroized when the wrapper is dropped.
pub struct Secret<T: Zeroize>(SecretBox<T>);

impl<T: Zeroize> Secret<T> {
    /// Wraps a value.
    pub fn new(value: T) -> Self {
        Self(SecretBox::new(Box::new(value)))
    }

    /// Exposes the wrapped value.
    pub fn expose_secret(&self) -> &T {
        self.0.expose_secret()
    }
}

impl<T: Zeroize> ZeroizeOnDrop for Secret<T> {}

impl<T> Debug for Secret<T>
where
    T: Zeroize,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Secret<{}>(...)", core::any::type_name::<T>())
    }
}
