//! Error types.

use core::fmt;

/// Result type with `ppk-cipher`'s [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Cryptographic errors.
    Crypto,

    /// Invalid initialization vector size.
    IvSize,

    /// Invalid key size.
    KeySize,

    /// Invalid buffer length: not a multiple of the cipher's block size.
    Length,

    /// Unsupported cipher name.
    UnsupportedCipher(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Crypto => write!(f, "cryptographic error"),
            Error::IvSize => write!(f, "invalid initialization vector size"),
            Error::KeySize => write!(f, "invalid key size"),
            Error::Length => write!(f, "invalid length"),
            Error::UnsupportedCipher(name) => write!(f, "unsupported cipher: {name:?}"),
        }
    }
}

impl std::error::Error for Error {}
