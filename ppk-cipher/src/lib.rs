#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::arithmetic_side_effects,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

mod error;

pub use crate::error::{Error, Result};

use aes::Aes256;
use cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use core::{fmt, str};

/// AES-256 in cipher block chaining (CBC) mode.
const AES256_CBC: &str = "aes256-cbc";

/// AES-256 in counter (CTR) mode.
const AES256_CTR: &str = "aes256-ctr";

/// Counter mode with a 128-bit big endian counter.
type Ctr128BE<C> = ctr::Ctr128BE<C>;

/// Cipher algorithms.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Cipher {
    /// No cipher (unencrypted).
    None,

    /// AES-256 in cipher block chaining (CBC) mode, applied without
    /// padding. Used by PPK private key payloads.
    Aes256Cbc,

    /// AES-256 in counter (CTR) mode. Used by encrypted `openssh-key-v1`
    /// containers.
    Aes256Ctr,
}

impl Cipher {
    /// Decode cipher algorithm from the given `ciphername`.
    ///
    /// # Supported cipher names
    /// - `none`
    /// - `aes256-cbc`
    /// - `aes256-ctr`
    pub fn new(ciphername: &str) -> Result<Self> {
        ciphername.parse()
    }

    /// Get the string identifier which corresponds to this algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Aes256Cbc => AES256_CBC,
            Self::Aes256Ctr => AES256_CTR,
        }
    }

    /// Get the key and IV size for this cipher in bytes.
    pub fn key_and_iv_size(self) -> Option<(usize, usize)> {
        match self {
            Self::None => None,
            Self::Aes256Cbc | Self::Aes256Ctr => Some((32, 16)),
        }
    }

    /// Get the block size for this cipher in bytes.
    ///
    /// The `none` cipher reports the 8-byte padding granularity OpenSSH
    /// applies to unencrypted private key sections.
    pub fn block_size(self) -> usize {
        match self {
            Self::None => 8,
            Self::Aes256Cbc | Self::Aes256Ctr => 16,
        }
    }

    /// Compute the length of padding necessary to pad the given input to
    /// the block size.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn padding_len(self, input_size: usize) -> usize {
        match input_size % self.block_size() {
            0 => 0,
            input_rem => self.block_size() - input_rem,
        }
    }

    /// Is this cipher `none`?
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    /// Is the cipher anything other than `none`?
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Decrypt the ciphertext in `buffer` in-place using this cipher.
    ///
    /// No padding is removed: callers are responsible for interpreting the
    /// full plaintext, whose length always equals the ciphertext length.
    ///
    /// Returns [`Error::Length`] if `buffer` is not a multiple of the
    /// cipher's block size.
    pub fn decrypt(self, key: &[u8], iv: &[u8], buffer: &mut [u8]) -> Result<()> {
        self.check_key_and_iv(key, iv)?;

        match self {
            Self::None => Err(Error::Crypto),
            Self::Aes256Cbc => {
                let cipher = cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
                    .map_err(|_| Error::Crypto)?;
                cipher
                    .decrypt_padded_mut::<NoPadding>(buffer)
                    .map_err(|_| Error::Length)?;
                Ok(())
            }
            Self::Aes256Ctr => {
                let mut cipher =
                    Ctr128BE::<Aes256>::new_from_slices(key, iv).map_err(|_| Error::Crypto)?;
                cipher.apply_keystream(buffer);
                Ok(())
            }
        }
    }

    /// Encrypt the plaintext in `buffer` in-place using this cipher.
    ///
    /// No padding is added; CBC requires the buffer to already be a
    /// multiple of the block size and fails with [`Error::Length`]
    /// otherwise.
    pub fn encrypt(self, key: &[u8], iv: &[u8], buffer: &mut [u8]) -> Result<()> {
        self.check_key_and_iv(key, iv)?;

        match self {
            Self::None => Err(Error::Crypto),
            Self::Aes256Cbc => {
                let cipher = cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
                    .map_err(|_| Error::Crypto)?;
                let msg_len = buffer.len();
                cipher
                    .encrypt_padded_mut::<NoPadding>(buffer, msg_len)
                    .map_err(|_| Error::Length)?;
                Ok(())
            }
            Self::Aes256Ctr => {
                let mut cipher =
                    Ctr128BE::<Aes256>::new_from_slices(key, iv).map_err(|_| Error::Crypto)?;
                cipher.apply_keystream(buffer);
                Ok(())
            }
        }
    }

    /// Check that the key and IV are the expected length for this cipher.
    fn check_key_and_iv(self, key: &[u8], iv: &[u8]) -> Result<()> {
        let (key_size, iv_size) = self
            .key_and_iv_size()
            .ok_or_else(|| Error::UnsupportedCipher(self.as_str().into()))?;

        if key.len() != key_size {
            return Err(Error::KeySize);
        }

        if iv.len() != iv_size {
            return Err(Error::IvSize);
        }

        Ok(())
    }
}

impl AsRef<str> for Cipher {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for Cipher {
    type Err = Error;

    fn from_str(ciphername: &str) -> Result<Self> {
        match ciphername {
            "none" => Ok(Self::None),
            AES256_CBC => Ok(Self::Aes256Cbc),
            AES256_CTR => Ok(Self::Aes256Ctr),
            _ => Err(Error::UnsupportedCipher(ciphername.into())),
        }
    }
}
