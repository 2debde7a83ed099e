//! Key Derivation Functions for OpenSSH private key output.
//!
//! These are used for deriving an encryption key from a passphrase when
//! writing an encrypted `openssh-key-v1` container.

use crate::{Error, Result};
use bcrypt_pbkdf::bcrypt_pbkdf;
use cipher::Cipher;
use encoding::{CheckedSum, Encode, Writer};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Default number of rounds to use for bcrypt-pbkdf.
const DEFAULT_BCRYPT_ROUNDS: u32 = 16;

/// Default salt size. Matches OpenSSH.
const DEFAULT_SALT_SIZE: usize = 16;

/// Key Derivation Functions (KDF).
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Kdf {
    /// No KDF.
    None,

    /// bcrypt-pbkdf options.
    Bcrypt {
        /// Salt
        salt: Vec<u8>,

        /// Rounds
        rounds: u32,
    },
}

impl Kdf {
    /// Initialize bcrypt-pbkdf KDF configuration with a random salt and the
    /// default number of rounds.
    pub fn new(rng: &mut impl CryptoRngCore) -> Self {
        let mut salt = vec![0u8; DEFAULT_SALT_SIZE];
        rng.fill_bytes(&mut salt);

        Kdf::Bcrypt {
            salt,
            rounds: DEFAULT_BCRYPT_ROUNDS,
        }
    }

    /// Derive an encryption key from the given passphrase.
    pub fn derive(&self, passphrase: &str, output: &mut [u8]) -> Result<()> {
        match self {
            Kdf::None => Err(Error::Crypto),
            Kdf::Bcrypt { salt, rounds } => {
                bcrypt_pbkdf(passphrase, salt, *rounds, output).map_err(|_| Error::Crypto)?;
                Ok(())
            }
        }
    }

    /// Derive key and IV for the given [`Cipher`].
    ///
    /// Returns two byte vectors containing the key and IV respectively.
    pub fn derive_key_and_iv(
        &self,
        cipher: Cipher,
        passphrase: &str,
    ) -> Result<(Zeroizing<Vec<u8>>, Vec<u8>)> {
        let (key_size, iv_size) = cipher.key_and_iv_size().ok_or(Error::Crypto)?;

        let okm_size = key_size
            .checked_add(iv_size)
            .ok_or(encoding::Error::Overflow)?;

        let mut okm = Zeroizing::new(vec![0u8; okm_size]);
        self.derive(passphrase, &mut okm)?;
        let iv = okm.split_off(key_size);
        Ok((okm, iv))
    }

    /// Is the KDF configured as `none`?
    pub fn is_none(&self) -> bool {
        self == &Self::None
    }

    /// Is the KDF configured as anything other than `none`?
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl Default for Kdf {
    fn default() -> Self {
        Self::None
    }
}

impl Encode for Kdf {
    fn encoded_len(&self) -> encoding::Result<usize> {
        let kdfname_len = match self {
            Self::None => "none".encoded_len()?,
            Self::Bcrypt { .. } => "bcrypt".encoded_len()?,
        };

        let kdfopts_prefixed_len = match self {
            Self::None => 4,
            Self::Bcrypt { salt, .. } => [12, salt.len()].checked_sum()?,
        };

        [kdfname_len, kdfopts_prefixed_len].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        match self {
            Self::None => {
                "none".encode(writer)?;
                0usize.encode(writer)?;
            }
            Self::Bcrypt { salt, rounds } => {
                "bcrypt".encode(writer)?;
                [8, salt.len()].checked_sum()?.encode(writer)?;
                salt.encode(writer)?;
                rounds.encode(writer)?;
            }
        }

        Ok(())
    }
}
