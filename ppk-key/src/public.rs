//! SSH public key data.
//!
//! The PPK `Public-Lines` body is a standard SSH wire public key blob as
//! described in [RFC4253 § 6.6]. The types here decode it into
//! per-algorithm components and re-encode it verbatim for the OpenSSH
//! container, the single-line public key form, and fingerprinting.
//!
//! [RFC4253 § 6.6]: https://datatracker.ietf.org/doc/html/rfc4253#section-6.6

mod dsa;
mod ecdsa;
mod ed25519;
mod rsa;

pub use self::{
    dsa::DsaPublicKey, ecdsa::EcdsaPublicKey, ed25519::Ed25519PublicKey, rsa::RsaPublicKey,
};

use crate::{Algorithm, Error, Result};
use encoding::{CheckedSum, Decode, Encode, Reader, Writer};

/// Public key data: algorithm-specific components of an SSH public key.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyData {
    /// Digital Signature Algorithm (DSA) public key data.
    Dsa(DsaPublicKey),

    /// ECDSA public key data.
    Ecdsa(EcdsaPublicKey),

    /// Ed25519 public key data.
    Ed25519(Ed25519PublicKey),

    /// RSA public key data.
    Rsa(RsaPublicKey),
}

impl KeyData {
    /// Decode a public key blob, validating that its key type matches the
    /// algorithm declared in the PPK header.
    pub fn from_ppk_blob(blob: &[u8], algorithm: Algorithm) -> Result<Self> {
        let mut reader = blob;
        let key_data = Self::decode(&mut reader)?;

        if key_data.algorithm() != algorithm {
            return Err(Error::InvalidPpkFormat);
        }

        Ok(reader.finish(key_data)?)
    }

    /// Get the [`Algorithm`] for this public key.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Dsa(_) => Algorithm::Dsa,
            Self::Ecdsa(key) => key.algorithm(),
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Rsa(_) => Algorithm::Rsa,
        }
    }

    /// Get DSA public key data, if this key is the correct type.
    pub fn dsa(&self) -> Option<&DsaPublicKey> {
        match self {
            Self::Dsa(key) => Some(key),
            _ => None,
        }
    }

    /// Get ECDSA public key data, if this key is the correct type.
    pub fn ecdsa(&self) -> Option<&EcdsaPublicKey> {
        match self {
            Self::Ecdsa(key) => Some(key),
            _ => None,
        }
    }

    /// Get Ed25519 public key data, if this key is the correct type.
    pub fn ed25519(&self) -> Option<&Ed25519PublicKey> {
        match self {
            Self::Ed25519(key) => Some(key),
            _ => None,
        }
    }

    /// Get RSA public key data, if this key is the correct type.
    pub fn rsa(&self) -> Option<&RsaPublicKey> {
        match self {
            Self::Rsa(key) => Some(key),
            _ => None,
        }
    }
}

impl Decode for KeyData {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        match Algorithm::decode(reader)? {
            Algorithm::Dsa => DsaPublicKey::decode(reader).map(Self::Dsa),
            Algorithm::Ecdsa { curve } => {
                let key = EcdsaPublicKey::decode(reader)?;

                // Curve name inside the blob must agree with the key type
                if key.curve() != curve {
                    return Err(Error::InvalidPpkFormat);
                }

                Ok(Self::Ecdsa(key))
            }
            Algorithm::Ed25519 => Ed25519PublicKey::decode(reader).map(Self::Ed25519),
            Algorithm::Rsa => RsaPublicKey::decode(reader).map(Self::Rsa),
        }
    }
}

impl Encode for KeyData {
    fn encoded_len(&self) -> encoding::Result<usize> {
        let key_data_len = match self {
            Self::Dsa(key) => key.encoded_len()?,
            Self::Ecdsa(key) => key.encoded_len()?,
            Self::Ed25519(key) => key.encoded_len()?,
            Self::Rsa(key) => key.encoded_len()?,
        };

        [self.algorithm().encoded_len()?, key_data_len].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.algorithm().encode(writer)?;

        match self {
            Self::Dsa(key) => key.encode(writer),
            Self::Ecdsa(key) => key.encode(writer),
            Self::Ed25519(key) => key.encode(writer),
            Self::Rsa(key) => key.encode(writer),
        }
    }
}
