//! Private keypair data.

use crate::{
    private::{
        DsaKeypair, DsaPrivateKey, EcdsaKeypair, EcdsaPrivateKey, Ed25519Keypair,
        Ed25519PrivateKey, RsaKeypair, RsaPrivateKey,
    },
    public::KeyData,
    Algorithm, Mpint, Result,
};
use encoding::{Decode, Encode, Reader, Writer};
use subtle::{Choice, ConstantTimeEq};

/// Private key data: algorithm-specific private/public keypairs.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum KeypairData {
    /// Digital Signature Algorithm (DSA) keypair.
    Dsa(DsaKeypair),

    /// ECDSA keypair.
    Ecdsa(EcdsaKeypair),

    /// Ed25519 keypair.
    Ed25519(Ed25519Keypair),

    /// RSA keypair.
    Rsa(RsaKeypair),
}

impl KeypairData {
    /// Decode the private components from a decrypted PPK private blob,
    /// pairing them with the already-decoded public key.
    ///
    /// PuTTY's private blob layouts differ from OpenSSH's: RSA stores
    /// `d, p, q, iqmp`; DSA stores `x`; ECDSA and Ed25519 store the private
    /// scalar/seed as an `mpint`. Trailing bytes after the private fields
    /// are padding added before encryption and are ignored.
    pub fn decode_ppk(reader: &mut impl Reader, public: &KeyData) -> Result<Self> {
        match public {
            KeyData::Dsa(public) => Ok(Self::Dsa(DsaKeypair {
                public: public.clone(),
                private: DsaPrivateKey::decode(reader)?,
            })),

            KeyData::Ecdsa(public) => {
                let scalar = Mpint::decode(reader)?;
                let private = EcdsaPrivateKey::from_mpint(&scalar, public.curve())?;

                Ok(Self::Ecdsa(EcdsaKeypair {
                    public: public.clone(),
                    private,
                }))
            }

            KeyData::Ed25519(public) => {
                let seed = Mpint::decode(reader)?;
                let private = Ed25519PrivateKey::from_mpint(&seed)?;

                Ok(Self::Ed25519(Ed25519Keypair {
                    public: *public,
                    private,
                }))
            }

            KeyData::Rsa(public) => Ok(Self::Rsa(RsaKeypair::new(
                public.clone(),
                RsaPrivateKey::decode(reader)?,
            )?)),
        }
    }

    /// Get the [`Algorithm`] for this keypair.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Dsa(_) => Algorithm::Dsa,
            Self::Ecdsa(keypair) => Algorithm::Ecdsa {
                curve: keypair.curve(),
            },
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Rsa(_) => Algorithm::Rsa,
        }
    }

    /// Get the public key data which corresponds to this keypair.
    pub fn public(&self) -> KeyData {
        match self {
            Self::Dsa(keypair) => KeyData::Dsa(keypair.public.clone()),
            Self::Ecdsa(keypair) => KeyData::Ecdsa(keypair.public.clone()),
            Self::Ed25519(keypair) => KeyData::Ed25519(keypair.public),
            Self::Rsa(keypair) => KeyData::Rsa(keypair.public().clone()),
        }
    }

    /// Get DSA keypair if this key is the correct type.
    pub fn dsa(&self) -> Option<&DsaKeypair> {
        match self {
            Self::Dsa(keypair) => Some(keypair),
            _ => None,
        }
    }

    /// Get ECDSA keypair if this key is the correct type.
    pub fn ecdsa(&self) -> Option<&EcdsaKeypair> {
        match self {
            Self::Ecdsa(keypair) => Some(keypair),
            _ => None,
        }
    }

    /// Get Ed25519 keypair if this key is the correct type.
    pub fn ed25519(&self) -> Option<&Ed25519Keypair> {
        match self {
            Self::Ed25519(keypair) => Some(keypair),
            _ => None,
        }
    }

    /// Get RSA keypair if this key is the correct type.
    pub fn rsa(&self) -> Option<&RsaKeypair> {
        match self {
            Self::Rsa(keypair) => Some(keypair),
            _ => None,
        }
    }
}

impl ConstantTimeEq for KeypairData {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Note: constant-time with respect to key data comparisons, not algorithms
        match (self, other) {
            (Self::Dsa(a), Self::Dsa(b)) => a.ct_eq(b),
            (Self::Ecdsa(a), Self::Ecdsa(b)) => a.ct_eq(b),
            (Self::Ed25519(a), Self::Ed25519(b)) => a.ct_eq(b),
            (Self::Rsa(a), Self::Rsa(b)) => a.ct_eq(b),
            _ => Choice::from(0),
        }
    }
}

impl Eq for KeypairData {}

impl PartialEq for KeypairData {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

/// Encodes the OpenSSH private section keypair layout: the algorithm name
/// followed by the per-algorithm fields.
impl Encode for KeypairData {
    fn encoded_len(&self) -> encoding::Result<usize> {
        let key_data_len = match self {
            Self::Dsa(keypair) => keypair.encoded_len()?,
            Self::Ecdsa(keypair) => keypair.encoded_len()?,
            Self::Ed25519(keypair) => keypair.encoded_len()?,
            Self::Rsa(keypair) => keypair.encoded_len()?,
        };

        Ok(self
            .algorithm()
            .encoded_len()?
            .checked_add(key_data_len)
            .ok_or(encoding::Error::Overflow)?)
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.algorithm().encode(writer)?;

        match self {
            Self::Dsa(keypair) => keypair.encode(writer),
            Self::Ecdsa(keypair) => keypair.encode(writer),
            Self::Ed25519(keypair) => keypair.encode(writer),
            Self::Rsa(keypair) => keypair.encode(writer),
        }
    }
}
