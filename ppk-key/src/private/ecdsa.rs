//! Elliptic Curve Digital Signature Algorithm (ECDSA) private keys.

use crate::{public::EcdsaPublicKey, EcdsaCurve, Error, Mpint, Result};
use core::fmt;
use encoding::{CheckedSum, Encode, Writer};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// Elliptic Curve Digital Signature Algorithm (ECDSA) private key.
///
/// The private scalar, stored big endian and left-padded with zeroes to the
/// curve's field element size.
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    /// Serialized big endian private scalar.
    bytes: Zeroizing<Vec<u8>>,
}

impl EcdsaPrivateKey {
    /// Build a private scalar from the `mpint` PuTTY stores in the private
    /// blob, left-padding it to the field element size of `curve`.
    pub fn from_mpint(scalar: &Mpint, curve: EcdsaCurve) -> Result<Self> {
        let scalar = scalar.as_positive_bytes().ok_or(Error::Crypto)?;
        let size = curve.field_size();

        if scalar.len() > size {
            return Err(Error::Crypto);
        }

        let mut bytes = Zeroizing::new(vec![0u8; size]);
        #[allow(clippy::arithmetic_side_effects)] // length checked above
        bytes[size - scalar.len()..].copy_from_slice(scalar);

        Ok(Self { bytes })
    }

    /// Borrow the inner scalar bytes as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Does this private key need to be prefixed with a leading zero when
    /// serialized as an `mpint`?
    fn needs_leading_zero(&self) -> bool {
        self.bytes.first().is_some_and(|&byte| byte >= 0x80)
    }
}

impl AsRef<[u8]> for EcdsaPrivateKey {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl ConstantTimeEq for EcdsaPrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_slice().ct_eq(other.as_slice())
    }
}

impl Eq for EcdsaPrivateKey {}

impl PartialEq for EcdsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Encode for EcdsaPrivateKey {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [4, self.needs_leading_zero().into(), self.bytes.len()].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        [self.needs_leading_zero().into(), self.bytes.len()]
            .checked_sum()?
            .encode(writer)?;

        if self.needs_leading_zero() {
            writer.write(&[0])?;
        }

        writer.write(&self.bytes)?;
        Ok(())
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey").finish_non_exhaustive()
    }
}

/// Elliptic Curve Digital Signature Algorithm (ECDSA) private/public keypair.
#[derive(Clone, Debug)]
pub struct EcdsaKeypair {
    /// Public key.
    pub public: EcdsaPublicKey,

    /// Private key.
    pub private: EcdsaPrivateKey,
}

impl EcdsaKeypair {
    /// Get the [`EcdsaCurve`] for this keypair.
    pub fn curve(&self) -> EcdsaCurve {
        self.public.curve()
    }
}

impl ConstantTimeEq for EcdsaKeypair {
    fn ct_eq(&self, other: &Self) -> Choice {
        Choice::from((self.public == other.public) as u8) & self.private.ct_eq(&other.private)
    }
}

impl Eq for EcdsaKeypair {}

impl PartialEq for EcdsaKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

/// Encodes the OpenSSH private section field order:
/// `curve_name, Q, d`.
impl Encode for EcdsaKeypair {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [self.public.encoded_len()?, self.private.encoded_len()?].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.public.encode(writer)?;
        self.private.encode(writer)
    }
}
