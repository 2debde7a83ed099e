//! Elliptic Curve Digital Signature Algorithm (ECDSA) public keys.

use crate::{Algorithm, EcdsaCurve, Error, Result};
use encoding::{CheckedSum, Decode, Encode, Reader, Writer};

/// SEC1 tag byte for an uncompressed curve point.
const SEC1_TAG_UNCOMPRESSED: u8 = 0x04;

/// Elliptic Curve Digital Signature Algorithm (ECDSA) public key.
///
/// The key is an uncompressed SEC1-encoded curve point, kept as raw bytes:
/// this crate shuttles key material between formats and performs no curve
/// arithmetic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcdsaPublicKey {
    /// Curve this key is instantiated over.
    curve: EcdsaCurve,

    /// Uncompressed SEC1-encoded curve point.
    point: Vec<u8>,
}

impl EcdsaPublicKey {
    /// Create a new ECDSA public key from an uncompressed SEC1-encoded
    /// curve point, validating the tag byte and length.
    pub fn new(curve: EcdsaCurve, point: Vec<u8>) -> Result<Self> {
        let expected_len = curve
            .field_size()
            .checked_mul(2)
            .and_then(|len| len.checked_add(1))
            .ok_or(Error::FormatEncoding)?;

        if point.len() != expected_len || point.first() != Some(&SEC1_TAG_UNCOMPRESSED) {
            return Err(Error::FormatEncoding);
        }

        Ok(Self { curve, point })
    }

    /// Get the [`Algorithm`] for this public key type.
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::Ecdsa { curve: self.curve }
    }

    /// Get the [`EcdsaCurve`] for this key.
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    /// Borrow the SEC1-encoded curve point as bytes.
    pub fn as_sec1_bytes(&self) -> &[u8] {
        &self.point
    }
}

impl AsRef<[u8]> for EcdsaPublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_sec1_bytes()
    }
}

impl Decode for EcdsaPublicKey {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        let curve = EcdsaCurve::decode(reader)?;
        let point = Vec::decode(reader)?;
        Self::new(curve, point)
    }
}

impl Encode for EcdsaPublicKey {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [
            self.curve.encoded_len()?,
            4, // uint32 length prefix
            self.point.len(),
        ]
        .checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.curve.encode(writer)?;
        self.point.encode(writer)
    }
}
