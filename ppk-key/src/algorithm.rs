//! Algorithm support.

use crate::{Error, Result};
use core::{fmt, str};
use encoding::{Decode, Encode, Reader, Writer};

/// ECDSA with SHA-256 + NIST P-256
const ECDSA_SHA2_P256: &str = "ecdsa-sha2-nistp256";

/// ECDSA with SHA-384 + NIST P-384
const ECDSA_SHA2_P384: &str = "ecdsa-sha2-nistp384";

/// ECDSA with SHA-512 + NIST P-521
const ECDSA_SHA2_P521: &str = "ecdsa-sha2-nistp521";

/// Digital Signature Algorithm
const SSH_DSA: &str = "ssh-dss";

/// Ed25519
const SSH_ED25519: &str = "ssh-ed25519";

/// RSA
const SSH_RSA: &str = "ssh-rsa";

/// SSH key algorithms.
///
/// The registry of key types PuTTY emits and this crate converts.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Algorithm {
    /// Digital Signature Algorithm
    Dsa,

    /// Elliptic Curve Digital Signature Algorithm
    Ecdsa {
        /// Elliptic curve with which to instantiate ECDSA.
        curve: EcdsaCurve,
    },

    /// Ed25519
    Ed25519,

    /// RSA
    Rsa,
}

impl Algorithm {
    /// Decode algorithm from the given string identifier.
    ///
    /// # Supported algorithms
    /// - `ecdsa-sha2-nistp256`
    /// - `ecdsa-sha2-nistp384`
    /// - `ecdsa-sha2-nistp521`
    /// - `ssh-dss`
    /// - `ssh-ed25519`
    /// - `ssh-rsa`
    pub fn new(id: &str) -> Result<Self> {
        id.parse()
    }

    /// Get the string identifier which corresponds to this algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dsa => SSH_DSA,
            Self::Ecdsa { curve } => match curve {
                EcdsaCurve::NistP256 => ECDSA_SHA2_P256,
                EcdsaCurve::NistP384 => ECDSA_SHA2_P384,
                EcdsaCurve::NistP521 => ECDSA_SHA2_P521,
            },
            Self::Ed25519 => SSH_ED25519,
            Self::Rsa => SSH_RSA,
        }
    }

    /// Is the algorithm RSA?
    pub fn is_rsa(self) -> bool {
        matches!(self, Self::Rsa)
    }

    /// Is the algorithm Ed25519?
    pub fn is_ed25519(self) -> bool {
        matches!(self, Self::Ed25519)
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Decode for Algorithm {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        String::decode(reader)?.parse()
    }
}

impl Encode for Algorithm {
    fn encoded_len(&self) -> encoding::Result<usize> {
        self.as_str().encoded_len()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.as_str().encode(writer)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for Algorithm {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self> {
        match id {
            SSH_DSA => Ok(Self::Dsa),
            ECDSA_SHA2_P256 => Ok(Self::Ecdsa {
                curve: EcdsaCurve::NistP256,
            }),
            ECDSA_SHA2_P384 => Ok(Self::Ecdsa {
                curve: EcdsaCurve::NistP384,
            }),
            ECDSA_SHA2_P521 => Ok(Self::Ecdsa {
                curve: EcdsaCurve::NistP521,
            }),
            SSH_ED25519 => Ok(Self::Ed25519),
            SSH_RSA => Ok(Self::Rsa),
            _ => Err(Error::UnsupportedAlgorithm(id.into())),
        }
    }
}

/// Elliptic curves supported for ECDSA keys.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum EcdsaCurve {
    /// NIST P-256 (a.k.a. prime256v1, secp256r1)
    NistP256,

    /// NIST P-384 (a.k.a. secp384r1)
    NistP384,

    /// NIST P-521 (a.k.a. secp521r1)
    NistP521,
}

impl EcdsaCurve {
    /// Decode elliptic curve from the given SSH curve name.
    ///
    /// # Supported curve names
    /// - `nistp256`
    /// - `nistp384`
    /// - `nistp521`
    pub fn new(id: &str) -> Result<Self> {
        id.parse()
    }

    /// Get the SSH curve name which corresponds to this curve.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NistP256 => "nistp256",
            Self::NistP384 => "nistp384",
            Self::NistP521 => "nistp521",
        }
    }

    /// Get the conventional display name for this curve, e.g. `P-256`.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::NistP256 => "P-256",
            Self::NistP384 => "P-384",
            Self::NistP521 => "P-521",
        }
    }

    /// Get the size of a field element for this curve in bytes.
    pub fn field_size(self) -> usize {
        match self {
            Self::NistP256 => 32,
            Self::NistP384 => 48,
            Self::NistP521 => 66,
        }
    }

    /// Get the arcs of the object identifier for this curve, for use in
    /// SEC1 private key serialization.
    pub fn oid_arcs(self) -> &'static [u32] {
        match self {
            // 1.2.840.10045.3.1.7
            Self::NistP256 => &[1, 2, 840, 10045, 3, 1, 7],
            // 1.3.132.0.34
            Self::NistP384 => &[1, 3, 132, 0, 34],
            // 1.3.132.0.35
            Self::NistP521 => &[1, 3, 132, 0, 35],
        }
    }
}

impl AsRef<str> for EcdsaCurve {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Decode for EcdsaCurve {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        String::decode(reader)?.parse()
    }
}

impl Encode for EcdsaCurve {
    fn encoded_len(&self) -> encoding::Result<usize> {
        self.as_str().encoded_len()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.as_str().encode(writer)
    }
}

impl fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for EcdsaCurve {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self> {
        match id {
            "nistp256" => Ok(Self::NistP256),
            "nistp384" => Ok(Self::NistP384),
            "nistp521" => Ok(Self::NistP521),
            _ => Err(Error::UnsupportedAlgorithm(id.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, EcdsaCurve};
    use crate::Error;

    #[test]
    fn algorithm_identifiers_round_trip() {
        for id in [
            "ssh-rsa",
            "ssh-dss",
            "ecdsa-sha2-nistp256",
            "ecdsa-sha2-nistp384",
            "ecdsa-sha2-nistp521",
            "ssh-ed25519",
        ] {
            assert_eq!(Algorithm::new(id).expect("parse").as_str(), id);
        }
    }

    #[test]
    fn unknown_algorithm_rejected() {
        assert_eq!(
            Algorithm::new("ssh-rsa1"),
            Err(Error::UnsupportedAlgorithm("ssh-rsa1".into()))
        );
    }

    #[test]
    fn curve_field_sizes() {
        assert_eq!(EcdsaCurve::NistP256.field_size(), 32);
        assert_eq!(EcdsaCurve::NistP384.field_size(), 48);
        assert_eq!(EcdsaCurve::NistP521.field_size(), 66);
    }
}
