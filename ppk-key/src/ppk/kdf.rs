//! PPK key derivation.
//!
//! Version 2 files derive AES material from a SHA-1 chain over the
//! passphrase; version 3 files use Argon2 (RFC 9106) with parameters
//! recorded in the file's headers.

use crate::{Error, Result};
use argon2::Argon2;
use sha1::{Digest, Sha1};
use zeroize::Zeroizing;

/// Length of the Argon2 output: 32-byte AES key, 16-byte IV, and 32-byte
/// MAC key.
const ARGON2_OUTPUT_SIZE: usize = 80;

/// Argon2 flavors selectable via the `Key-Derivation:` header.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Argon2Flavor {
    /// Argon2d: data-dependent memory access.
    Argon2d,

    /// Argon2i: data-independent memory access.
    Argon2i,

    /// Argon2id: hybrid construction, PuTTY's default.
    Argon2id,
}

impl Argon2Flavor {
    /// Decode an Argon2 flavor from a `Key-Derivation:` header value.
    pub fn new(id: &str) -> Result<Self> {
        match id {
            "Argon2d" => Ok(Self::Argon2d),
            "Argon2i" => Ok(Self::Argon2i),
            "Argon2id" => Ok(Self::Argon2id),
            _ => Err(Error::UnsupportedArgon2(id.into())),
        }
    }

    /// Get the header value which corresponds to this flavor.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Argon2d => "Argon2d",
            Self::Argon2i => "Argon2i",
            Self::Argon2id => "Argon2id",
        }
    }

    /// Get the corresponding [`argon2::Algorithm`].
    fn algorithm(self) -> argon2::Algorithm {
        match self {
            Self::Argon2d => argon2::Algorithm::Argon2d,
            Self::Argon2i => argon2::Algorithm::Argon2i,
            Self::Argon2id => argon2::Algorithm::Argon2id,
        }
    }
}

/// Key material derived from the passphrase: AES-256 key, CBC IV, and
/// (version 3 only) the HMAC-SHA-256 key.
pub struct DerivedKeys {
    /// AES-256 key.
    pub key: Zeroizing<[u8; 32]>,

    /// AES-CBC initialization vector.
    pub iv: [u8; 16],

    /// MAC key. Present only for the Argon2 derivation: version 2 derives
    /// its MAC key from the passphrase alone.
    pub mac_key: Option<Zeroizing<[u8; 32]>>,
}

/// PPK key derivation function.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Kdf {
    /// Version 2: chained SHA-1 over `uint32(i) ‖ passphrase`, zero IV.
    Sha1,

    /// Version 3: Argon2 with the parameters from the file's headers.
    Argon2 {
        /// Flavor from the `Key-Derivation:` header.
        flavor: Argon2Flavor,

        /// Memory cost in KiB.
        memory: u32,

        /// Number of passes.
        passes: u32,

        /// Lane count.
        parallelism: u32,

        /// Salt from the `Argon2-Salt:` header.
        salt: Vec<u8>,
    },
}

impl Kdf {
    /// Derive AES material (and, for Argon2, the MAC key) from the
    /// passphrase.
    pub fn derive(&self, passphrase: &str) -> Result<DerivedKeys> {
        match self {
            Self::Sha1 => {
                let mut key = Zeroizing::new([0u8; 32]);

                let digest0 = sha1_chunk(0, passphrase);
                let digest1 = sha1_chunk(1, passphrase);
                key[..20].copy_from_slice(&digest0[..]);
                key[20..].copy_from_slice(&digest1[..12]);

                Ok(DerivedKeys {
                    key,
                    iv: [0u8; 16],
                    mac_key: None,
                })
            }
            Self::Argon2 {
                flavor,
                memory,
                passes,
                parallelism,
                salt,
            } => {
                // Parameter sanity before invoking the primitive
                if *passes < 1
                    || *parallelism < 1
                    || *memory < parallelism.checked_mul(8).ok_or(Error::InvalidPpkFormat)?
                {
                    return Err(Error::InvalidPpkFormat);
                }

                let params =
                    argon2::Params::new(*memory, *passes, *parallelism, Some(ARGON2_OUTPUT_SIZE))
                        .map_err(|_| Error::InvalidPpkFormat)?;
                let argon2 = Argon2::new(flavor.algorithm(), argon2::Version::V0x13, params);

                let mut output = Zeroizing::new([0u8; ARGON2_OUTPUT_SIZE]);
                argon2
                    .hash_password_into(passphrase.as_bytes(), salt, &mut *output)
                    .map_err(|_| Error::Crypto)?;

                let mut key = Zeroizing::new([0u8; 32]);
                let mut iv = [0u8; 16];
                let mut mac_key = Zeroizing::new([0u8; 32]);
                key.copy_from_slice(&output[..32]);
                iv.copy_from_slice(&output[32..48]);
                mac_key.copy_from_slice(&output[48..80]);

                Ok(DerivedKeys {
                    key,
                    iv,
                    mac_key: Some(mac_key),
                })
            }
        }
    }
}

/// Compute `SHA1(uint32_be(index) ‖ passphrase)`.
fn sha1_chunk(index: u32, passphrase: &str) -> Zeroizing<[u8; 20]> {
    let mut digest = Sha1::new();
    digest.update(index.to_be_bytes());
    digest.update(passphrase.as_bytes());
    Zeroizing::new(digest.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::{Argon2Flavor, Kdf};
    use crate::Error;
    use hex_literal::hex;

    #[test]
    fn unknown_flavor_rejected() {
        assert_eq!(
            Argon2Flavor::new("Argon2"),
            Err(Error::UnsupportedArgon2("Argon2".into()))
        );
    }

    #[test]
    fn sha1_chain_known_answer() {
        // SHA1("\x00\x00\x00\x00" "password") ‖ SHA1("\x00\x00\x00\x01" "password")[..12]
        let derived = Kdf::Sha1.derive("password").expect("derive");
        assert_eq!(
            *derived.key,
            hex!("afaeae5fc761191be3f9cece5ffb70bc506942a41f08fdbea8e63f6808eba5a3")
        );
        assert_eq!(derived.iv, [0u8; 16]);
        assert!(derived.mac_key.is_none());
    }

    #[test]
    fn argon2_parameter_sanity() {
        let kdf = Kdf::Argon2 {
            flavor: Argon2Flavor::Argon2id,
            memory: 4,
            passes: 1,
            parallelism: 1,
            salt: vec![0u8; 16],
        };

        // memory must be at least 8 * parallelism
        assert!(matches!(kdf.derive("pw"), Err(Error::InvalidPpkFormat)));
    }

    #[test]
    fn argon2id_known_answer() {
        let kdf = Kdf::Argon2 {
            flavor: Argon2Flavor::Argon2id,
            memory: 8192,
            passes: 3,
            parallelism: 1,
            salt: hex!("30313233343536373839616263646566").to_vec(),
        };

        let derived = kdf.derive("password").expect("derive");
        assert_eq!(
            *derived.key,
            hex!("a76595c24adcdfa47af2b89a54761289902eae53d91ebbec6a9040cf9ccb52fe")
        );
        assert_eq!(derived.iv, hex!("c47c27e27e0677a0a19ed8162d3d382b"));
        assert_eq!(
            *derived.mac_key.expect("mac key"),
            hex!("b35e2cc73fd670a1d651bfb640930f844c1edf7985177dcd8ad3aeaf99b4589a")
        );
    }
}
