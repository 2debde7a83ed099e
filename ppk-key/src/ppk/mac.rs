//! PPK MAC verification.
//!
//! Both format versions authenticate the same five fields, each framed as
//! a `uint32` length followed by the raw bytes:
//!
//! ```text
//! algorithm ‖ encryption ‖ comment ‖ public_blob ‖ private_blob_plaintext
//! ```
//!
//! Version 2 uses HMAC-SHA-1 keyed with
//! `SHA1("putty-private-key-file-mac-key" ‖ passphrase)`; version 3 uses
//! HMAC-SHA-256 keyed with the last 32 bytes of the Argon2 output, or 32
//! zero bytes for unencrypted files.

use crate::{Algorithm, Error, Result};
use encoding::Encode;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Magic string mixed into the version 2 MAC key derivation.
const V2_MAC_KEY_MAGIC: &[u8] = b"putty-private-key-file-mac-key";

/// MAC key for one of the two PPK constructions.
pub(crate) enum MacKey {
    /// HMAC-SHA-1 key (version 2).
    V2(Zeroizing<[u8; 20]>),

    /// HMAC-SHA-256 key (version 3).
    V3(Zeroizing<[u8; 32]>),
}

impl MacKey {
    /// Version 2 MAC key: `SHA1(magic ‖ passphrase)`.
    ///
    /// The passphrase must be empty for unencrypted files.
    pub fn v2(passphrase: &str) -> Self {
        use sha1::Digest;
        let mut digest = Sha1::new();
        digest.update(V2_MAC_KEY_MAGIC);
        digest.update(passphrase.as_bytes());
        Self::V2(Zeroizing::new(digest.finalize().into()))
    }

    /// Version 3 MAC key: the Argon2-derived key for encrypted files, or
    /// 32 zero bytes for unencrypted ones.
    ///
    /// Deriving the unencrypted-file key from an empty passphrase instead
    /// of zeroes is a common misreading of the format; PuTTY uses an
    /// all-zero key.
    pub fn v3(derived: Option<&Zeroizing<[u8; 32]>>) -> Self {
        match derived {
            Some(key) => Self::V3(key.clone()),
            None => Self::V3(Zeroizing::new([0u8; 32])),
        }
    }

    /// Compute the MAC over the given data.
    pub fn compute(&self, data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Self::V2(key) => {
                let mut hmac =
                    Hmac::<Sha1>::new_from_slice(key.as_ref()).map_err(|_| Error::Crypto)?;
                hmac.update(data);
                Ok(Zeroizing::new(hmac.finalize().into_bytes().to_vec()))
            }
            Self::V3(key) => {
                let mut hmac =
                    Hmac::<Sha256>::new_from_slice(key.as_ref()).map_err(|_| Error::Crypto)?;
                hmac.update(data);
                Ok(Zeroizing::new(hmac.finalize().into_bytes().to_vec()))
            }
        }
    }

    /// Compute the MAC over the given data and compare it in constant time
    /// against the value from the `Private-MAC:` header.
    pub fn verify(&self, data: &[u8], expected: &[u8], encrypted: bool) -> Result<()> {
        let computed = self.compute(data)?;

        if computed.ct_eq(expected).into() {
            Ok(())
        } else {
            Err(Error::InvalidMac { encrypted })
        }
    }
}

/// Serialize the five authenticated fields in their framed form.
pub(crate) fn mac_data(
    algorithm: Algorithm,
    encryption: &str,
    comment: &str,
    public_blob: &[u8],
    private_blob: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let mut data = Zeroizing::new(Vec::new());
    algorithm.as_str().encode(&mut *data)?;
    encryption.encode(&mut *data)?;
    comment.encode(&mut *data)?;
    public_blob.encode(&mut *data)?;
    private_blob.encode(&mut *data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::{mac_data, MacKey};
    use crate::{Algorithm, Error};
    use hex_literal::hex;

    fn example_data() -> Vec<u8> {
        mac_data(
            Algorithm::Ed25519,
            "none",
            "test key",
            &[1, 2, 3],
            &[4, 5, 6],
        )
        .expect("mac data")
        .to_vec()
    }

    #[test]
    fn framing_is_length_prefixed() {
        assert_eq!(
            example_data(),
            hex!(
                "0000000b7373682d65643235353139000000046e6f6e65000000087465737420"
                "6b65790000000301020300000003040506"
            )
        );
    }

    #[test]
    fn v3_unencrypted_uses_zero_key() {
        let mac = MacKey::v3(None).compute(&example_data()).expect("mac");
        assert_eq!(
            mac.as_slice(),
            hex!("3ff8800f6b6fed9253a83b328fcfe9548847e431974bee015d4d59222edee854")
        );
    }

    #[test]
    fn v2_empty_passphrase() {
        let mac = MacKey::v2("").compute(&example_data()).expect("mac");
        assert_eq!(
            mac.as_slice(),
            hex!("61a45f29b20fb962ff35bfb5bfefbe4fb194ba80")
        );
    }

    #[test]
    fn v2_passphrase_changes_key() {
        let mac = MacKey::v2("pw").compute(&example_data()).expect("mac");
        assert_eq!(
            mac.as_slice(),
            hex!("caa4adae0360652580ba1d24aec7164d77d84692")
        );
    }

    #[test]
    fn verify_flags_single_bit_flip() {
        let data = example_data();
        let key = MacKey::v3(None);
        let mut mac = key.compute(&data).expect("mac").to_vec();
        key.verify(&data, &mac, false).expect("verify");

        mac[0] ^= 1;
        assert_eq!(
            key.verify(&data, &mac, false),
            Err(Error::InvalidMac { encrypted: false })
        );
    }
}
