//! SSH public key fingerprints.

use crate::public::KeyData;
use core::fmt::{self, Display};
use encoding::{
    base64::{Base64Unpadded, Encoding},
    Encode,
};
use sha2::{Digest, Sha256};

/// Fingerprint encoding error message.
const FINGERPRINT_ERR_MSG: &str = "fingerprint encoding error";

/// SSH public key fingerprint: the SHA-256 digest of the public key blob,
/// displayed as `SHA256:` followed by unpadded Base64.
///
/// ### Example
///
/// ```text
/// SHA256:Nh0Me49Zh9fDw/VYUfq43IJmI1T+XrjiYONPND8GzaM
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Fingerprint {
    /// SHA-256 digest of the public key blob.
    digest: [u8; 32],
}

impl Fingerprint {
    /// Size of the fingerprint digest encoded as unpadded Base64.
    const BASE64_SIZE: usize = 43;

    /// Create a fingerprint of the given public key data.
    pub fn new(public_key: &KeyData) -> Self {
        let mut digest = Sha256::new();
        public_key.encode(&mut digest).expect(FINGERPRINT_ERR_MSG);
        Self {
            digest: digest.finalize().into(),
        }
    }

    /// Get the raw digest output for the fingerprint as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.digest
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::BASE64_SIZE];
        let base64 = Base64Unpadded::encode(self.as_bytes(), &mut buf).map_err(|_| fmt::Error)?;
        write!(f, "SHA256:{base64}")
    }
}
