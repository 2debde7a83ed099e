//! SSH private key output.
//!
//! Writes decoded keypairs into the OpenSSH private key container
//! described in [PROTOCOL.key], optionally encrypted under a new
//! passphrase with bcrypt-pbkdf and AES-256-CTR:
//!
//! ```text
//! "openssh-key-v1\0"
//! string  ciphername
//! string  kdfname
//! string  kdfoptions
//! uint32  number of keys (always 1)
//! string  public key blob
//! string  private section (encrypted if ciphername != "none")
//! ```
//!
//! [PROTOCOL.key]: https://cvsweb.openbsd.org/src/usr.bin/ssh/PROTOCOL.key?annotate=HEAD

mod dsa;
mod ecdsa;
mod ed25519;
mod keypair;
mod rsa;

pub use self::{
    dsa::{DsaKeypair, DsaPrivateKey},
    ecdsa::{EcdsaKeypair, EcdsaPrivateKey},
    ed25519::{Ed25519Keypair, Ed25519PrivateKey},
    keypair::KeypairData,
    rsa::{RsaKeypair, RsaPrivateKey},
};

use crate::{kdf::Kdf, public::KeyData, Error, Result};
use cipher::Cipher;
use encoding::{CheckedSum, Encode, EncodePem, LineEnding, PemLabel, Writer};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Maximum supported block size.
///
/// This is the block size used by e.g. AES.
const MAX_BLOCK_SIZE: usize = 16;

/// Padding bytes to use.
const PADDING_BYTES: [u8; MAX_BLOCK_SIZE - 1] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// OpenSSH private key writer.
#[derive(Debug)]
pub struct OpensshKey {
    /// Cipher algorithm.
    cipher: Cipher,

    /// KDF options.
    kdf: Kdf,

    /// "Checkint" value decrypters use to verify successful decryption.
    checkint: u32,

    /// Public key.
    public_key: KeyData,

    /// Comment on the key.
    comment: String,

    /// Private section contents.
    private: Private,
}

/// Private section contents: keypair data, or its ciphertext once the key
/// has been encrypted.
#[derive(Debug)]
enum Private {
    Plain(KeypairData),
    Encrypted(Vec<u8>),
}

impl OpensshKey {
    /// Magic string used to identify keys in this format.
    const AUTH_MAGIC: &'static [u8] = b"openssh-key-v1\0";

    /// Create a new unencrypted private key with the given keypair data and
    /// comment.
    ///
    /// The RNG provides the `checkint` value written twice at the start of
    /// the private section.
    pub fn new(
        key_data: KeypairData,
        comment: impl Into<String>,
        rng: &mut impl CryptoRngCore,
    ) -> Self {
        Self {
            cipher: Cipher::None,
            kdf: Kdf::None,
            checkint: rng.next_u32(),
            public_key: key_data.public(),
            comment: comment.into(),
            private: Private::Plain(key_data),
        }
    }

    /// Encrypt this private key under the provided passphrase.
    ///
    /// Uses the following algorithms:
    /// - Cipher: AES-256-CTR
    /// - KDF: bcrypt-pbkdf with a fresh 16-byte salt and 16 rounds
    pub fn encrypt(mut self, rng: &mut impl CryptoRngCore, passphrase: &str) -> Result<Self> {
        if self.is_encrypted() {
            return Err(Error::Crypto);
        }

        let cipher = Cipher::Aes256Ctr;
        let kdf = Kdf::new(rng);
        let (key, iv) = kdf.derive_key_and_iv(cipher, passphrase)?;

        let mut buffer = Vec::with_capacity(self.encoded_privatekey_comment_pair_len(cipher)?);
        self.encode_privatekey_comment_pair(&mut buffer, cipher)?;
        cipher.encrypt(&key, &iv, &mut buffer)?;

        self.cipher = cipher;
        self.kdf = kdf;
        self.private = Private::Encrypted(buffer);
        Ok(self)
    }

    /// Encode this key as PEM with the 70-column body OpenSSH uses,
    /// allocating a self-zeroizing [`String`] for the result.
    pub fn to_pem(&self) -> Result<Zeroizing<String>> {
        Ok(self.encode_pem(LineEnding::LF).map(Zeroizing::new)?)
    }

    /// Is this key encrypted?
    pub fn is_encrypted(&self) -> bool {
        let ret = matches!(self.private, Private::Encrypted(_));
        debug_assert_eq!(ret, self.cipher.is_some());
        ret
    }

    /// Comment on the key.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Get the public key which corresponds to this private key.
    pub fn public_key(&self) -> &KeyData {
        &self.public_key
    }

    /// Encode the private section plaintext: two `checkint` values, the
    /// keypair data, the comment, and `1, 2, 3, ...` padding up to the
    /// cipher's block size.
    fn encode_privatekey_comment_pair(
        &self,
        writer: &mut impl Writer,
        cipher: Cipher,
    ) -> encoding::Result<()> {
        let Private::Plain(key_data) = &self.private else {
            return Err(encoding::Error::Length);
        };

        let unpadded_len = self.unpadded_privatekey_comment_pair_len()?;
        let padding_len = cipher.padding_len(unpadded_len);

        self.checkint.encode(writer)?;
        self.checkint.encode(writer)?;
        key_data.encode(writer)?;
        self.comment.encode(writer)?;
        writer.write(&PADDING_BYTES[..padding_len])?;
        Ok(())
    }

    /// Get the length of the private section including padding for the
    /// given cipher.
    fn encoded_privatekey_comment_pair_len(&self, cipher: Cipher) -> encoding::Result<usize> {
        let len = self.unpadded_privatekey_comment_pair_len()?;
        [len, cipher.padding_len(len)].checked_sum()
    }

    /// Get the length of the private section sans padding: checkints,
    /// keypair data, and comment.
    fn unpadded_privatekey_comment_pair_len(&self) -> encoding::Result<usize> {
        let Private::Plain(key_data) = &self.private else {
            return Err(encoding::Error::Length);
        };

        [
            8, // 2 x uint32 checkints
            key_data.encoded_len()?,
            self.comment.encoded_len()?,
        ]
        .checked_sum()
    }
}

impl Encode for OpensshKey {
    fn encoded_len(&self) -> encoding::Result<usize> {
        let private_len = match &self.private {
            Private::Plain(_) => {
                [4, self.encoded_privatekey_comment_pair_len(Cipher::None)?].checked_sum()?
            }
            Private::Encrypted(ciphertext) => ciphertext.encoded_len()?,
        };

        [
            Self::AUTH_MAGIC.len(),
            self.cipher.as_str().encoded_len()?,
            self.kdf.encoded_len()?,
            4, // number of keys (uint32)
            self.public_key.encoded_len_prefixed()?,
            private_len,
        ]
        .checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        writer.write(Self::AUTH_MAGIC)?;
        self.cipher.as_str().encode(writer)?;
        self.kdf.encode(writer)?;

        // Number of keys in this container
        1usize.encode(writer)?;

        self.public_key.encode_prefixed(writer)?;

        match &self.private {
            Private::Plain(_) => {
                self.encoded_privatekey_comment_pair_len(Cipher::None)?
                    .encode(writer)?;
                self.encode_privatekey_comment_pair(writer, Cipher::None)?;
            }
            Private::Encrypted(ciphertext) => ciphertext.encode(writer)?,
        }

        Ok(())
    }
}

impl PemLabel for OpensshKey {
    const PEM_LABEL: &'static str = "OPENSSH PRIVATE KEY";
    const LINE_WIDTH: usize = 70;
}
