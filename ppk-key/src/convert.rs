//! PPK conversion API.

use crate::{
    pem,
    ppk::{PpkContainer, PpkFile},
    private::{KeypairData, OpensshKey},
    public::KeyData,
    Algorithm, Error, Fingerprint, Result,
};
use encoding::{
    base64::{Base64, Encoding},
    Encode,
};
use rand_core::OsRng;
use zeroize::Zeroizing;

/// Private key output formats.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum OutputFormat {
    /// Traditional PEM: PKCS#1 for RSA, OpenSSL-style DSA, SEC1 for
    /// ECDSA. Ed25519 keys fall back to the OpenSSH container.
    #[default]
    Pem,

    /// The `openssh-key-v1` container for all algorithms.
    Openssh,
}

/// Conversion options.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Private key output format.
    pub output_format: OutputFormat,

    /// Encrypt the output private key.
    ///
    /// Requires a non-empty [`ConvertOptions::output_passphrase`] and
    /// forces the OpenSSH container, which is encrypted with bcrypt-pbkdf
    /// and AES-256-CTR.
    pub encrypt: bool,

    /// Passphrase to encrypt the output private key under.
    pub output_passphrase: Option<String>,

    /// Maximum accepted input size in bytes.
    pub max_file_size: usize,

    /// Maximum accepted size of a decoded key blob in bytes.
    pub max_field_size: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            encrypt: false,
            output_passphrase: None,
            max_file_size: encoding::MAX_FIELD_SIZE,
            max_field_size: encoding::MAX_FIELD_SIZE,
        }
    }
}

/// A key converted from PPK.
#[derive(Clone, Debug)]
pub struct ConvertedKey {
    /// Key algorithm.
    pub algorithm: Algorithm,

    /// Comment from the PPK file (may be empty).
    pub comment: String,

    /// Display name of the ECDSA curve (e.g. `P-256`), if applicable.
    pub curve: Option<String>,

    /// Fingerprint of the public key (`SHA256:` + unpadded Base64).
    pub fingerprint: String,

    /// Private key in the selected output format. Self-zeroizing.
    pub private_key: Zeroizing<String>,

    /// Single-line public key: `<algorithm> <base64> <comment>`.
    pub public_key: String,
}

/// Convert PPK text into OpenSSH-compatible key material.
///
/// `passphrase` decrypts the input when it is encrypted and is ignored
/// otherwise.
pub fn convert(ppk: &str, passphrase: &str, options: &ConvertOptions) -> Result<ConvertedKey> {
    let output_passphrase = match (options.encrypt, options.output_passphrase.as_deref()) {
        (false, _) => None,
        (true, Some(passphrase)) if !passphrase.is_empty() => Some(passphrase),
        (true, _) => {
            return Err(Error::InvalidArguments {
                reason: "encrypting the output requires a non-empty output passphrase",
            })
        }
    };

    let ppk = PpkFile::parse_with_limits(ppk, options.max_file_size, options.max_field_size)?;

    let PpkContainer {
        public_key,
        key_data,
        comment,
    } = ppk.unlock(passphrase)?;

    let algorithm = public_key.algorithm();
    let curve = match algorithm {
        Algorithm::Ecdsa { curve } => Some(curve.display_name().to_string()),
        _ => None,
    };

    let fingerprint = Fingerprint::new(&public_key).to_string();
    let public_key = public_key_line(&public_key, &comment)?;
    let private_key =
        encode_private_key(key_data, &comment, options.output_format, output_passphrase)?;

    Ok(ConvertedKey {
        algorithm,
        comment,
        curve,
        fingerprint,
        private_key,
        public_key,
    })
}

/// Render the single-line public key form.
fn public_key_line(public_key: &KeyData, comment: &str) -> Result<String> {
    let mut blob = Vec::with_capacity(public_key.encoded_len()?);
    public_key.encode(&mut blob)?;
    let blob = Base64::encode_string(&blob);

    Ok(if comment.is_empty() {
        format!("{} {}", public_key.algorithm(), blob)
    } else {
        format!("{} {} {}", public_key.algorithm(), blob, comment)
    })
}

/// Serialize the private key in the requested output format.
fn encode_private_key(
    key_data: KeypairData,
    comment: &str,
    format: OutputFormat,
    output_passphrase: Option<&str>,
) -> Result<Zeroizing<String>> {
    if output_passphrase.is_none() && format == OutputFormat::Pem {
        match &key_data {
            KeypairData::Dsa(keypair) => return pem::dsa_to_pem(keypair),
            KeypairData::Ecdsa(keypair) => return pem::ecdsa_to_pem(keypair),
            KeypairData::Rsa(keypair) => return pem::rsa_to_pem(keypair),
            // No traditional PEM form; falls through to the OpenSSH container
            KeypairData::Ed25519(_) => (),
        }
    }

    let key = OpensshKey::new(key_data, comment, &mut OsRng);
    let key = match output_passphrase {
        Some(passphrase) => key.encrypt(&mut OsRng, passphrase)?,
        None => key,
    };

    key.to_pem()
}
