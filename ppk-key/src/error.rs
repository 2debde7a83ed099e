//! Error types.

use core::fmt;

/// Result type with `ppk-key`'s [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;

/// PPK file headers which may be reported as missing or empty.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum PpkField {
    /// Key algorithm in the `PuTTY-User-Key-File-N:` header.
    Algorithm,

    /// `Encryption:` header.
    Encryption,

    /// `Public-Lines:` header and body.
    PublicLines,

    /// `Private-Lines:` header and body.
    PrivateLines,

    /// `Private-MAC:` header.
    PrivateMac,

    /// `Key-Derivation:` header (v3 encrypted files).
    KeyDerivation,

    /// `Argon2-Memory:` header (v3 encrypted files).
    Argon2Memory,

    /// `Argon2-Passes:` header (v3 encrypted files).
    Argon2Passes,

    /// `Argon2-Parallelism:` header (v3 encrypted files).
    Argon2Parallelism,

    /// `Argon2-Salt:` header (v3 encrypted files).
    Argon2Salt,
}

impl PpkField {
    /// Get the header name as it appears in a PPK file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Algorithm => "Algorithm",
            Self::Encryption => "Encryption",
            Self::PublicLines => "Public-Lines",
            Self::PrivateLines => "Private-Lines",
            Self::PrivateMac => "Private-MAC",
            Self::KeyDerivation => "Key-Derivation",
            Self::Argon2Memory => "Argon2-Memory",
            Self::Argon2Passes => "Argon2-Passes",
            Self::Argon2Parallelism => "Argon2-Parallelism",
            Self::Argon2Salt => "Argon2-Salt",
        }
    }
}

impl fmt::Display for PpkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type.
///
/// Messages never contain passphrase material.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Wire read past the end of a blob.
    BufferUnderrun,

    /// Cryptographic errors.
    Crypto,

    /// Encoding errors without a more specific classification.
    Encoding(encoding::Error),

    /// A length-prefixed wire field exceeded the configured cap.
    FieldTooLarge {
        /// Maximum permitted field size in bytes.
        limit: usize,
    },

    /// Input exceeded the configured file size cap.
    FileTooLarge {
        /// Maximum permitted input size in bytes.
        limit: usize,
    },

    /// Malformed data within an otherwise recognized structure.
    FormatEncoding,

    /// Invalid combination of conversion options.
    InvalidArguments {
        /// What was wrong with the arguments.
        reason: &'static str,
    },

    /// A Base64 body failed to decode.
    InvalidBase64,

    /// Empty or non-textual input.
    InvalidInput,

    /// MAC verification failed.
    InvalidMac {
        /// Whether the file's private payload was encrypted. Decides the
        /// hint shown to the user: a wrong passphrase and a tampered file
        /// are cryptographically indistinguishable.
        encrypted: bool,
    },

    /// Input lacks a `PuTTY-User-Key-File-` header.
    InvalidPpkFormat,

    /// A required header is absent or empty.
    MissingField(PpkField),

    /// The file is encrypted but no passphrase was supplied.
    PassphraseRequired,

    /// Key algorithm outside the supported set.
    UnsupportedAlgorithm(String),

    /// Unrecognized Argon2 flavor in the `Key-Derivation:` header.
    UnsupportedArgon2(String),

    /// Encryption type other than `none` or `aes256-cbc`.
    UnsupportedEncryption(String),

    /// PPK format version outside {2, 3}.
    UnsupportedVersion {
        /// Version number found in the header.
        number: u32,
    },

    /// Input is an OpenSSH or PEM key, not a PPK.
    WrongFormat,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferUnderrun => write!(f, "wire read past end of key blob"),
            Error::Crypto => write!(f, "cryptographic error"),
            Error::Encoding(err) => write!(f, "{err}"),
            Error::FieldTooLarge { limit } => {
                write!(f, "wire field exceeds the {limit}-byte limit")
            }
            Error::FileTooLarge { limit } => {
                write!(f, "input exceeds the {limit}-byte limit")
            }
            Error::FormatEncoding => write!(f, "format encoding error"),
            Error::InvalidArguments { reason } => write!(f, "invalid arguments: {reason}"),
            Error::InvalidBase64 => write!(f, "Base64 body failed to decode"),
            Error::InvalidInput => write!(f, "input is empty or not a text file"),
            Error::InvalidMac { encrypted: true } => write!(
                f,
                "MAC verification failed: wrong passphrase, or the file was tampered with"
            ),
            Error::InvalidMac { encrypted: false } => {
                write!(f, "MAC verification failed: the file was tampered with")
            }
            Error::InvalidPpkFormat => write!(f, "not a PuTTY private key file"),
            Error::MissingField(field) => write!(f, "missing or empty field: {field}"),
            Error::PassphraseRequired => {
                write!(f, "private key is encrypted: a passphrase is required")
            }
            Error::UnsupportedAlgorithm(name) => write!(f, "unsupported algorithm: {name:?}"),
            Error::UnsupportedArgon2(name) => write!(f, "unsupported Argon2 flavor: {name:?}"),
            Error::UnsupportedEncryption(name) => {
                write!(f, "unsupported encryption type: {name:?}")
            }
            Error::UnsupportedVersion { number } => {
                write!(f, "unsupported PPK format version: {number}")
            }
            Error::WrongFormat => write!(
                f,
                "input is an OpenSSH or PEM key, not a PuTTY private key file"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<encoding::Error> for Error {
    fn from(err: encoding::Error) -> Error {
        match err {
            encoding::Error::Length => Error::BufferUnderrun,
            encoding::Error::Overflow => Error::FieldTooLarge {
                limit: encoding::MAX_FIELD_SIZE,
            },
            encoding::Error::Base64(_) => Error::InvalidBase64,
            err => Error::Encoding(err),
        }
    }
}

impl From<cipher::Error> for Error {
    fn from(_: cipher::Error) -> Error {
        Error::Crypto
    }
}

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Error {
        Error::BufferUnderrun
    }
}
