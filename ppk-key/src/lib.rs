#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::arithmetic_side_effects,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod pem;
pub mod ppk;
pub mod private;
pub mod public;

mod algorithm;
mod convert;
mod error;
mod fingerprint;
mod kdf;
mod mpint;

pub use crate::{
    algorithm::{Algorithm, EcdsaCurve},
    convert::{convert, ConvertOptions, ConvertedKey, OutputFormat},
    error::{Error, PpkField, Result},
    fingerprint::Fingerprint,
    kdf::Kdf,
    mpint::Mpint,
    ppk::{PpkContainer, PpkFile, PpkVersion},
};
pub use cipher::Cipher;
