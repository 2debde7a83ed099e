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

pub mod base64;
pub mod der;
pub mod pem;

mod checked;
mod decode;
mod encode;
mod error;
mod reader;
mod writer;

pub use crate::{
    checked::CheckedSum,
    decode::Decode,
    der::DerWriter,
    encode::Encode,
    error::{Error, Result},
    pem::{EncodePem, LineEnding, PemLabel},
    reader::Reader,
    writer::Writer,
};

/// Maximum length in bytes of any length-prefixed wire field this library
/// will accept (1 MiB).
///
/// Enforced before allocation so hostile length prefixes cannot trigger
/// oversized buffers.
pub const MAX_FIELD_SIZE: usize = 0x100000;
