//! Base64 support.

pub use base64ct::{Base64, Base64Unpadded, Encoding, Error};
