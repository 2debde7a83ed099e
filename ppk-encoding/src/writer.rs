//! Writer trait and associated implementations.

use crate::Result;
use sha2::{Digest, Sha256};

/// Writer trait which encodes the SSH binary format to various outputs.
pub trait Writer: Sized {
    /// Write the given bytes to the writer.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

impl Writer for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Hashing writer: allows digesting an encoding without buffering it,
/// used when computing key fingerprints.
impl Writer for Sha256 {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.update(bytes);
        Ok(())
    }
}
