//! PEM encoding support.

pub use pem_rfc7468::LineEnding;

use crate::{Encode, Result, Writer};

/// PEM type label and body line width for an encoded document.
pub trait PemLabel {
    /// Type label to use in the PEM encapsulation boundaries, e.g.
    /// `OPENSSH PRIVATE KEY`.
    const PEM_LABEL: &'static str;

    /// Width at which the Base64 body is wrapped.
    ///
    /// RFC7468 documents use 64; OpenSSH private keys use 70.
    const LINE_WIDTH: usize;
}

/// Encoding trait for PEM documents.
///
/// This is an extension trait which is auto-impl'd for types which impl the
/// [`Encode`] and [`PemLabel`] traits.
pub trait EncodePem: Encode + PemLabel {
    /// Encode this type using the [`Encode`] trait, writing the resulting PEM
    /// document to a returned [`String`].
    fn encode_pem(&self, line_ending: LineEnding) -> Result<String>;
}

impl<T: Encode + PemLabel> EncodePem for T {
    fn encode_pem(&self, line_ending: LineEnding) -> Result<String> {
        let encoded_len = pem_rfc7468::encapsulated_len_wrapped(
            Self::PEM_LABEL,
            Self::LINE_WIDTH,
            line_ending,
            self.encoded_len()?,
        )?;

        let mut buf = vec![0u8; encoded_len];
        let mut writer = PemWriter(pem_rfc7468::Encoder::new_wrapped(
            Self::PEM_LABEL,
            Self::LINE_WIDTH,
            line_ending,
            &mut buf,
        )?);

        self.encode(&mut writer)?;
        let actual_len = writer.0.finish()?;
        buf.truncate(actual_len);
        Ok(String::from_utf8(buf)?)
    }
}

/// Encode `input` as a PEM document with the given type label and a
/// 64-column Base64 body per RFC7468.
pub fn encode(type_label: &str, line_ending: LineEnding, input: &[u8]) -> Result<String> {
    Ok(pem_rfc7468::encode_string(type_label, line_ending, input)?)
}

/// [`Writer`] adapter for the inner PEM encoder.
struct PemWriter<'o>(pem_rfc7468::Encoder<'static, 'o>);

impl Writer for PemWriter<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        Ok(self.0.encode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::LineEnding;

    #[test]
    fn encode_wraps_at_64_columns() {
        let pem = super::encode("EXAMPLE", LineEnding::LF, &[0xab; 60]).expect("encode");
        let mut lines = pem.lines();
        assert_eq!(lines.next(), Some("-----BEGIN EXAMPLE-----"));
        let body: Vec<&str> = pem
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect();
        assert_eq!(body[0].len(), 64);
        assert!(pem.ends_with("-----END EXAMPLE-----\n"));
    }
}
