//! Strict DER serialization.
//!
//! Implements the small subset of ASN.1 DER needed to emit PKCS#1, SEC1,
//! and OpenSSL-style DSA private key structures: INTEGER, OCTET STRING,
//! BIT STRING, OBJECT IDENTIFIER, SEQUENCE, and explicit context-specific
//! tags, with definite lengths in minimal form.

use crate::{Error, Result};

/// ASN.1 tag for INTEGER.
const TAG_INTEGER: u8 = 0x02;

/// ASN.1 tag for BIT STRING.
const TAG_BIT_STRING: u8 = 0x03;

/// ASN.1 tag for OCTET STRING.
const TAG_OCTET_STRING: u8 = 0x04;

/// ASN.1 tag for OBJECT IDENTIFIER.
const TAG_OID: u8 = 0x06;

/// ASN.1 tag for a constructed SEQUENCE.
const TAG_SEQUENCE: u8 = 0x30;

/// Base tag for constructed context-specific tags (`[n] EXPLICIT`).
const TAG_CONTEXT_CONSTRUCTED: u8 = 0xa0;

/// DER writer which serializes into an owned byte buffer.
#[derive(Clone, Debug, Default)]
pub struct DerWriter {
    bytes: Vec<u8>,
}

impl DerWriter {
    /// Create a new empty DER writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish serializing, returning the DER document.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Write an INTEGER from an unsigned big-endian magnitude.
    ///
    /// A leading zero byte is prepended iff the high bit of the most
    /// significant byte is set, per DER's two's complement sign rule.
    /// An empty magnitude encodes as zero.
    pub fn integer(&mut self, magnitude: &[u8]) -> Result<()> {
        let sign_byte = magnitude.first().is_some_and(|&byte| byte >= 0x80);
        let len = magnitude
            .len()
            .max(1)
            .checked_add(usize::from(sign_byte))
            .ok_or(Error::Overflow)?;

        self.header(TAG_INTEGER, len)?;

        if sign_byte {
            self.bytes.push(0x00);
        }

        if magnitude.is_empty() {
            self.bytes.push(0x00);
        } else {
            self.bytes.extend_from_slice(magnitude);
        }

        Ok(())
    }

    /// Write an OCTET STRING.
    pub fn octet_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.header(TAG_OCTET_STRING, bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Write a BIT STRING with no unused bits.
    pub fn bit_string(&mut self, bytes: &[u8]) -> Result<()> {
        let len = bytes.len().checked_add(1).ok_or(Error::Overflow)?;
        self.header(TAG_BIT_STRING, len)?;
        self.bytes.push(0x00);
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Write an OBJECT IDENTIFIER from its arcs.
    ///
    /// The first two arcs pack into a single byte (`40 * arc0 + arc1`);
    /// subsequent arcs use base-128 with continuation bits.
    pub fn oid(&mut self, arcs: &[u32]) -> Result<()> {
        let (first, rest) = match arcs {
            [first @ 0..=2, second, rest @ ..] if *second < 40 || *first == 2 => {
                (40u32.checked_mul(*first).and_then(|n| n.checked_add(*second)), rest)
            }
            _ => (None, arcs),
        };
        let first = first.ok_or(Error::Length)?;

        let mut body = Vec::with_capacity(arcs.len());
        push_base128(&mut body, first);
        for &arc in rest {
            push_base128(&mut body, arc);
        }

        self.header(TAG_OID, body.len())?;
        self.bytes.extend_from_slice(&body);
        Ok(())
    }

    /// Write a SEQUENCE whose body is produced by the given function.
    pub fn sequence<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut DerWriter) -> Result<()>,
    {
        self.constructed(TAG_SEQUENCE, f)
    }

    /// Write an `[n] EXPLICIT` constructed context-specific tag whose body
    /// is produced by the given function.
    pub fn context_specific<F>(&mut self, number: u8, f: F) -> Result<()>
    where
        F: FnOnce(&mut DerWriter) -> Result<()>,
    {
        if number > 0x1e {
            return Err(Error::Length);
        }

        self.constructed(TAG_CONTEXT_CONSTRUCTED | number, f)
    }

    /// Write a constructed value: serialize the body into a nested writer,
    /// then emit tag, length, and body.
    fn constructed<F>(&mut self, tag: u8, f: F) -> Result<()>
    where
        F: FnOnce(&mut DerWriter) -> Result<()>,
    {
        let mut body = DerWriter::new();
        f(&mut body)?;
        let body = body.finish();

        self.header(tag, body.len())?;
        self.bytes.extend_from_slice(&body);
        Ok(())
    }

    /// Write a tag byte and definite length (short form below 128, long
    /// form with the minimum number of length bytes otherwise).
    fn header(&mut self, tag: u8, len: usize) -> Result<()> {
        let len = u32::try_from(len).map_err(Error::from)?;
        self.bytes.push(tag);

        if len < 0x80 {
            self.bytes.push(len as u8);
        } else {
            let len_bytes = len.to_be_bytes();
            let skip = len.leading_zeros() as usize / 8;
            let n_len_bytes = len_bytes.len().saturating_sub(skip);
            self.bytes.push(0x80 | n_len_bytes as u8);
            self.bytes.extend_from_slice(&len_bytes[skip..]);
        }

        Ok(())
    }
}

/// Append `value` in base-128 with continuation bits in all but the final
/// byte.
fn push_base128(out: &mut Vec<u8>, value: u32) {
    let mut shift = (32 - value.leading_zeros()).saturating_sub(1) / 7 * 7;
    loop {
        let septet = (value >> shift) as u8 & 0x7f;
        if shift == 0 {
            out.push(septet);
            return;
        }
        out.push(septet | 0x80);
        shift -= 7;
    }
}

#[cfg(test)]
mod tests {
    use super::DerWriter;
    use hex_literal::hex;

    #[test]
    fn integer_zero() {
        let mut der = DerWriter::new();
        der.integer(&[]).expect("integer");
        assert_eq!(der.finish(), hex!("02 01 00"));
    }

    #[test]
    fn integer_prepends_sign_byte_when_high_bit_set() {
        let mut der = DerWriter::new();
        der.integer(&hex!("80")).expect("integer");
        assert_eq!(der.finish(), hex!("02 02 00 80"));
    }

    #[test]
    fn integer_small_positive() {
        let mut der = DerWriter::new();
        der.integer(&hex!("7f")).expect("integer");
        assert_eq!(der.finish(), hex!("02 01 7f"));
    }

    #[test]
    fn long_form_length() {
        let mut der = DerWriter::new();
        der.octet_string(&[0xaa; 200]).expect("octet string");
        let out = der.finish();
        assert_eq!(&out[..3], &hex!("04 81 c8"));
        assert_eq!(out.len(), 203);
    }

    #[test]
    fn two_byte_long_form_length() {
        let mut der = DerWriter::new();
        der.octet_string(&[0xaa; 300]).expect("octet string");
        let out = der.finish();
        assert_eq!(&out[..4], &hex!("04 82 01 2c"));
    }

    #[test]
    fn oid_nistp256() {
        // 1.2.840.10045.3.1.7
        let mut der = DerWriter::new();
        der.oid(&[1, 2, 840, 10045, 3, 1, 7]).expect("oid");
        assert_eq!(der.finish(), hex!("06 08 2a 86 48 ce 3d 03 01 07"));
    }

    #[test]
    fn oid_secp384r1() {
        // 1.3.132.0.34
        let mut der = DerWriter::new();
        der.oid(&[1, 3, 132, 0, 34]).expect("oid");
        assert_eq!(der.finish(), hex!("06 05 2b 81 04 00 22"));
    }

    #[test]
    fn bit_string_prepends_unused_bits_byte() {
        let mut der = DerWriter::new();
        der.bit_string(&hex!("04 aa bb")).expect("bit string");
        assert_eq!(der.finish(), hex!("03 04 00 04 aa bb"));
    }

    #[test]
    fn nested_sequence_with_context_tag() {
        let mut der = DerWriter::new();
        der.sequence(|der| {
            der.integer(&hex!("01"))?;
            der.context_specific(0, |der| der.oid(&[1, 3, 132, 0, 35]))
        })
        .expect("sequence");
        assert_eq!(
            der.finish(),
            hex!("30 0c 02 01 01 a0 07 06 05 2b 81 04 00 23")
        );
    }
}
