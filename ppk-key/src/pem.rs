//! Traditional PEM private key writers.
//!
//! Emits the pre-PKCS#8 formats legacy tooling expects: PKCS#1 for RSA
//! (RFC 8017 A.1.2), OpenSSL's `DSA PRIVATE KEY` structure, and SEC1 for
//! ECDSA (RFC 5915). Bodies are Base64 wrapped at 64 columns.
//!
//! Ed25519 private keys have no traditional PEM form and always use the
//! OpenSSH container instead.

use crate::{
    private::{DsaKeypair, EcdsaKeypair, RsaKeypair},
    Error, Mpint, Result,
};
use bigint::BigUint;
use encoding::{der::DerWriter, pem, LineEnding};
use zeroize::Zeroizing;

/// PEM type label for PKCS#1 RSA private keys.
const PKCS1_LABEL: &str = "RSA PRIVATE KEY";

/// PEM type label for OpenSSL-style DSA private keys.
const DSA_LABEL: &str = "DSA PRIVATE KEY";

/// PEM type label for SEC1 ECDSA private keys.
const SEC1_LABEL: &str = "EC PRIVATE KEY";

/// Serialize an RSA keypair as a PKCS#1 `RSA PRIVATE KEY` PEM document:
///
/// ```text
/// RSAPrivateKey ::= SEQUENCE {
///     version           Version,
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER,  -- e
///     privateExponent   INTEGER,  -- d
///     prime1            INTEGER,  -- p
///     prime2            INTEGER,  -- q
///     exponent1         INTEGER,  -- d mod (p-1)
///     exponent2         INTEGER,  -- d mod (q-1)
///     coefficient       INTEGER,  -- (inverse of q) mod p
/// }
/// ```
///
/// PuTTY does not store the CRT exponents, so they are recomputed from
/// `d`, `p`, and `q`.
pub fn rsa_to_pem(keypair: &RsaKeypair) -> Result<Zeroizing<String>> {
    let d = BigUint::try_from(keypair.private().d())?;
    let p = BigUint::try_from(keypair.private().p())?;
    let q = BigUint::try_from(keypair.private().q())?;

    let one = BigUint::from(1u8);
    let dp = Zeroizing::new((&d % (&p - &one)).to_bytes_be());
    let dq = Zeroizing::new((&d % (&q - &one)).to_bytes_be());

    let mut der = DerWriter::new();
    der.sequence(|der| {
        der.integer(&[0])?;
        integer(der, keypair.public().n())?;
        integer(der, keypair.public().e())?;
        integer(der, keypair.private().d())?;
        integer(der, keypair.private().p())?;
        integer(der, keypair.private().q())?;
        der.integer(&dp)?;
        der.integer(&dq)?;
        integer(der, keypair.private().iqmp())
    })?;

    encode(PKCS1_LABEL, der)
}

/// Serialize a DSA keypair as an OpenSSL-style `DSA PRIVATE KEY` PEM
/// document: `SEQUENCE { version = 0, p, q, g, y, x }`.
pub fn dsa_to_pem(keypair: &DsaKeypair) -> Result<Zeroizing<String>> {
    let mut der = DerWriter::new();
    der.sequence(|der| {
        der.integer(&[0])?;
        integer(der, &keypair.public.p)?;
        integer(der, &keypair.public.q)?;
        integer(der, &keypair.public.g)?;
        integer(der, &keypair.public.y)?;
        integer(der, keypair.private.as_mpint())
    })?;

    encode(DSA_LABEL, der)
}

/// Serialize an ECDSA keypair as a SEC1 `EC PRIVATE KEY` PEM document
/// (RFC 5915):
///
/// ```text
/// ECPrivateKey ::= SEQUENCE {
///     version        INTEGER { ecPrivkeyVer1(1) },
///     privateKey     OCTET STRING,
///     parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
///     publicKey  [1] BIT STRING OPTIONAL
/// }
/// ```
pub fn ecdsa_to_pem(keypair: &EcdsaKeypair) -> Result<Zeroizing<String>> {
    let mut der = DerWriter::new();
    der.sequence(|der| {
        der.integer(&[1])?;
        der.octet_string(keypair.private.as_slice())?;
        der.context_specific(0, |der| der.oid(keypair.curve().oid_arcs()))?;
        der.context_specific(1, |der| der.bit_string(keypair.public.as_sec1_bytes()))
    })?;

    encode(SEC1_LABEL, der)
}

/// Write an INTEGER from the magnitude of a positive `mpint`.
fn integer(der: &mut DerWriter, value: &Mpint) -> encoding::Result<()> {
    let magnitude = value
        .as_positive_bytes()
        .ok_or(encoding::Error::Length)?;
    der.integer(magnitude)
}

/// PEM-encode a finished DER document, zeroizing the intermediate buffer.
fn encode(label: &str, der: DerWriter) -> Result<Zeroizing<String>> {
    let der = Zeroizing::new(der.finish());
    pem::encode(label, LineEnding::LF, &der)
        .map(Zeroizing::new)
        .map_err(Error::from)
}
