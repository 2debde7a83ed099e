//! Cipher known-answer and round-trip tests.

use hex_literal::hex;
use ppk_cipher::{Cipher, Error};

const KEY: [u8; 32] = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
const IV: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");

const PLAINTEXT: [u8; 48] = hex!(
    "030a11181f262d343b424950575e656c737a81888f969da4abb2b9c0c7ced5dc"
    "e3eaf1f8ff060d141b222930373e454c"
);

const AES256_CBC_CIPHERTEXT: [u8; 48] = hex!(
    "61566a8c558954b3685aebb31fdeff58e15d4fe6d2312c7356fb737472bff0f3"
    "f8a7088ef8f18520bbfdf0aa1f46c3da"
);

const AES256_CTR_CIPHERTEXT: [u8; 48] = hex!(
    "5964154f17dd5ca2cb6c1c6d559dc3fe1389915d4c13c5f9fea44291b52bf513"
    "ff8f86a3c5c3c1b0a0c32295d22f82de"
);

#[test]
fn aes256_cbc_decrypt() {
    let mut buffer = AES256_CBC_CIPHERTEXT;
    Cipher::Aes256Cbc
        .decrypt(&KEY, &IV, &mut buffer)
        .expect("decrypt");
    assert_eq!(buffer, PLAINTEXT);
}

#[test]
fn aes256_cbc_encrypt() {
    let mut buffer = PLAINTEXT;
    Cipher::Aes256Cbc
        .encrypt(&KEY, &IV, &mut buffer)
        .expect("encrypt");
    assert_eq!(buffer, AES256_CBC_CIPHERTEXT);
}

#[test]
fn aes256_cbc_rejects_unaligned_buffer() {
    let mut buffer = [0u8; 17];
    assert_eq!(
        Cipher::Aes256Cbc.decrypt(&KEY, &IV, &mut buffer),
        Err(Error::Length)
    );
}

#[test]
fn aes256_cbc_preserves_full_plaintext_length() {
    // CBC is unpadded: a trailing block of zeros must survive decryption
    // untouched rather than being stripped as padding.
    let mut buffer = [0u8; 32];
    let mut expected = [0u8; 32];
    Cipher::Aes256Cbc
        .encrypt(&KEY, &IV, &mut expected)
        .expect("encrypt");
    buffer.copy_from_slice(&expected);
    Cipher::Aes256Cbc
        .decrypt(&KEY, &IV, &mut buffer)
        .expect("decrypt");
    assert_eq!(buffer, [0u8; 32]);
}

#[test]
fn aes256_ctr_encrypt() {
    let mut buffer = PLAINTEXT;
    Cipher::Aes256Ctr
        .encrypt(&KEY, &IV, &mut buffer)
        .expect("encrypt");
    assert_eq!(buffer, AES256_CTR_CIPHERTEXT);
}

#[test]
fn aes256_ctr_round_trip() {
    let mut buffer = PLAINTEXT;
    Cipher::Aes256Ctr
        .encrypt(&KEY, &IV, &mut buffer)
        .expect("encrypt");
    Cipher::Aes256Ctr
        .decrypt(&KEY, &IV, &mut buffer)
        .expect("decrypt");
    assert_eq!(buffer, PLAINTEXT);
}

#[test]
fn wrong_key_size_rejected() {
    let mut buffer = [0u8; 16];
    assert_eq!(
        Cipher::Aes256Cbc.decrypt(&KEY[..16], &IV, &mut buffer),
        Err(Error::KeySize)
    );
}

#[test]
fn wrong_iv_size_rejected() {
    let mut buffer = [0u8; 16];
    assert_eq!(
        Cipher::Aes256Cbc.decrypt(&KEY, &IV[..8], &mut buffer),
        Err(Error::IvSize)
    );
}

#[test]
fn cipher_name_round_trip() {
    for cipher in [Cipher::None, Cipher::Aes256Cbc, Cipher::Aes256Ctr] {
        assert_eq!(Cipher::new(cipher.as_str()), Ok(cipher));
    }

    assert!(matches!(
        Cipher::new("aes128-cbc"),
        Err(Error::UnsupportedCipher(_))
    ));
}
