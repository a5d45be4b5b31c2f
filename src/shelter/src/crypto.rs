//! Fallout Shelter save container encryption and decryption
//!
//! A `.sav` file is base64 text wrapping AES-256-CBC ciphertext with PKCS7
//! padding. The key and IV are constants embedded in the game, so the scheme
//! only obfuscates the JSON document underneath.

#[allow(deprecated)]
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use base64::prelude::*;

const BLOCK_SIZE: usize = 16;

/// Key material as the game stores it: eight big-endian 32-bit words
const KEY_WORDS: [u32; 8] = [
    2815074099, 1725469378, 4039046167, 874293617, 3063605751, 3133984764, 4097598161, 3620741625,
];

/// Fixed initialization vector ("tu89geji340t89u2")
const IV: [u8; BLOCK_SIZE] = [
    0x74, 0x75, 0x38, 0x39, 0x67, 0x65, 0x6a, 0x69, 0x33, 0x34, 0x30, 0x74, 0x38, 0x39, 0x75, 0x32,
];

/// Errors that can occur during encryption/decryption
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Ciphertext size {0} is not a non-zero multiple of 16 bytes")]
    InvalidSize(usize),

    #[error("Invalid padding in encrypted data")]
    InvalidPadding,

    #[error("Save container is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decrypted document is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Expand the key words into the 32 raw key bytes
pub fn key_bytes() -> [u8; 32] {
    let mut key = [0u8; 32];
    for (chunk, word) in key.chunks_exact_mut(4).zip(KEY_WORDS) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    key
}

fn cipher() -> Aes256 {
    #[allow(deprecated)]
    Aes256::new(GenericArray::from_slice(&key_bytes()))
}

/// Apply PKCS7 padding to data
fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let padding_len = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + padding_len);
    padded.extend_from_slice(data);
    padded.extend(std::iter::repeat_n(padding_len as u8, padding_len));
    padded
}

/// Remove PKCS7 padding from data
fn pkcs7_unpad(mut data: Vec<u8>) -> Result<Vec<u8>, CryptoError> {
    let Some(&last) = data.last() else {
        return Err(CryptoError::InvalidPadding);
    };
    let padding_len = last as usize;

    if padding_len == 0 || padding_len > BLOCK_SIZE || padding_len > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    if data[data.len() - padding_len..]
        .iter()
        .any(|&byte| byte as usize != padding_len)
    {
        return Err(CryptoError::InvalidPadding);
    }

    data.truncate(data.len() - padding_len);
    Ok(data)
}

/// Encrypt raw bytes with AES-256-CBC (PKCS7 padded)
pub fn encrypt_bytes(plaintext: &[u8]) -> Vec<u8> {
    let cipher = cipher();
    let mut buffer = pkcs7_pad(plaintext, BLOCK_SIZE);
    let mut previous = IV;

    for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
        for (byte, prev) in chunk.iter_mut().zip(previous) {
            *byte ^= prev;
        }
        #[allow(deprecated)]
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
        previous.copy_from_slice(chunk);
    }

    buffer
}

/// Decrypt AES-256-CBC ciphertext and strip the PKCS7 padding
pub fn decrypt_bytes(ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidSize(ciphertext.len()));
    }

    let cipher = cipher();
    let mut buffer = ciphertext.to_vec();
    let mut previous = IV;

    for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
        let mut current = [0u8; BLOCK_SIZE];
        current.copy_from_slice(chunk);
        #[allow(deprecated)]
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
        for (byte, prev) in chunk.iter_mut().zip(previous) {
            *byte ^= prev;
        }
        previous = current;
    }

    pkcs7_unpad(buffer)
}

/// Decrypt a .sav container to the JSON document text
///
/// # Format
/// - Input: base64 text (surrounding whitespace ignored)
/// - After base64: AES-256-CBC ciphertext, PKCS7 padded
/// - After decryption: UTF-8 JSON
pub fn decrypt_sav(container: &[u8]) -> Result<String, CryptoError> {
    let trimmed = container.trim_ascii();
    let ciphertext = BASE64_STANDARD.decode(trimmed)?;
    let plaintext = decrypt_bytes(&ciphertext)?;
    Ok(String::from_utf8(plaintext)?)
}

/// Encrypt JSON document text to a .sav container (base64 text bytes)
pub fn encrypt_sav(text: &str) -> Vec<u8> {
    let ciphertext = encrypt_bytes(text.as_bytes());
    BASE64_STANDARD.encode(ciphertext).into_bytes()
}
