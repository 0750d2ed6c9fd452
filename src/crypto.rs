//! AES-CBC for encrypted DC-09 bodies. The protocol fixes the IV to sixteen
//! zero bytes and transports ciphertext as uppercase hex; response plaintext
//! is left-padded with '0' characters so the panel can discard everything
//! before the first ']'. A fresh cipher is built per message, which keeps
//! accounts stateless across workers.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use thiserror::Error;

pub const BLOCK_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CryptoError {
    #[error("Ciphertext is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Ciphertext length {0} is not a multiple of the AES block size")]
    InvalidLength(usize),
    #[error("Key length {0} is not 16, 24 or 32 bytes")]
    InvalidKeyLength(usize),
}

enum Cipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl Cipher {
    fn new(key: &[u8]) -> Result<Self, CryptoError> {
        match key.len() {
            16 => Ok(Cipher::Aes128(Aes128::new_from_slice(key).unwrap())),
            24 => Ok(Cipher::Aes192(Aes192::new_from_slice(key).unwrap())),
            32 => Ok(Cipher::Aes256(Aes256::new_from_slice(key).unwrap())),
            n => Err(CryptoError::InvalidKeyLength(n)),
        }
    }

    fn encrypt_block(&self, block: &mut Block) {
        match self {
            Cipher::Aes128(c) => c.encrypt_block(block),
            Cipher::Aes192(c) => c.encrypt_block(block),
            Cipher::Aes256(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut Block) {
        match self {
            Cipher::Aes128(c) => c.decrypt_block(block),
            Cipher::Aes192(c) => c.decrypt_block(block),
            Cipher::Aes256(c) => c.decrypt_block(block),
        }
    }
}

/// Left-pad a response body with '0' to the next block boundary. An aligned
/// message still gains a full block, matching what panels expect.
pub fn pad_left(message: &str) -> String {
    let pad = BLOCK_SIZE - message.len() % BLOCK_SIZE;
    let mut padded = String::with_capacity(message.len() + pad);
    for _ in 0..pad {
        padded.push('0');
    }
    padded.push_str(message);
    padded
}

/// Pad, CBC-encrypt with a zero IV and return uppercase hex.
pub fn encrypt_hex(key: &[u8], message: &str) -> Result<String, CryptoError> {
    let cipher = Cipher::new(key)?;
    let padded = pad_left(message);
    let mut out = Vec::with_capacity(padded.len());
    let mut chain = Block::default();
    for chunk in padded.as_bytes().chunks(BLOCK_SIZE) {
        let mut block = Block::default();
        for (b, (&p, &c)) in block.iter_mut().zip(chunk.iter().zip(chain.iter())) {
            *b = p ^ c;
        }
        cipher.encrypt_block(&mut block);
        out.extend_from_slice(&block);
        chain = block;
    }
    Ok(hex::encode_upper(out))
}

/// Hex-decode, CBC-decrypt with a zero IV and UTF-8-decode with replacement.
/// The left padding is left in place; the content grammar discards it.
pub fn decrypt_hex(key: &[u8], ciphertext: &str) -> Result<String, CryptoError> {
    let cipher = Cipher::new(key)?;
    let data = hex::decode(ciphertext)?;
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidLength(data.len()));
    }
    let mut out = Vec::with_capacity(data.len());
    let mut chain = Block::default();
    for chunk in data.chunks(BLOCK_SIZE) {
        let mut block = Block::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        for (b, &c) in block.iter_mut().zip(chain.iter()) {
            *b ^= c;
        }
        out.extend_from_slice(&block);
        chain = Block::clone_from_slice(chunk);
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"AAAAAAAAAAAAAAAA";

    #[test]
    fn test_pad_left() {
        assert_eq!(pad_left("]"), "000000000000000]");
        assert_eq!(pad_left("0123456789ABCDEF").len(), 32);
        assert!(pad_left("]_14:12:04,09-25-2019").starts_with("00000000000"));
    }

    #[test]
    fn test_round_trip() {
        let message = "]_14:12:04,09-25-2019";
        let hex = encrypt_hex(KEY, message).unwrap();
        assert_eq!(hex.len() % (2 * BLOCK_SIZE), 0);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        let plain = decrypt_hex(KEY, &hex).unwrap();
        assert!(plain.ends_with(message));
        assert_eq!(plain.len() % BLOCK_SIZE, 0);
    }

    #[test]
    fn test_wrong_key_yields_garbage_not_panic() {
        let hex = encrypt_hex(KEY, "]_08:40:47,07-08-2020").unwrap();
        let plain = decrypt_hex(b"BBBBBBBBBBBBBBBB", &hex).unwrap();
        assert!(!plain.ends_with("]_08:40:47,07-08-2020"));
    }

    #[test]
    fn test_bad_inputs() {
        assert!(matches!(
            decrypt_hex(KEY, "ZZZZ"),
            Err(CryptoError::InvalidHex(_))
        ));
        assert!(matches!(
            decrypt_hex(KEY, "AABB"),
            Err(CryptoError::InvalidLength(2))
        ));
        assert!(matches!(
            encrypt_hex(b"short", "]"),
            Err(CryptoError::InvalidKeyLength(5))
        ));
    }

    #[test]
    fn test_key_sizes() {
        for key in [
            &b"AAAAAAAAAAAAAAAA"[..],
            &b"AAAAAAAAAAAAAAAAAAAAAAAA"[..],
            &b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"[..],
        ] {
            let hex = encrypt_hex(key, "]_12:00:00,01-01-2024").unwrap();
            assert!(decrypt_hex(key, &hex).unwrap().ends_with("]_12:00:00,01-01-2024"));
        }
    }
}
