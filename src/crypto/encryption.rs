//! AES-256-GCM encryption for save files.
//!
//! AES-GCM is an AEAD cipher: it gives confidentiality and integrity at once,
//! so a flipped bit anywhere in a save file fails decryption instead of yielding
//! silently corrupted progress.
//!
//! - Nonce 96-bit (12 bytes), random per message
//! - Tag 128-bit (16 bytes)

use crate::error::{Result, SaveError};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};

/// AES-256 key length (bytes)
pub const KEY_LEN: usize = 32;

/// Nonce length (bytes) - 96 bits
pub const NONCE_LEN: usize = 12;

/// Authentication tag length (bytes) - 128 bits
pub const TAG_LEN: usize = 16;

/// Header of every save file.
/// Format: DRGSAVE1 (8 bytes) + nonce (12 bytes) + ciphertext + tag (16 bytes)
pub const MAGIC_HEADER: &[u8; 8] = b"DRGSAVE1";

/// Encrypts and decrypts save blobs with one installation key
pub struct Encryptor {
    cipher: Aes256Gcm,
}

impl Encryptor {
    /// Key bytes are taken as stored; anything but 32 bytes is rejected here.
    pub fn new(key: &[u8]) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| SaveError::InvalidKey {
            expected: KEY_LEN,
            actual: key.len(),
        })?;
        Ok(Self { cipher })
    }

    /// Returns: header || nonce || ciphertext (plaintext + 16 bytes tag)
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| SaveError::EncryptionFailed(e.to_string()))?;

        let mut result = Vec::with_capacity(MAGIC_HEADER.len() + NONCE_LEN + ciphertext.len());
        result.extend_from_slice(MAGIC_HEADER);
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    /// Input format: header || nonce || ciphertext (includes 16 bytes tag)
    pub fn decrypt(&self, encrypted: &[u8]) -> Result<Vec<u8>> {
        if encrypted.len() < MAGIC_HEADER.len() + NONCE_LEN + TAG_LEN {
            return Err(SaveError::DecryptionFailed("data too short".to_string()));
        }

        let (header, body) = encrypted.split_at(MAGIC_HEADER.len());
        if header != MAGIC_HEADER {
            return Err(SaveError::DecryptionFailed(
                "wrong magic header".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = body.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher.decrypt(nonce, ciphertext).map_err(|_| {
            SaveError::DecryptionFailed("authentication failed (tampered data or wrong key)".into())
        })
    }
}
