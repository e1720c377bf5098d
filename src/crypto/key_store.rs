//! Installation key storage.
//!
//! One symmetric key encrypts every save file. It is generated on first use and
//! kept as raw bytes in `key.bin`; losing that file makes all existing saves
//! unreadable.
//!
//! Two processes initializing the key at the same moment race on the file
//! create. That case is not handled.

use super::encryption::KEY_LEN;
use crate::error::{Result, SaveError};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw key bytes exactly as stored on disk.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey(Vec<u8>);

impl EncryptionKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn generate() -> Self {
        let mut bytes = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

// Key bytes never end up in logs or panic messages.
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptionKey({} bytes)", self.0.len())
    }
}

/// Loads or lazily generates the key file at a fixed path.
#[derive(Debug, Clone)]
pub struct KeyStore {
    key_path: PathBuf,
}

impl KeyStore {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.key_path
    }

    pub fn exists(&self) -> bool {
        self.key_path.is_file()
    }

    /// Read the key, generating and persisting a new one if the file is absent.
    ///
    /// Existing contents are returned as-is without checking length or format;
    /// a malformed key surfaces later as an encryption/decryption failure.
    pub fn get_or_create_key(&self) -> Result<EncryptionKey> {
        if self.exists() {
            tracing::debug!("Loading encryption key from {}", self.key_path.display());
            let bytes = fs::read(&self.key_path).map_err(|e| self.io_error(e))?;
            return Ok(EncryptionKey(bytes));
        }

        tracing::info!("Generating new encryption key at {}", self.key_path.display());
        if let Some(parent) = self.key_path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let key = EncryptionKey::generate();
        fs::write(&self.key_path, key.as_bytes()).map_err(|e| self.io_error(e))?;

        // Restrict key file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.key_path, fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }

        Ok(key)
    }

    fn io_error(&self, source: std::io::Error) -> SaveError {
        SaveError::KeyStoreIo {
            path: self.key_path.clone(),
            source,
        }
    }
}
