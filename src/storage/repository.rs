//! Per-user save files.
//!
//! Workflow for `save`: hash password → serialize record → encrypt → write
//! `<username>.sav`. `load` reverses it and checks the password only after the
//! file has decrypted, since decryption uses the installation key and says
//! nothing about the password.
//!
//! There is no locking. Two processes saving the same username at once can
//! leave a mixed or truncated file; different usernames never share a file.

use super::record::{Payload, UserRecord};
use super::username::{validate_username, MAX_FILE_NAME_LEN};
use crate::config::Config;
use crate::crypto::{Encryptor, KeyStore, PasswordHasher};
use crate::error::{Result, SaveError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct SaveRepository {
    save_dir: PathBuf,
    extension: String,
    key_store: KeyStore,
    hasher: PasswordHasher,
}

impl SaveRepository {
    pub fn new(save_dir: impl Into<PathBuf>, key_store: KeyStore, hasher: PasswordHasher) -> Self {
        Self {
            save_dir: save_dir.into(),
            extension: "sav".to_string(),
            key_store,
            hasher,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let hasher = PasswordHasher::from_config(&config.password)?;
        let mut repo = Self::new(config.save_dir(), KeyStore::new(config.key_path()), hasher);
        repo.extension = config.save_extension.clone();
        Ok(repo)
    }

    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }

    /// `<save_dir>/<username>.<ext>`. Names whose file would be too long or would
    /// land on the key file are rejected as invalid usernames.
    pub fn save_path(&self, username: &str) -> Result<PathBuf> {
        validate_username(username)?;

        let file_name = format!("{}.{}", username, self.extension);
        let invalid = |reason| SaveError::InvalidUsername {
            username: username.to_string(),
            reason,
        };
        if file_name.len() > MAX_FILE_NAME_LEN {
            return Err(invalid("save file name too long"));
        }

        let path = self.save_dir.join(file_name);
        if path == self.key_store.path() {
            return Err(invalid("collides with the key file"));
        }
        Ok(path)
    }

    pub fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.save_path(username)?.is_file())
    }

    /// Write a fresh record for `username`, replacing any existing save.
    ///
    /// The password is hashed again with a new salt on every call, so this also
    /// acts as registration or password reset. Use [`Self::update_progress`] to
    /// change progress for an existing user without touching the password.
    pub fn save(&self, username: &str, password: &str, progress: &Payload) -> Result<()> {
        let path = self.save_path(username)?;
        let password_hash = self.hasher.hash(password)?;
        let record = UserRecord::new(username, password_hash, progress.clone());

        self.write_record(&path, &record)?;
        tracing::info!("Saved progress for '{}' to {}", username, path.display());
        Ok(())
    }

    /// Decrypt the save for `username`, check the password and return its progress.
    pub fn load(&self, username: &str, password: &str) -> Result<Payload> {
        let record = self.read_verified(username, password)?;
        Ok(record.progress)
    }

    /// Replace progress for an existing user, keeping the stored password hash.
    ///
    /// Fails exactly like [`Self::load`] if the save is missing, unreadable or the
    /// password is wrong.
    pub fn update_progress(&self, username: &str, password: &str, progress: &Payload) -> Result<()> {
        let path = self.save_path(username)?;
        let mut record = self.read_verified(username, password)?;
        record.progress = progress.clone();

        self.write_record(&path, &record)?;
        tracing::info!("Updated progress for '{}'", username);
        Ok(())
    }

    fn read_verified(&self, username: &str, password: &str) -> Result<UserRecord> {
        let path = self.save_path(username)?;
        tracing::debug!("Loading save for '{}' from {}", username, path.display());

        let encrypted = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SaveError::SaveNotFound(username.to_string()));
            }
            Err(source) => return Err(SaveError::ReadFailed { path, source }),
        };

        let key = self.key_store.get_or_create_key()?;
        let plaintext = Encryptor::new(key.as_bytes())
            .map_err(|e| SaveError::DecryptionFailed(e.to_string()))
            .and_then(|encryptor| encryptor.decrypt(&encrypted))
            .inspect_err(|e| tracing::warn!("Cannot decrypt save for '{}': {}", username, e))?;

        let record = UserRecord::from_bytes(&plaintext)?;
        if record.username != username {
            return Err(SaveError::CorruptRecord(format!(
                "save file for '{}' holds a record for '{}'",
                username, record.username
            )));
        }

        let matches = self
            .hasher
            .verify(password, &record.password_hash)
            .map_err(|e| SaveError::CorruptRecord(e.to_string()))?;
        if !matches {
            tracing::warn!("Incorrect password for '{}'", username);
            return Err(SaveError::IncorrectPassword);
        }

        Ok(record)
    }

    fn write_record(&self, path: &Path, record: &UserRecord) -> Result<()> {
        let plaintext = record.to_bytes()?;

        let key = self.key_store.get_or_create_key()?;
        let encrypted = Encryptor::new(key.as_bytes())
            .map_err(|e| SaveError::EncryptionFailed(e.to_string()))?
            .encrypt(&plaintext)?;

        fs::create_dir_all(&self.save_dir).map_err(|source| SaveError::WriteFailed {
            path: self.save_dir.clone(),
            source,
        })?;
        fs::write(path, &encrypted).map_err(|source| SaveError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }
}
