//! Error types for save file operations.
//!
//! Every failure a caller may need to react to differently gets its own variant:
//! "no such user" drives registration, "incorrect password" drives a login retry,
//! and "decryption failed" / "corrupt record" mean the data itself is unusable.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SaveError>;

#[derive(Debug, Error)]
pub enum SaveError {
    /// The key file or its directory could not be created or read.
    #[error("key store I/O error at {}: {source}", .path.display())]
    KeyStoreIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no save file found for user '{0}'")]
    SaveNotFound(String),

    /// Tampered or truncated ciphertext, or a wrong/mismatched key.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Key material has the wrong length for AES-256-GCM.
    #[error("invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    /// Decrypted bytes do not form a valid user record.
    #[error("corrupt save record: {0}")]
    CorruptRecord(String),

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    #[error("password hashing failed: {0}")]
    HashFailed(String),

    #[error("failed to read save file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write save file {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid username '{username}': {reason}")]
    InvalidUsername {
        username: String,
        reason: &'static str,
    },
}

/// Fieldless mirror of [`SaveError`], convenient for matching and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveErrorKind {
    KeyStoreIo,
    SaveNotFound,
    DecryptionFailed,
    EncryptionFailed,
    InvalidKey,
    CorruptRecord,
    IncorrectPassword,
    MalformedHash,
    HashFailed,
    ReadFailed,
    WriteFailed,
    InvalidUsername,
}

impl SaveError {
    pub fn kind(&self) -> SaveErrorKind {
        match self {
            SaveError::KeyStoreIo { .. } => SaveErrorKind::KeyStoreIo,
            SaveError::SaveNotFound(_) => SaveErrorKind::SaveNotFound,
            SaveError::DecryptionFailed(_) => SaveErrorKind::DecryptionFailed,
            SaveError::EncryptionFailed(_) => SaveErrorKind::EncryptionFailed,
            SaveError::InvalidKey { .. } => SaveErrorKind::InvalidKey,
            SaveError::CorruptRecord(_) => SaveErrorKind::CorruptRecord,
            SaveError::IncorrectPassword => SaveErrorKind::IncorrectPassword,
            SaveError::MalformedHash(_) => SaveErrorKind::MalformedHash,
            SaveError::HashFailed(_) => SaveErrorKind::HashFailed,
            SaveError::ReadFailed { .. } => SaveErrorKind::ReadFailed,
            SaveError::WriteFailed { .. } => SaveErrorKind::WriteFailed,
            SaveError::InvalidUsername { .. } => SaveErrorKind::InvalidUsername,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            SaveError::SaveNotFound("alice".into()).kind(),
            SaveErrorKind::SaveNotFound
        );
        assert_eq!(
            SaveError::IncorrectPassword.kind(),
            SaveErrorKind::IncorrectPassword
        );
        let err = SaveError::WriteFailed {
            path: PathBuf::from("/tmp/alice.sav"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), SaveErrorKind::WriteFailed);
    }

    #[test]
    fn test_display_does_not_collapse_kinds() {
        let not_found = SaveError::SaveNotFound("bob".into()).to_string();
        let wrong_pw = SaveError::IncorrectPassword.to_string();
        let corrupt = SaveError::CorruptRecord("bad json".into()).to_string();

        assert!(not_found.contains("bob"));
        assert_ne!(not_found, wrong_pw);
        assert_ne!(wrong_pw, corrupt);
    }
}
