//! The record stored (encrypted) inside each save file.

use crate::error::{Result, SaveError};
use serde::{Deserialize, Serialize};

/// Progress payload as supplied by the game. Opaque to this crate.
pub type Payload = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Argon2id PHC string, never the plaintext password
    pub password_hash: String,
    pub progress: Payload,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password_hash: String, progress: Payload) -> Self {
        Self {
            username: username.into(),
            password_hash,
            progress,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| SaveError::CorruptRecord(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| SaveError::CorruptRecord(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveErrorKind;
    use serde_json::json;

    #[test]
    fn test_field_set() -> Result<()> {
        let record = UserRecord::new("alice", "$argon2id$...".into(), json!({"level": 3}));
        let value: serde_json::Value = serde_json::from_slice(&record.to_bytes()?).unwrap();

        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"username"));
        assert!(keys.contains(&"password_hash"));
        assert!(keys.contains(&"progress"));
        Ok(())
    }

    #[test]
    fn test_nested_progress_survives() -> Result<()> {
        let progress = json!({
            "coins": 420,
            "rebirths": 2,
            "rebirthBonus": 20,
            "inventory": [
                {"name": "Tank Dragon", "count": 3, "coinsPerSec": 5, "color": "#888"},
                {"name": "Rare Dragon", "count": 1, "coinsPerSec": 10, "color": "#3ef"}
            ],
            "running": true,
            "ratio": 0.75,
            "note": null
        });
        let record = UserRecord::new("alice", "hash".into(), progress.clone());

        let decoded = UserRecord::from_bytes(&record.to_bytes()?)?;
        assert_eq!(decoded.progress, progress);
        Ok(())
    }

    #[test]
    fn test_garbage_is_corrupt_record() {
        let err = UserRecord::from_bytes(b"{\"username\": 1}").unwrap_err();
        assert_eq!(err.kind(), SaveErrorKind::CorruptRecord);
    }
}
