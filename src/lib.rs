//! dragonsave - encrypted, password-gated save files for game progress.
//!
//! Each user's progress is stored as one AES-256-GCM encrypted file
//! (`<username>.sav`) next to a single installation key (`key.bin`). Access is
//! gated by an Argon2id password hash kept inside the encrypted record.
//!
//! ```no_run
//! use dragonsave::{Config, SaveRepository};
//! use serde_json::json;
//!
//! # fn main() -> dragonsave::Result<()> {
//! let repo = SaveRepository::from_config(&Config::default())?;
//! repo.save("alice", "correcthorse", &json!({"level": 3, "gold": 120}))?;
//! let progress = repo.load("alice", "correcthorse")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;

pub use config::Config;
pub use crypto::{EncryptionKey, KeyStore, PasswordHasher};
pub use error::{Result, SaveError, SaveErrorKind};
pub use storage::{Payload, SaveRepository, UserRecord};
