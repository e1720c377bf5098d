//! Crypto module - save file encryption and password hashing.
//!
//! This module contains:
//! - AES-256-GCM encryption/decryption of save blobs
//! - The installation key store (key.bin)
//! - Argon2id password hashing

pub mod encryption;
pub mod key_store;
pub mod password;

pub use encryption::Encryptor;
pub use key_store::{EncryptionKey, KeyStore};
pub use password::PasswordHasher;
