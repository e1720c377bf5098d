//! Username checks applied before a save file path is built.
//!
//! The username becomes the file stem of `<username>.sav`, so anything that could
//! leave the save directory or produce an unportable file name is rejected.

use crate::error::{Result, SaveError};

/// Limit in bytes, leaving room for the extension under the usual 255-byte
/// file name limit.
pub const MAX_USERNAME_LEN: usize = 128;

/// Longest file name (stem + extension) accepted for a save file, in bytes.
pub const MAX_FILE_NAME_LEN: usize = 255;

pub fn validate_username(username: &str) -> Result<()> {
    let reason = if username.is_empty() {
        Some("must not be empty")
    } else if username == "." || username == ".." {
        Some("must not be a relative path component")
    } else if username.len() > MAX_USERNAME_LEN {
        Some("too long")
    } else if username.contains(['/', '\\', ':']) {
        Some("must not contain path separators")
    } else if username.chars().any(char::is_control) {
        Some("must not contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SaveError::InvalidUsername {
            username: username.escape_debug().to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
