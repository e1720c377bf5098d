//! Storage module - encrypted per-user save files.
//!
//! This module contains:
//! - The user record serialized inside each save
//! - Username validation for save file names
//! - The save repository (save / load / update)

pub mod record;
pub mod repository;
pub mod username;

pub use record::{Payload, UserRecord};
pub use repository::SaveRepository;
pub use username::validate_username;
