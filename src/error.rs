//! Error types for the fallible edges of the crate
//!
//! The journal core itself is total; only storage and configuration can fail.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum StorageError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Serialization error: {0}")]
  Serialization(String),
}

impl From<sqlx::Error> for StorageError {
  fn from(e: sqlx::Error) -> Self {
    StorageError::Database(e.to_string())
  }
}

impl From<serde_json::Error> for StorageError {
  fn from(e: serde_json::Error) -> Self {
    StorageError::Serialization(e.to_string())
  }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ConfigError {
  #[error("Invalid value for {name}: {value:?}")]
  Invalid { name: String, value: String },
}
