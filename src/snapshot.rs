//! Game snapshots for transport and storage.
//!
//! JSON is the wire format shared with peers; bincode is a compact binary
//! form for local saves. Both round-trip a `Game` losslessly, RNG position
//! included.

use thiserror::Error;

use crate::core::Game;

/// Snapshot encode or decode failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid binary snapshot: {0}")]
    Binary(#[from] bincode::Error),
}

/// Encode a game as JSON.
pub fn to_json(game: &Game) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(game)?)
}

/// Decode a game from JSON.
pub fn from_json(json: &str) -> Result<Game, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a game with bincode.
pub fn to_bytes(game: &Game) -> Result<Vec<u8>, SnapshotError> {
    Ok(bincode::serialize(game)?)
}

/// Decode a game from bincode.
pub fn from_bytes(bytes: &[u8]) -> Result<Game, SnapshotError> {
    Ok(bincode::deserialize(bytes)?)
}
