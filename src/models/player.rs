//! Roster identity models.

use serde::{Deserialize, Serialize};

/// A player identity as returned by the roster endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Source-assigned numeric player ID
    pub id: u64,

    /// Display name
    pub name: String,
}

impl Player {
    /// Create a new Player.
    pub fn new(id: u64, name: String) -> Self {
        Self { id, name }
    }
}
