//! Data source adapters.
//!
//! A source supplies a team roster and each player's per-game hitting
//! log for a season. `MlbSource` is the production implementation;
//! `MockSource` backs pipeline tests.

mod mlb;

pub use mlb::{MlbSource, MlbSourceConfig};

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::models::{GameLog, Player};

/// Errors from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),
}

/// An adapter that supplies roster and game-log data for a season.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Player identities for a team's season, in roster-fetch order.
    async fn roster(&self, team: &str, season: &str) -> Result<Vec<Player>, SourceError>;

    /// One player's per-game hitting log, ordered by date ascending.
    /// May be empty for a player with no games in the season.
    async fn game_log(&self, player_id: u64, season: &str) -> Result<GameLog, SourceError>;
}

/// In-memory source for tests: a fixed roster plus per-player logs.
#[derive(Default)]
pub struct MockSource {
    roster: Vec<Player>,
    logs: HashMap<u64, GameLog>,
}

impl MockSource {
    pub fn new(roster: Vec<Player>, logs: HashMap<u64, GameLog>) -> Self {
        Self { roster, logs }
    }
}

#[async_trait]
impl StatsSource for MockSource {
    async fn roster(&self, _team: &str, _season: &str) -> Result<Vec<Player>, SourceError> {
        Ok(self.roster.clone())
    }

    async fn game_log(&self, player_id: u64, _season: &str) -> Result<GameLog, SourceError> {
        Ok(self.logs.get(&player_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Game;

    #[tokio::test]
    async fn test_mock_source_roster() {
        let source = MockSource::new(
            vec![Player::new(1, "A".to_string()), Player::new(2, "B".to_string())],
            HashMap::new(),
        );

        let roster = source.roster("Rays", "2023").await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "A");
    }

    #[tokio::test]
    async fn test_mock_source_missing_log_is_empty() {
        let mut logs = HashMap::new();
        logs.insert(1, vec![Game::new(None, 1)]);
        let source = MockSource::new(vec![], logs);

        assert_eq!(source.game_log(1, "2023").await.unwrap().len(), 1);
        assert!(source.game_log(99, "2023").await.unwrap().is_empty());
    }
}
