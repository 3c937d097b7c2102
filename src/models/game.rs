//! Per-game hitting log models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One played game for a player in a season. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Calendar date, when the source provides one
    pub date: Option<NaiveDate>,

    /// Hit count for the game
    pub hits: u32,
}

impl Game {
    /// Create a new Game.
    pub fn new(date: Option<NaiveDate>, hits: u32) -> Self {
        Self { date, hits }
    }

    /// A hit-game is a game with at least one hit.
    pub fn is_hit_game(&self) -> bool {
        self.hits > 0
    }
}

/// A player's per-game log for one season, ordered by date ascending
/// as returned by the source.
pub type GameLog = Vec<Game>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_game() {
        assert!(Game::new(None, 1).is_hit_game());
        assert!(Game::new(None, 3).is_hit_game());
        assert!(!Game::new(None, 0).is_hit_game());
    }

    #[test]
    fn test_game_serialization() {
        let game = Game::new(NaiveDate::from_ymd_opt(2023, 4, 1), 2);
        let json = serde_json::to_string(&game).unwrap();
        let parsed: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game, parsed);
    }

    #[test]
    fn test_game_without_date() {
        let json = r#"{"date":null,"hits":1}"#;
        let parsed: Game = serde_json::from_str(json).unwrap();
        assert!(parsed.date.is_none());
        assert!(parsed.is_hit_game());
    }
}
