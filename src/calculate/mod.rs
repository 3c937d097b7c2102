//! Hitting-rate calculation engine.
//!
//! Computes per-player hit-game rates from a season game log:
//! - Unweighted: share of games with at least one hit
//! - Recency-weighted: exponentially decayed toward recent games

use thiserror::Error;

use crate::models::Game;

/// Errors from rate computation.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Game log is empty; hit-game rate is undefined")]
    EmptyLog,

    #[error("Decay factor must be in (0, 1], got {0}")]
    InvalidDecayFactor(f64),
}

/// Per-game multiplicative discount applied to weight as games recede
/// into the past. Valid range is (0, 1]; 1.0 disables decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFactor(f64);

impl DecayFactor {
    /// Create a validated decay factor.
    pub fn new(value: f64) -> Result<Self, StatsError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(StatsError::InvalidDecayFactor(value))
        }
    }

    /// Get the raw factor.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for DecayFactor {
    fn default() -> Self {
        Self(0.95)
    }
}

impl std::fmt::Display for DecayFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Share of games with at least one hit.
///
/// Undefined for an empty log; the caller records the failure for that
/// player and continues with the rest of the roster.
pub fn hit_game_rate(log: &[Game]) -> Result<f64, StatsError> {
    if log.is_empty() {
        return Err(StatsError::EmptyLog);
    }

    let hit_games = log.iter().filter(|g| g.is_hit_game()).count();
    Ok(hit_games as f64 / log.len() as f64)
}

/// Recency-weighted share of games with at least one hit.
///
/// The log is ordered by date ascending; traversal runs newest to
/// oldest. The most recent game carries weight 1.0 and each older game
/// is discounted by the decay factor. Dividing by the normalizing sum
/// keeps the result a proper average regardless of log length.
/// An empty log yields exactly 0.0.
pub fn weighted_hit_game_rate(log: &[Game], decay: DecayFactor) -> f64 {
    let mut weighted_sum = 0.0;
    let mut normalizing_sum = 0.0;
    let mut current_weight = 1.0;

    for game in log.iter().rev() {
        if game.is_hit_game() {
            weighted_sum += current_weight;
        }
        normalizing_sum += current_weight;
        current_weight *= decay.value();
    }

    if normalizing_sum == 0.0 {
        0.0
    } else {
        weighted_sum / normalizing_sum
    }
}
