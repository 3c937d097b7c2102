//! Derived per-run summary models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculate::{self, DecayFactor, StatsError};

use super::GameLog;

/// Derived hitting-form record for one player. Created fresh per run,
/// never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// Player name
    pub name: String,

    /// Games in the season log
    pub games_played: usize,

    /// Share of games with at least one hit (0.0 to 1.0)
    pub hit_rate: f64,

    /// Recency-weighted share of games with at least one hit (0.0 to 1.0)
    pub weighted_hit_rate: f64,
}

impl PlayerSummary {
    /// Compute a summary from a chronologically ascending game log.
    ///
    /// Fails with `StatsError::EmptyLog` for a player with zero games;
    /// the weighted rate of an empty log would be 0.0, but the
    /// unweighted rate is undefined.
    pub fn from_log(name: String, log: &GameLog, decay: DecayFactor) -> Result<Self, StatsError> {
        let hit_rate = calculate::hit_game_rate(log)?;
        let weighted_hit_rate = calculate::weighted_hit_game_rate(log, decay);

        Ok(Self {
            name,
            games_played: log.len(),
            hit_rate,
            weighted_hit_rate,
        })
    }
}

/// A full roster report for one run. Discarded at process exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamReport {
    /// Team the roster was fetched for
    pub team: String,

    /// Season the logs cover
    pub season: String,

    /// Decay factor used for the weighted rates
    pub decay_factor: f64,

    /// When the report was computed
    pub generated_at: DateTime<Utc>,

    /// Per-player summaries in roster-fetch order
    pub players: Vec<PlayerSummary>,

    /// Per-player failures that did not abort the run
    pub errors: Vec<String>,
}

impl TeamReport {
    /// Create an empty report for a run.
    pub fn new(team: String, season: String, decay: DecayFactor) -> Self {
        Self {
            team,
            season,
            decay_factor: decay.value(),
            generated_at: Utc::now(),
            players: Vec::new(),
            errors: Vec::new(),
        }
    }
}
