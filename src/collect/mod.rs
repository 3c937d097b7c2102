//! Collection pipeline.
//!
//! Coordinates the linear run:
//! 1. Fetch the team roster
//! 2. Fetch each player's game log
//! 3. Reduce each log to hit-game rates
//! 4. Rank the roster by weighted rate

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::calculate::DecayFactor;
use crate::models::{PlayerSummary, TeamReport};
use crate::report;
use crate::source::{SourceError, StatsSource};

/// Errors that can occur during collection.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Configuration for a collection run.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Team name or numeric MLB team ID
    pub team: String,

    /// Season year
    pub season: String,

    /// Decay factor for the weighted rates
    pub decay: DecayFactor,

    /// Delay between per-player game-log requests
    pub request_delay: Duration,
}

/// Collection pipeline over a stats source.
pub struct Collector {
    config: CollectConfig,
    source: Arc<dyn StatsSource>,
}

impl Collector {
    /// Create a new collector.
    pub fn new(config: CollectConfig, source: Arc<dyn StatsSource>) -> Self {
        Self { config, source }
    }

    /// Run a full collection: roster, per-player logs, ranked report.
    ///
    /// A roster failure aborts the run; a per-player failure (fetch
    /// error or empty log) is recorded in the report and the remaining
    /// roster is still processed.
    pub async fn collect(&self) -> Result<TeamReport, CollectError> {
        let roster = self
            .source
            .roster(&self.config.team, &self.config.season)
            .await?;
        info!(
            "Fetched roster for {}: {} players",
            self.config.team,
            roster.len()
        );

        let mut team_report = TeamReport::new(
            self.config.team.clone(),
            self.config.season.clone(),
            self.config.decay,
        );

        for (i, player) in roster.iter().enumerate() {
            if i > 0 && !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            let log = match self.source.game_log(player.id, &self.config.season).await {
                Ok(log) => log,
                Err(e) => {
                    error!("Failed to fetch game log for {}: {}", player.name, e);
                    team_report.errors.push(format!("{}: {}", player.name, e));
                    continue;
                }
            };

            match PlayerSummary::from_log(player.name.clone(), &log, self.config.decay) {
                Ok(summary) => team_report.players.push(summary),
                Err(e) => {
                    warn!("Skipping {}: {}", player.name, e);
                    team_report.errors.push(format!("{}: {}", player.name, e));
                }
            }
        }

        report::rank_players(&mut team_report.players);

        info!(
            "Collected {} summaries ({} errors)",
            team_report.players.len(),
            team_report.errors.len()
        );

        Ok(team_report)
    }
}
