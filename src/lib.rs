//! # Hit Tracker
//!
//! A local MLB hitting-form tracker: fetches a team roster and each
//! player's per-game hitting log, then ranks the roster by how often
//! each player records at least one hit, with an exponentially decayed
//! weighting toward recent games.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, players, summaries)
//! - **calculate**: Hit-game rate computation (unweighted + weighted)
//! - **fetch**: HTTP fetching with a local response cache
//! - **source**: Stats API adapters (roster + game logs)
//! - **collect**: The roster → logs → rates → ranking pipeline
//! - **report**: Table and tab-delimited rendering
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod collect;
pub mod config;
pub mod fetch;
pub mod models;
pub mod report;
pub mod source;

pub use models::*;

/// Format a rate for display with two decimal places.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate_rounds() {
        assert_eq!(format_rate(0.5), "0.50");
        assert_eq!(format_rate(0.513), "0.51");
        assert_eq!(format_rate(0.519), "0.52");
    }

    #[test]
    fn test_format_rate_bounds() {
        assert_eq!(format_rate(0.0), "0.00");
        assert_eq!(format_rate(1.0), "1.00");
    }
}
