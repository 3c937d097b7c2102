//! MLB Stats API source.
//!
//! Two endpoints: the bdfed player-stats index for the team roster,
//! and the statsapi gameLog endpoint for each player's per-game
//! hitting line. Wire structs stay private to this module; unknown
//! payload fields are ignored.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::fetch::Fetcher;
use crate::models::{Game, GameLog, Player};

use super::{SourceError, StatsSource};

/// Known team name to MLB team ID mappings.
const TEAM_IDS: &[(&str, u32)] = &[("orioles", 110), ("twins", 142), ("rays", 139)];

/// Endpoint configuration for the MLB source.
#[derive(Debug, Clone)]
pub struct MlbSourceConfig {
    /// statsapi base, e.g. `https://statsapi.mlb.com/api/v1`
    pub api_base: String,

    /// Roster index endpoint
    pub roster_url: String,
}

impl Default for MlbSourceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://statsapi.mlb.com/api/v1".to_string(),
            roster_url: "https://bdfed.stitch.mlbinfra.com/bdfed/stats/player".to_string(),
        }
    }
}

/// MLB Stats API client.
pub struct MlbSource {
    fetcher: Fetcher,
    config: MlbSourceConfig,
}

impl MlbSource {
    /// Create a new source over a fetcher.
    pub fn new(fetcher: Fetcher, config: MlbSourceConfig) -> Self {
        Self { fetcher, config }
    }

    /// Resolve a team name or raw numeric ID to an MLB team ID.
    pub fn resolve_team_id(team: &str) -> Result<u32, SourceError> {
        if let Ok(id) = team.parse::<u32>() {
            return Ok(id);
        }

        let lower = team.to_lowercase();
        TEAM_IDS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, id)| *id)
            .ok_or_else(|| SourceError::UnknownTeam(team.to_string()))
    }

    fn roster_url(&self, team_id: u32, season: &str) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.config.roster_url)?;
        url.query_pairs_mut()
            .append_pair("stitch_env", "prod")
            .append_pair("season", season)
            .append_pair("sportId", "1")
            .append_pair("stats", "season")
            .append_pair("group", "hitting")
            .append_pair("gameType", "R")
            .append_pair("limit", "250")
            .append_pair("offset", "0")
            .append_pair("sortStat", "gamesPlayed")
            .append_pair("order", "desc")
            .append_pair("teamId", &team_id.to_string());
        Ok(url)
    }

    fn game_log_url(&self, player_id: u64, season: &str) -> Result<Url, SourceError> {
        let base = self.config.api_base.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/people/{}/stats", base, player_id))?;
        url.query_pairs_mut()
            .append_pair("stats", "gameLog")
            .append_pair("leagueListId", "mlb_hist")
            .append_pair("group", "hitting")
            .append_pair("gameType", "R")
            .append_pair("sitCodes", "1,2,3,4,5,6,7,8,9,10,11,12")
            .append_pair("hydrate", "team")
            .append_pair("season", season)
            .append_pair("language", "en");
        Ok(url)
    }
}

#[async_trait]
impl StatsSource for MlbSource {
    async fn roster(&self, team: &str, season: &str) -> Result<Vec<Player>, SourceError> {
        let team_id = Self::resolve_team_id(team)?;
        let url = self.roster_url(team_id, season)?;

        let response: RosterResponse = self.fetcher.get_json(&url).await?;
        debug!("Roster for team {}: {} players", team_id, response.stats.len());

        Ok(response
            .stats
            .into_iter()
            .map(|entry| Player::new(entry.player_id, entry.player_name))
            .collect())
    }

    async fn game_log(&self, player_id: u64, season: &str) -> Result<GameLog, SourceError> {
        let url = self.game_log_url(player_id, season)?;

        let response: GameLogResponse = self.fetcher.get_json(&url).await?;
        let splits = response
            .stats
            .into_iter()
            .next()
            .map(|group| group.splits)
            .unwrap_or_default();

        Ok(splits.into_iter().map(parse_split).collect())
    }
}

fn parse_split(split: GameSplit) -> Game {
    let date = split.date.as_deref().and_then(|d| {
        let parsed = NaiveDate::parse_from_str(d, "%Y-%m-%d").ok();
        if parsed.is_none() {
            warn!("Unparseable game date: {}", d);
        }
        parsed
    });

    Game::new(date, split.stat.hits)
}

// ── Wire structs ──

#[derive(Debug, Deserialize)]
struct RosterResponse {
    #[serde(default)]
    stats: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterEntry {
    player_id: u64,
    player_name: String,
}

#[derive(Debug, Deserialize)]
struct GameLogResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

#[derive(Debug, Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<GameSplit>,
}

#[derive(Debug, Deserialize)]
struct GameSplit {
    date: Option<String>,
    stat: SplitStat,
}

#[derive(Debug, Deserialize)]
struct SplitStat {
    #[serde(default)]
    hits: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetcherConfig;
    use tempfile::TempDir;

    fn test_source(temp_dir: &TempDir) -> MlbSource {
        let fetcher = Fetcher::new(FetcherConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        })
        .unwrap();
        MlbSource::new(fetcher, MlbSourceConfig::default())
    }

    #[test]
    fn test_resolve_team_id_known_names() {
        assert_eq!(MlbSource::resolve_team_id("Rays").unwrap(), 139);
        assert_eq!(MlbSource::resolve_team_id("orioles").unwrap(), 110);
        assert_eq!(MlbSource::resolve_team_id("TWINS").unwrap(), 142);
    }

    #[test]
    fn test_resolve_team_id_numeric() {
        assert_eq!(MlbSource::resolve_team_id("147").unwrap(), 147);
    }

    #[test]
    fn test_resolve_team_id_unknown() {
        assert!(matches!(
            MlbSource::resolve_team_id("Mars Rovers"),
            Err(SourceError::UnknownTeam(_))
        ));
    }

    #[test]
    fn test_roster_url_carries_team_and_season() {
        let temp_dir = TempDir::new().unwrap();
        let source = test_source(&temp_dir);

        let url = source.roster_url(139, "2023").unwrap();
        let query = url.query().unwrap();

        assert!(query.contains("teamId=139"));
        assert!(query.contains("season=2023"));
        assert!(query.contains("group=hitting"));
        assert!(query.contains("sortStat=gamesPlayed"));
    }

    #[test]
    fn test_game_log_url_shape() {
        let temp_dir = TempDir::new().unwrap();
        let source = test_source(&temp_dir);

        let url = source.game_log_url(665489, "2023").unwrap();

        assert!(url.path().ends_with("/people/665489/stats"));
        assert!(url.query().unwrap().contains("stats=gameLog"));
    }

    #[test]
    fn test_roster_payload_parsing() {
        let json = r#"{
            "stats": [
                {"playerId": 665489, "playerName": "Player One", "teamAbbrev": "TB"},
                {"playerId": 543760, "playerName": "Player Two", "avg": ".301"}
            ]
        }"#;

        let parsed: RosterResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.stats.len(), 2);
        assert_eq!(parsed.stats[0].player_id, 665489);
        assert_eq!(parsed.stats[1].player_name, "Player Two");
    }

    #[test]
    fn test_game_log_payload_parsing() {
        let json = r#"{
            "stats": [
                {
                    "splits": [
                        {"date": "2023-04-01", "stat": {"hits": 2, "atBats": 4}},
                        {"date": "2023-04-02", "stat": {"hits": 0}},
                        {"stat": {"hits": 1}}
                    ]
                }
            ]
        }"#;

        let parsed: GameLogResponse = serde_json::from_str(json).unwrap();
        let games: Vec<Game> = parsed
            .stats
            .into_iter()
            .next()
            .unwrap()
            .splits
            .into_iter()
            .map(parse_split)
            .collect();

        assert_eq!(games.len(), 3);
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(games[0].hits, 2);
        assert!(!games[1].is_hit_game());
        assert!(games[2].date.is_none());
        assert!(games[2].is_hit_game());
    }

    #[test]
    fn test_empty_stats_is_empty_log() {
        let json = r#"{"stats": []}"#;
        let parsed: GameLogResponse = serde_json::from_str(json).unwrap();
        let splits = parsed
            .stats
            .into_iter()
            .next()
            .map(|g| g.splits)
            .unwrap_or_default();
        assert!(splits.is_empty());
    }
}
