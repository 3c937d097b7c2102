use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hit_tracker::collect::{CollectConfig, Collector};
use hit_tracker::config::AppConfig;
use hit_tracker::fetch::{Fetcher, FetcherConfig};
use hit_tracker::models::PlayerSummary;
use hit_tracker::report;
use hit_tracker::source::{MlbSource, MlbSourceConfig, StatsSource};

#[derive(Parser)]
#[command(name = "hit-tracker")]
#[command(about = "MLB hitting-form tracker with recency-weighted metrics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the roster and print ranked hit-game rates
    Report {
        /// Team name or numeric MLB team ID
        #[arg(long)]
        team: Option<String>,

        /// Season year
        #[arg(long)]
        season: Option<String>,

        /// Decay factor in (0, 1]
        #[arg(long)]
        decay: Option<f64>,

        /// Output format: "table" or "tsv"
        #[arg(long, default_value = "table")]
        format: String,

        /// Bypass the response cache
        #[arg(long)]
        fresh: bool,
    },

    /// List the team roster
    Roster {
        /// Team name or numeric MLB team ID
        #[arg(long)]
        team: Option<String>,

        /// Season year
        #[arg(long)]
        season: Option<String>,
    },

    /// Show one player's game log and rates
    Log {
        /// Numeric MLB player ID
        player_id: u64,

        /// Season year
        #[arg(long)]
        season: Option<String>,

        /// Decay factor in (0, 1]
        #[arg(long)]
        decay: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting hit-tracker v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration: the file if present, defaults otherwise
    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    if let Some(dir) = cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    match cli.command {
        Commands::Report {
            team,
            season,
            decay,
            format,
            fresh,
        } => {
            apply_overrides(&mut config, team, season, decay);
            config.validate()?;
            let decay = config.decay()?;

            let source = build_source(&config, fresh)?;
            let collector = Collector::new(
                CollectConfig {
                    team: config.team.clone(),
                    season: config.season.clone(),
                    decay,
                    request_delay: Duration::from_millis(config.source.request_delay_ms),
                },
                Arc::new(source),
            );

            let team_report = collector.collect().await?;

            match format.as_str() {
                "table" => print!("{}", report::render_markdown_table(&team_report.players)),
                "tsv" => print!("{}", report::render_tsv(&team_report.players)),
                other => {
                    eprintln!("Unknown format: {}. Use 'table' or 'tsv'.", other);
                    return Ok(());
                }
            }

            if !team_report.errors.is_empty() {
                println!("\nSkipped:");
                for err in &team_report.errors {
                    println!("  - {}", err);
                }
            }
        }

        Commands::Roster { team, season } => {
            apply_overrides(&mut config, team, season, None);
            config.validate()?;

            let source = build_source(&config, false)?;
            let roster = source.roster(&config.team, &config.season).await?;

            println!(
                "=== Roster: {} ({} players, season {}) ===\n",
                config.team,
                roster.len(),
                config.season
            );
            for player in &roster {
                println!("  {:>8}  {}", player.id, player.name);
            }
        }

        Commands::Log {
            player_id,
            season,
            decay,
        } => {
            apply_overrides(&mut config, None, season, decay);
            config.validate()?;
            let decay = config.decay()?;

            let source = build_source(&config, false)?;
            let log = source.game_log(player_id, &config.season).await?;

            println!(
                "=== Game log: player {} (season {}) ===\n",
                player_id, config.season
            );
            for game in &log {
                let date = game
                    .date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "(no date)".to_string());
                println!("  {}  {} hits", date, game.hits);
            }

            match PlayerSummary::from_log(player_id.to_string(), &log, decay) {
                Ok(summary) => {
                    println!("\nGames:             {}", summary.games_played);
                    println!(
                        "Hit rate:          {}",
                        hit_tracker::format_rate(summary.hit_rate)
                    );
                    println!(
                        "Weighted hit rate: {} (decay {})",
                        hit_tracker::format_rate(summary.weighted_hit_rate),
                        decay
                    );
                }
                Err(e) => {
                    println!("\nNo rates: {}", e);
                }
            }
        }
    }

    Ok(())
}

/// Apply CLI overrides onto the loaded configuration.
fn apply_overrides(
    config: &mut AppConfig,
    team: Option<String>,
    season: Option<String>,
    decay: Option<f64>,
) {
    if let Some(t) = team {
        config.team = t;
    }
    if let Some(s) = season {
        config.season = s;
    }
    if let Some(d) = decay {
        config.decay_factor = d;
    }
}

/// Build the MLB source over a caching fetcher.
fn build_source(config: &AppConfig, fresh: bool) -> Result<MlbSource> {
    let cache_ttl = if fresh {
        Duration::ZERO
    } else {
        Duration::from_secs(config.source.cache_ttl_secs)
    };

    let fetcher = Fetcher::new(FetcherConfig {
        cache_dir: config.data_dir.join("raw"),
        cache_ttl,
        request_delay: Duration::from_millis(config.source.request_delay_ms),
        ..Default::default()
    })?;

    Ok(MlbSource::new(
        fetcher,
        MlbSourceConfig {
            api_base: config.source.api_base.clone(),
            roster_url: config.source.roster_url.clone(),
        },
    ))
}
