//! Ranking and presentation.
//!
//! Sorts player summaries by weighted hit rate and renders them as a
//! markdown table or a tab-delimited block.

use std::fmt::Write;

use crate::models::PlayerSummary;

/// Sort summaries by weighted hit rate, best first.
///
/// The sort is stable, so tied players keep roster-fetch order.
pub fn rank_players(players: &mut [PlayerSummary]) {
    players.sort_by(|a, b| b.weighted_hit_rate.total_cmp(&a.weighted_hit_rate));
}

/// Render summaries as a markdown table.
pub fn render_markdown_table(players: &[PlayerSummary]) -> String {
    let mut out = String::new();
    out.push_str("| Player | Games | Hit Rate | Weighted Hit Rate |\n");
    out.push_str("| ------ | ----- | -------- | ----------------- |\n");

    for p in players {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            p.name,
            p.games_played,
            crate::format_rate(p.hit_rate),
            crate::format_rate(p.weighted_hit_rate),
        );
    }

    out
}

/// Render summaries as a tab-delimited block with a header row,
/// suitable for piping into a spreadsheet or clipboard tool.
pub fn render_tsv(players: &[PlayerSummary]) -> String {
    let mut out = String::from("player\tgames_played\thit_rate\tweighted_hit_rate\n");

    for p in players {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            p.name, p.games_played, p.hit_rate, p.weighted_hit_rate
        );
    }

    out
}
