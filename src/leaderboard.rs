//! `arcade-tetris leaderboard`: print a game's top scores.

use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};

use crate::cli::LeaderboardArgs;
use crate::report::{HttpScoreSink, LeaderboardResponse, ReportConfig};

pub fn run(args: &LeaderboardArgs) -> Result<()> {
    let mut config = ReportConfig::from_env()?;
    if let Some(url) = &args.url {
        config = config.with_url(url.as_str())?;
    }
    if config.disabled && args.url.is_none() {
        return Err(anyhow!(
            "score reporting is disabled (ARCADE_REPORT_DISABLED); pass --url to query anyway"
        ));
    }

    let sink = HttpScoreSink::new(&config)?;
    log::debug!("fetching leaderboard for {} from {}", args.game, sink.endpoint());
    let board = sink
        .fetch_leaderboard_blocking(&args.game)
        .with_context(|| format!("fetching leaderboard from {}", config.url))?;
    print!("{}", format_leaderboard(&board));
    Ok(())
}

/// Plain-text table: rank, name, score, date.
pub fn format_leaderboard(board: &LeaderboardResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Leaderboard: {}", board.game);
    if board.leaderboard.is_empty() {
        out.push_str("  no scores yet\n");
        return out;
    }
    for (i, entry) in board.leaderboard.iter().enumerate() {
        let date = entry
            .created_at
            .as_deref()
            .map(|d| d.get(..10).unwrap_or(d))
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "{:>3}. {:<20} {:>8}  {}",
            i + 1,
            entry.player_name,
            entry.score,
            date
        );
    }
    out
}
