//! Leaderboard wire shapes (JSON).
//!
//! Field names follow the leaderboard service: snake_case keys, score as
//! an integer, `created_at` as an optional ISO-8601 string.

use serde::{Deserialize, Serialize};

use crate::types::MAX_PLAYER_NAME_LEN;

/// Body of a score report (`POST`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub player_name: String,
    pub game_name: String,
    pub score: u32,
}

impl ScoreSubmission {
    /// Build a submission from raw player input.
    ///
    /// Returns `None` when the trimmed name is empty. Longer names are cut
    /// to [`MAX_PLAYER_NAME_LEN`] characters.
    pub fn new(player_name: &str, game_name: &str, score: u32) -> Option<Self> {
        let name = normalize_player_name(player_name)?;
        Some(Self {
            player_name: name,
            game_name: game_name.to_string(),
            score,
        })
    }
}

/// Trim and truncate a player name; `None` if nothing is left.
pub fn normalize_player_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let name: String = trimmed.chars().take(MAX_PLAYER_NAME_LEN).collect();
    Some(name.trim_end().to_string())
}

/// Service reply to an accepted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ScoreSubmission>,
}

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Leaderboard listing for one game, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub game: String,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Game ids travel in a query string, so only a safe alphabet is allowed.
pub fn is_valid_game_id(game: &str) -> bool {
    !game.is_empty()
        && game
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
