//! Scoring module - line-clear points, level derivation and gravity speed
//!
//! | Lines | Points |
//! |-------|--------|
//! | n | n × 100 × level |
//!
//! The level is never stored independently of the score: it is always
//! `score / 1000 + 1`, recomputed from the score after the points are
//! added. The points themselves use the level that was in effect when the
//! piece locked.

use crate::types::{BASE_TICK_MS, MIN_TICK_MS, POINTS_PER_LINE, SCORE_PER_LEVEL, TICK_STEP_MS};

/// Points for clearing `lines` rows at `level`
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(POINTS_PER_LINE)
        .saturating_mul(level)
}

/// Level implied by a cumulative score
pub fn level_for_score(score: u32) -> u32 {
    score / SCORE_PER_LEVEL + 1
}

/// Gravity period for a level: `max(200, 800 - (level - 1) * 100)` ms
pub fn tick_period_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(TICK_STEP_MS);
    BASE_TICK_MS.saturating_sub(reduction).max(MIN_TICK_MS)
}

/// Outcome of applying a line clear to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub gained: u32,
    pub score: u32,
    pub level: u32,
}

impl ScoreResult {
    pub fn level_up(&self, previous_level: u32) -> bool {
        self.level > previous_level
    }
}

/// Add the points for `lines` to `score` and derive the new level.
pub fn apply_line_clear(score: u32, level: u32, lines: u32) -> ScoreResult {
    let gained = line_clear_score(lines, level);
    let score = score.saturating_add(gained);
    ScoreResult {
        gained,
        score,
        level: level_for_score(score),
    }
}
