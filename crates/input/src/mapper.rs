//! Phase gate between input events and the session.
//!
//! Gameplay events only reach the engine while it is `Running`; pause only
//! toggles between `Running` and `Paused`; start only fires from `Idle` or
//! `GameOver`. Everything else is dropped silently.

use crate::core::{GameSession, PieceRandomizer};
use crate::map::InputEvent;
use crate::types::{GameAction, Phase};

/// Engine command for `event` in `phase`, or `None` if it must be dropped.
pub fn command_for(event: InputEvent, phase: Phase) -> Option<GameAction> {
    let action = event.action()?;
    let allowed = match action {
        GameAction::TogglePause => matches!(phase, Phase::Running | Phase::Paused),
        GameAction::Start => matches!(phase, Phase::Idle | Phase::GameOver),
        _ => phase == Phase::Running,
    };
    allowed.then_some(action)
}

/// Apply `event` to `session`; returns whether any state changed.
pub fn apply_event<R: PieceRandomizer>(session: &mut GameSession<R>, event: InputEvent) -> bool {
    match command_for(event, session.phase()) {
        Some(action) => session.apply(action),
        None => {
            log::trace!("dropped {:?} while {}", event, session.phase().as_str());
            false
        }
    }
}
