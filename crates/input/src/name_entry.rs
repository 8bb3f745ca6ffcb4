//! Player name editor shown at game over.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::MAX_PLAYER_NAME_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEntryOutcome {
    /// The text changed
    Edited,
    /// Enter with a non-blank name
    Submit,
    /// Esc
    Cancel,
    Ignored,
}

/// Single-line text field capped at [`MAX_PLAYER_NAME_LEN`] characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled field; the prefill is cut to the length cap.
    pub fn with_text(text: &str) -> Self {
        let mut entry = Self::new();
        for ch in text.chars() {
            entry.push(ch);
        }
        entry
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn push(&mut self, ch: char) -> bool {
        if ch.is_control() || self.text.chars().count() >= MAX_PLAYER_NAME_LEN {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn pop(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> NameEntryOutcome {
        if key.kind == KeyEventKind::Release {
            return NameEntryOutcome::Ignored;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return NameEntryOutcome::Ignored;
        }
        let edited = match key.code {
            KeyCode::Enter if self.is_blank() => return NameEntryOutcome::Ignored,
            KeyCode::Enter => return NameEntryOutcome::Submit,
            KeyCode::Esc => return NameEntryOutcome::Cancel,
            KeyCode::Backspace => self.pop(),
            KeyCode::Char(ch) => self.push(ch),
            _ => false,
        };
        if edited {
            NameEntryOutcome::Edited
        } else {
            NameEntryOutcome::Ignored
        }
    }
}
