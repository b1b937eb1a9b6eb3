use serde::{Deserialize, Serialize};

use crate::foundation::core::Fps;
use crate::script::model::{TimedToken, VoiceTiming};

/// Which timestamp table a track was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTable {
    /// Per-word timestamps.
    Word,
    /// Per-character timestamps.
    Character,
}

/// The token highlighted at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveToken<'a> {
    /// Position in the table.
    pub index: usize,
    /// The matched entry.
    pub token: &'a TimedToken,
    /// Table the entry came from.
    pub table: TokenTable,
}

/// Table used for display: words when present and non-empty, else characters.
pub fn active_table(timing: &VoiceTiming) -> (TokenTable, &[TimedToken]) {
    match timing.word_timestamps.as_deref() {
        Some(words) if !words.is_empty() => (TokenTable::Word, words),
        _ => (TokenTable::Character, &timing.character_timestamps),
    }
}

/// First entry with `start <= elapsed <= end`, in table order.
///
/// Entries with non-finite bounds never match; gaps yield `None`.
pub fn token_at(tokens: &[TimedToken], elapsed: f64) -> Option<(usize, &TimedToken)> {
    if !elapsed.is_finite() {
        return None;
    }
    tokens.iter().enumerate().find(|(_, t)| {
        t.start.is_finite() && t.end.is_finite() && t.start <= elapsed && elapsed <= t.end
    })
}

/// A scene's subtitle timing, owned so composed plans are self-contained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenTrack {
    /// Source table.
    pub table: TokenTable,
    /// Entries in table order.
    pub tokens: Vec<TimedToken>,
}

impl TokenTrack {
    /// Track for a timing entry; `None` when it has no timestamps at all.
    pub fn from_timing(timing: &VoiceTiming) -> Option<Self> {
        let (table, tokens) = active_table(timing);
        (!tokens.is_empty()).then(|| Self {
            table,
            tokens: tokens.to_vec(),
        })
    }

    /// Token to display at scene-local frame `local`. Blank tokens display nothing.
    pub fn active_at(&self, local: u64, fps: Fps) -> Option<ActiveToken<'_>> {
        let elapsed = fps.frames_to_secs(local);
        let (index, token) = token_at(&self.tokens, elapsed)?;
        if token.token.trim().is_empty() {
            return None;
        }
        Some(ActiveToken {
            index,
            token,
            table: self.table,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/subtitle/highlight.rs"]
mod tests;
