//! Append-only per-side debate log.

use crate::types::TurnLabel;

/// Header written to both transcripts when free debate starts
pub const FREE_DEBATE_HEADER: &str = "=== Free Debate ===";

/// One side's transcript, one `"{label}: {utterance}"` line per turn.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: TurnLabel, utterance: &str) {
        self.text.push_str(&format!("{label}: {utterance}\n"));
    }

    /// Blank line followed by the free-debate header
    pub fn open_free_debate(&mut self) {
        self.text.push('\n');
        self.text.push_str(FREE_DEBATE_HEADER);
        self.text.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
