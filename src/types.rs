//! Core types for the debate council
//!
//! Sides, turn labels and the outcome record a finished debate produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Which side of the motion a persona argues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Argues for the motion, always speaks first in a regular round
    Pro,
    /// Argues against the motion
    Con,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Pro => "Pro",
            Side::Con => "Con",
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::Pro => Side::Con,
            Side::Con => Side::Pro,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-debate speech acts that get their own label suffix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpeechAct {
    Question,
    Answer,
}

impl SpeechAct {
    pub fn label(&self) -> &'static str {
        match self {
            SpeechAct::Question => "question",
            SpeechAct::Answer => "answer",
        }
    }
}

/// Label prefixed to every transcript line
///
/// Renders as `RegularRound 2 Pro` or `FreeRound 1 Con answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnLabel {
    Regular { round: usize, side: Side },
    Free { round: usize, side: Side, act: SpeechAct },
}

impl fmt::Display for TurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnLabel::Regular { round, side } => write!(f, "RegularRound {round} {side}"),
            TurnLabel::Free { round, side, act } => {
                write!(f, "FreeRound {round} {side} {}", act.label())
            }
        }
    }
}

/// What the adjudicator was shown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JudgeInput {
    /// Both transcripts verbatim
    Full,
    /// Both transcripts after the summarizer shrank them
    Summarized,
}

/// Result of one finished debate
///
/// The transcripts are always the full, unshrunk logs, even when the judge
/// only saw summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateOutcome {
    pub debate_id: String,
    pub topic: String,
    pub pro_transcript: String,
    pub con_transcript: String,
    pub verdict: String,
    pub judge_input: JudgeInput,
    /// Combined transcript length in characters at adjudication time
    pub transcript_chars: usize,
    pub created_at: DateTime<Utc>,
}

impl DebateOutcome {
    pub fn new(
        topic: String,
        pro_transcript: String,
        con_transcript: String,
        verdict: String,
        judge_input: JudgeInput,
        transcript_chars: usize,
    ) -> Self {
        Self {
            debate_id: Uuid::new_v4().to_string(),
            topic,
            pro_transcript,
            con_transcript,
            verdict,
            judge_input,
            transcript_chars,
            created_at: Utc::now(),
        }
    }

    /// `(pro transcript, con transcript, verdict)`
    pub fn into_triple(self) -> (String, String, String) {
        (self.pro_transcript, self.con_transcript, self.verdict)
    }
}
