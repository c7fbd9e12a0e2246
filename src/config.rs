//! Debate configuration and input normalization
//!
//! Raw user input (CLI flags or interactive answers) is normalized once by
//! [`DebateConfig::from_raw`]. Malformed or out-of-range numbers fall back to
//! defaults or are clamped. They are never reported as errors.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOPIC: &str = "Should AI replace teachers?";
pub const DEFAULT_PRO_STANCE: &str = "In favor";
pub const DEFAULT_CON_STANCE: &str = "Against";
pub const DEFAULT_LANGUAGE: &str = "English";

pub const DEFAULT_ROUNDS: usize = 3;
pub const DEFAULT_FREE_DEBATE_ROUNDS: usize = 0;
pub const DEFAULT_CONTEXT_ROUNDS: usize = 1;
pub const MIN_CONTEXT_ROUNDS: usize = 1;
pub const MAX_CONTEXT_ROUNDS: usize = 5;

/// Combined transcript length (characters) from which the judge sees summaries
pub const JUDGE_CHAR_LIMIT: usize = 3000;
/// Lines kept per side when summarizing for the judge
pub const SUMMARY_MAX_LINES: usize = 10;

/// Unvalidated input, exactly as the user typed it
#[derive(Debug, Clone, Default)]
pub struct RawDebateInput {
    pub topic: Option<String>,
    pub rounds: Option<String>,
    pub free_debate_rounds: Option<String>,
    pub context_rounds: Option<String>,
    pub pro_stance: Option<String>,
    pub con_stance: Option<String>,
    pub language: Option<String>,
}

/// Validated parameters of one debate run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebateConfig {
    pub topic: String,
    pub pro_stance: String,
    pub con_stance: String,
    /// Single working language every prompt demands
    pub language: String,
    /// Regular Pro/Con rounds
    pub rounds: usize,
    /// Question/answer cycles after the regular rounds (0 = none)
    pub free_debate_rounds: usize,
    /// Capacity of each side's context window
    pub context_rounds: usize,
    pub judge_char_limit: usize,
    pub summary_max_lines: usize,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            pro_stance: DEFAULT_PRO_STANCE.to_string(),
            con_stance: DEFAULT_CON_STANCE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            rounds: DEFAULT_ROUNDS,
            free_debate_rounds: DEFAULT_FREE_DEBATE_ROUNDS,
            context_rounds: DEFAULT_CONTEXT_ROUNDS,
            judge_char_limit: JUDGE_CHAR_LIMIT,
            summary_max_lines: SUMMARY_MAX_LINES,
        }
    }
}

impl DebateConfig {
    /// Normalize raw input into a valid configuration.
    ///
    /// - topic, stances, language: blank → default
    /// - rounds: non-numeric or ≤ 0 → 3
    /// - free debate rounds: non-numeric or < 0 → 0
    /// - context rounds: non-numeric → 1, otherwise clamped to [1, 5]
    pub fn from_raw(raw: &RawDebateInput) -> Self {
        Self {
            topic: text_or(raw.topic.as_deref(), DEFAULT_TOPIC),
            pro_stance: text_or(raw.pro_stance.as_deref(), DEFAULT_PRO_STANCE),
            con_stance: text_or(raw.con_stance.as_deref(), DEFAULT_CON_STANCE),
            language: text_or(raw.language.as_deref(), DEFAULT_LANGUAGE),
            rounds: normalize_rounds(raw.rounds.as_deref()),
            free_debate_rounds: normalize_free_debate_rounds(raw.free_debate_rounds.as_deref()),
            context_rounds: normalize_context_rounds(raw.context_rounds.as_deref()),
            ..Self::default()
        }
    }
}

pub fn normalize_rounds(raw: Option<&str>) -> usize {
    match parse_int(raw) {
        Some(n) if n > 0 => n as usize,
        _ => DEFAULT_ROUNDS,
    }
}

pub fn normalize_free_debate_rounds(raw: Option<&str>) -> usize {
    match parse_int(raw) {
        Some(n) if n >= 0 => n as usize,
        _ => DEFAULT_FREE_DEBATE_ROUNDS,
    }
}

pub fn normalize_context_rounds(raw: Option<&str>) -> usize {
    match parse_int(raw) {
        Some(n) => n.clamp(MIN_CONTEXT_ROUNDS as i64, MAX_CONTEXT_ROUNDS as i64) as usize,
        None => DEFAULT_CONTEXT_ROUNDS,
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok()
}

fn text_or(raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => default.to_string(),
    }
}
