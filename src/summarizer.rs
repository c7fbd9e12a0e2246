//! Deterministic transcript shrinking
//!
//! Used only to keep the adjudicator's prompt bounded once the debate gets
//! long. No model call is involved: lines are filtered by speech-act label
//! and their content truncated.
//!
//! Shrinking is idempotent. The label prefix of a kept line survives
//! untouched, and already-truncated content is exactly
//! [`SUMMARY_CONTENT_CHARS`] characters plus the ellipsis, which truncates
//! back to itself.

/// Content longer than this many characters is cut
pub const SUMMARY_CONTENT_CHARS: usize = 150;

/// Appended to truncated content
pub const ELLIPSIS: &str = "...";

/// Leading word of every turn label
const TURN_LABEL_PREFIXES: [&str; 2] = ["RegularRound ", "FreeRound "];

/// Final word of a label prefix that marks a speech-act line
const SPEECH_ACT_LABELS: [&str; 4] = ["Pro", "Con", "question", "answer"];

/// Keep at most `max_lines` labeled lines of `transcript`, each with its
/// content truncated.
pub fn shrink(transcript: &str, max_lines: usize) -> String {
    transcript
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(shrink_line)
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n")
}

fn shrink_line(line: &str) -> Option<String> {
    let (prefix, content) = line.split_once(':')?;
    if !is_speech_act_label(prefix) {
        return None;
    }
    Some(format!(
        "{prefix}:{}",
        truncate_chars(content, SUMMARY_CONTENT_CHARS)
    ))
}

/// Continuation lines of multi-line utterances never start with a turn
/// label, even when their text before a colon ends in a label word.
fn is_speech_act_label(prefix: &str) -> bool {
    let starts_as_turn = TURN_LABEL_PREFIXES
        .iter()
        .any(|start| prefix.starts_with(start));
    starts_as_turn
        && prefix
            .split_whitespace()
            .last()
            .is_some_and(|word| SPEECH_ACT_LABELS.contains(&word))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
