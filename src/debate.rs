//! Debate Orchestration Engine
//!
//! Drives one debate from the first Pro statement to the judge's verdict:
//!
//! ```text
//! Idle → RegularRounds → FreeDebate (optional) → Adjudication → Done
//! ```
//!
//! Regular rounds feed each persona the other side's context window. Free
//! debate ignores the windows and threads one running argument per side
//! through question/answer exchanges instead. Adjudication shows the judge
//! the full transcripts, or shrunk copies once they grow past the configured
//! character limit.
//!
//! Generation calls are issued strictly one after another. The first failure
//! aborts the run and is returned unchanged. `run` consumes the debate, so
//! nothing of an aborted run survives.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adjudicator::Adjudicator;
use crate::config::{DebateConfig, MAX_CONTEXT_ROUNDS, MIN_CONTEXT_ROUNDS};
use crate::context_window::{ContextWindow, NO_PRIOR_STATEMENT};
use crate::error::Result;
use crate::generator::TextGenerator;
use crate::persona::Persona;
use crate::summarizer;
use crate::transcript::Transcript;
use crate::types::{DebateOutcome, JudgeInput, Side, SpeechAct, TurnLabel};

/// Lifecycle of a debate run. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebatePhase {
    Idle,
    RegularRounds,
    FreeDebate,
    Adjudication,
    Done,
}

/// The judge's answer and what it was shown
struct Adjudication {
    verdict: String,
    input: JudgeInput,
    transcript_chars: usize,
}

pub struct Debate {
    config: DebateConfig,
    pro: Persona,
    con: Persona,
    adjudicator: Adjudicator,
    pro_window: ContextWindow,
    con_window: ContextWindow,
    pro_transcript: Transcript,
    con_transcript: Transcript,
    phase: DebatePhase,
}

impl Debate {
    /// Context rounds outside 1..=5 are clamped, however the config was built.
    pub fn new(mut config: DebateConfig, generator: Arc<dyn TextGenerator>) -> Self {
        config.context_rounds = config
            .context_rounds
            .clamp(MIN_CONTEXT_ROUNDS, MAX_CONTEXT_ROUNDS);

        let pro = Persona::new(
            Side::Pro,
            config.pro_stance.clone(),
            config.language.clone(),
            Arc::clone(&generator),
        );
        let con = Persona::new(
            Side::Con,
            config.con_stance.clone(),
            config.language.clone(),
            Arc::clone(&generator),
        );
        let adjudicator = Adjudicator::new(config.language.clone(), generator);

        Self {
            pro_window: ContextWindow::new(config.context_rounds),
            con_window: ContextWindow::new(config.context_rounds),
            pro_transcript: Transcript::new(),
            con_transcript: Transcript::new(),
            phase: DebatePhase::Idle,
            config,
            pro,
            con,
            adjudicator,
        }
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    /// Run the whole debate and return both full transcripts with the verdict
    pub async fn run(mut self) -> Result<DebateOutcome> {
        info!(
            topic = %self.config.topic,
            rounds = self.config.rounds,
            free_debate_rounds = self.config.free_debate_rounds,
            context_rounds = self.config.context_rounds,
            "debate starting"
        );

        // 1. Regular rounds, Pro always first
        self.enter(DebatePhase::RegularRounds);
        for round in 1..=self.config.rounds {
            self.regular_round(round).await?;
        }

        // 2. Free debate, only when asked for
        if self.config.free_debate_rounds > 0 {
            self.enter(DebatePhase::FreeDebate);
            self.free_debate().await?;
        }

        // 3. Judge
        self.enter(DebatePhase::Adjudication);
        let adjudication = self.adjudicate().await?;
        self.enter(DebatePhase::Done);

        let Debate {
            config,
            pro_transcript,
            con_transcript,
            ..
        } = self;

        Ok(DebateOutcome::new(
            config.topic,
            pro_transcript.into_string(),
            con_transcript.into_string(),
            adjudication.verdict,
            adjudication.input,
            adjudication.transcript_chars,
        ))
    }

    fn enter(&mut self, next: DebatePhase) {
        debug_assert!(next > self.phase, "debate phase moved backwards");
        debug!(from = ?self.phase, to = ?next, "debate phase");
        self.phase = next;
    }

    /// Pro answers Con's window, then Con answers Pro's window, which already
    /// holds this round's Pro statement.
    async fn regular_round(&mut self, round: usize) -> Result<()> {
        let topic = &self.config.topic;

        let pro_context = self.con_window.snapshot();
        let pro_statement = self.pro.state_opening(topic, &pro_context).await?;
        self.pro_transcript.record(
            TurnLabel::Regular {
                round,
                side: Side::Pro,
            },
            &pro_statement,
        );
        debug!(round, side = %Side::Pro, chars = pro_statement.chars().count(), "statement");
        self.pro_window.push(pro_statement);

        let con_context = self.pro_window.snapshot();
        let con_statement = self.con.state_opening(topic, &con_context).await?;
        self.con_transcript.record(
            TurnLabel::Regular {
                round,
                side: Side::Con,
            },
            &con_statement,
        );
        debug!(round, side = %Side::Con, chars = con_statement.chars().count(), "statement");
        self.con_window.push(con_statement);

        Ok(())
    }

    async fn free_debate(&mut self) -> Result<()> {
        self.pro_transcript.open_free_debate();
        self.con_transcript.open_free_debate();

        let topic = &self.config.topic;
        let mut last_pro_argument = self
            .pro_window
            .latest()
            .unwrap_or(NO_PRIOR_STATEMENT)
            .to_string();
        let mut last_con_argument = self
            .con_window
            .latest()
            .unwrap_or(NO_PRIOR_STATEMENT)
            .to_string();

        for round in 1..=self.config.free_debate_rounds {
            let pro_question = self.pro.pose_question(topic, &last_con_argument).await?;
            self.pro_transcript
                .record(free_label(round, Side::Pro, SpeechAct::Question), &pro_question);

            let con_answer = self.con.answer_question(topic, &pro_question).await?;
            self.con_transcript
                .record(free_label(round, Side::Con, SpeechAct::Answer), &con_answer);
            last_con_argument = con_answer;

            let con_question = self.con.pose_question(topic, &last_pro_argument).await?;
            self.con_transcript
                .record(free_label(round, Side::Con, SpeechAct::Question), &con_question);

            let pro_answer = self.pro.answer_question(topic, &con_question).await?;
            self.pro_transcript
                .record(free_label(round, Side::Pro, SpeechAct::Answer), &pro_answer);
            last_pro_argument = pro_answer;

            debug!(round, "free debate exchange");
        }

        Ok(())
    }

    async fn adjudicate(&self) -> Result<Adjudication> {
        let topic = &self.config.topic;
        let transcript_chars = self.pro_transcript.char_len() + self.con_transcript.char_len();

        if transcript_chars < self.config.judge_char_limit {
            info!(transcript_chars, "judging full transcripts");
            let verdict = self
                .adjudicator
                .judge(
                    topic,
                    self.pro_transcript.as_str(),
                    self.con_transcript.as_str(),
                )
                .await?;
            return Ok(Adjudication {
                verdict,
                input: JudgeInput::Full,
                transcript_chars,
            });
        }

        info!(
            transcript_chars,
            limit = self.config.judge_char_limit,
            "transcripts too long for the judge, summarizing"
        );
        let max_lines = self.config.summary_max_lines;
        let pro_summary = summarizer::shrink(self.pro_transcript.as_str(), max_lines);
        let con_summary = summarizer::shrink(self.con_transcript.as_str(), max_lines);

        let verdict = self
            .adjudicator
            .judge(topic, &pro_summary, &con_summary)
            .await?;

        Ok(Adjudication {
            verdict,
            input: JudgeInput::Summarized,
            transcript_chars,
        })
    }
}

fn free_label(round: usize, side: Side, act: SpeechAct) -> TurnLabel {
    TurnLabel::Free { round, side, act }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::generator::testing::ScriptedGenerator;
    use crate::transcript::FREE_DEBATE_HEADER;

    fn config(rounds: usize, free_debate_rounds: usize, context_rounds: usize) -> DebateConfig {
        DebateConfig {
            topic: "X".to_string(),
            rounds,
            free_debate_rounds,
            context_rounds,
            ..DebateConfig::default()
        }
    }

    /// Labels of every turn line, in order
    fn labels(transcript: &str) -> Vec<String> {
        transcript
            .lines()
            .filter_map(|line| line.split_once(':').map(|(label, _)| label.to_string()))
            .collect()
    }

    /// The pro and con sections of a judge prompt
    fn judged_sections(prompt: &str) -> (String, String) {
        let pro_start = prompt.find("Pro side transcript:\n").unwrap() + "Pro side transcript:\n".len();
        let con_marker = prompt.find("\n\nCon side transcript:\n").unwrap();
        let con_start = con_marker + "\n\nCon side transcript:\n".len();
        let con_end = prompt.find("\n\nRespond only in").unwrap();
        (
            prompt[pro_start..con_marker].to_string(),
            prompt[con_start..con_end].to_string(),
        )
    }

    #[tokio::test]
    async fn test_single_round_debate() {
        let generator = Arc::new(ScriptedGenerator::with_replies(["P1", "C1", "Pro wins."]));
        let outcome = Debate::new(config(1, 0, 1), generator.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.pro_transcript, "RegularRound 1 Pro: P1\n");
        assert_eq!(outcome.con_transcript, "RegularRound 1 Con: C1\n");
        assert!(!outcome.pro_transcript.contains(FREE_DEBATE_HEADER));
        assert!(!outcome.con_transcript.contains(FREE_DEBATE_HEADER));
        assert_eq!(outcome.verdict, "Pro wins.");
        assert_eq!(outcome.judge_input, JudgeInput::Full);
        assert_eq!(outcome.topic, "X");
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_regular_rounds_labeled_in_order() {
        let generator = Arc::new(ScriptedGenerator::new());
        let outcome = Debate::new(config(4, 0, 2), generator).run().await.unwrap();

        let expected_pro: Vec<String> = (1..=4).map(|i| format!("RegularRound {i} Pro")).collect();
        let expected_con: Vec<String> = (1..=4).map(|i| format!("RegularRound {i} Con")).collect();
        assert_eq!(labels(&outcome.pro_transcript), expected_pro);
        assert_eq!(labels(&outcome.con_transcript), expected_con);
    }

    #[tokio::test]
    async fn test_con_sees_same_round_pro_statement() {
        let generator = Arc::new(ScriptedGenerator::with_replies(["P1", "C1", "P2", "C2"]));
        Debate::new(config(2, 0, 1), generator.clone())
            .run()
            .await
            .unwrap();

        let prompts = generator.prompts();
        // Pro opens with nothing to answer
        assert!(prompts[0].contains(NO_PRIOR_STATEMENT));
        // Con answers Pro's statement from the same round
        assert!(prompts[1].contains("P1"));
        // Pro's second statement sees Con's first, never its own
        assert!(prompts[2].contains("C1"));
        assert!(!prompts[2].contains("P1"));
        // Capacity 1 keeps only the newest Pro statement
        assert!(prompts[3].contains("P2"));
        assert!(!prompts[3].contains("P1"));
    }

    #[tokio::test]
    async fn test_wider_window_carries_older_statements() {
        let generator = Arc::new(ScriptedGenerator::with_replies([
            "P1", "C1", "P2", "C2", "P3", "C3",
        ]));
        Debate::new(config(3, 0, 2), generator.clone())
            .run()
            .await
            .unwrap();

        let prompts = generator.prompts();
        assert!(prompts[3].contains("P1\nP2"));
        assert!(prompts[5].contains("P2\nP3"));
        assert!(!prompts[5].contains("P1"));
    }

    #[tokio::test]
    async fn test_free_debate_threads_running_arguments() {
        let generator = Arc::new(ScriptedGenerator::with_replies([
            "P1", "C1", // regular round
            "pq1", "ca1", "cq1", "pa1", // free round 1
            "pq2", "ca2", "cq2", "pa2", // free round 2
            "verdict",
        ]));
        let outcome = Debate::new(config(1, 2, 1), generator.clone())
            .run()
            .await
            .unwrap();

        let prompts = generator.prompts();
        // Seeded from each side's latest regular statement
        assert!(prompts[2].contains("C1"));
        assert!(prompts[4].contains("P1"));
        // Answers are questioned against the question just asked
        assert!(prompts[3].contains("pq1"));
        assert!(prompts[5].contains("cq1"));
        // Round 2 questions target the previous answers
        assert!(prompts[6].contains("ca1"));
        assert!(prompts[8].contains("pa1"));

        assert_eq!(
            outcome.pro_transcript,
            format!(
                "RegularRound 1 Pro: P1\n\n{FREE_DEBATE_HEADER}\n\
                 FreeRound 1 Pro question: pq1\nFreeRound 1 Pro answer: pa1\n\
                 FreeRound 2 Pro question: pq2\nFreeRound 2 Pro answer: pa2\n"
            )
        );
        assert_eq!(
            outcome.con_transcript,
            format!(
                "RegularRound 1 Con: C1\n\n{FREE_DEBATE_HEADER}\n\
                 FreeRound 1 Con answer: ca1\nFreeRound 1 Con question: cq1\n\
                 FreeRound 2 Con answer: ca2\nFreeRound 2 Con question: cq2\n"
            )
        );
        assert_eq!(outcome.verdict, "verdict");
    }

    #[tokio::test]
    async fn test_oversized_context_rounds_clamped_to_five() {
        let mut replies = Vec::new();
        for round in 1..=7 {
            replies.push(format!("P{round}"));
            replies.push(format!("C{round}"));
        }
        let generator = Arc::new(ScriptedGenerator::with_replies(replies));
        Debate::new(config(7, 0, 10), generator.clone())
            .run()
            .await
            .unwrap();

        // Con's round 7 prompt sees only Pro's five newest statements
        let con_round_7 = &generator.prompts()[13];
        assert!(con_round_7.contains("P3\nP4\nP5\nP6\nP7"));
        assert!(!con_round_7.contains("P1"));
        assert!(!con_round_7.contains("P2"));
    }

    #[tokio::test]
    async fn test_free_debate_seeded_from_newest_statement_only() {
        let generator = Arc::new(ScriptedGenerator::with_replies([
            "P1", "C1", "P2", "C2", // regular rounds
            "pq1", "ca1", "cq1", "pa1", // free round 1
            "verdict",
        ]));
        Debate::new(config(2, 1, 3), generator.clone())
            .run()
            .await
            .unwrap();

        let prompts = generator.prompts();
        // Pro's first question targets Con's last regular statement alone
        assert!(prompts[4].contains("C2"));
        assert!(!prompts[4].contains("C1"));
        // and Con's first question targets Pro's
        assert!(prompts[6].contains("P2"));
        assert!(!prompts[6].contains("P1"));
    }

    #[tokio::test]
    async fn test_free_debate_cycle_counts() {
        let generator = Arc::new(ScriptedGenerator::new());
        let outcome = Debate::new(config(2, 3, 1), generator.clone())
            .run()
            .await
            .unwrap();

        for (transcript, side) in [
            (&outcome.pro_transcript, "Pro"),
            (&outcome.con_transcript, "Con"),
        ] {
            let labels = labels(transcript);
            for round in 1..=3 {
                for act in ["question", "answer"] {
                    let label = format!("FreeRound {round} {side} {act}");
                    assert_eq!(labels.iter().filter(|l| **l == label).count(), 1, "{label}");
                }
            }
            assert_eq!(labels.len(), 2 + 3 * 2);
        }
        // 2 rounds × 2 statements, 3 cycles × 4 turns, 1 verdict
        assert_eq!(generator.calls(), 4 + 12 + 1);
    }

    #[tokio::test]
    async fn test_free_debate_without_regular_rounds_uses_sentinel() {
        let generator = Arc::new(ScriptedGenerator::new());
        let outcome = Debate::new(config(0, 1, 1), generator.clone())
            .run()
            .await
            .unwrap();

        let prompts = generator.prompts();
        assert!(prompts[0].contains(NO_PRIOR_STATEMENT));
        assert!(prompts[2].contains(NO_PRIOR_STATEMENT));
        assert!(outcome
            .pro_transcript
            .starts_with(&format!("\n{FREE_DEBATE_HEADER}\n")));
    }

    #[tokio::test]
    async fn test_judge_sees_full_transcripts_below_limit() {
        // Each line is "RegularRound 1 Xxx: " (20 chars) + reply + '\n'
        let pro = "a".repeat(1479);
        let con = "b".repeat(1478);
        let generator = Arc::new(ScriptedGenerator::with_replies([pro.clone(), con.clone()]));
        let outcome = Debate::new(config(1, 0, 1), generator.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.transcript_chars, 2999);
        assert_eq!(outcome.judge_input, JudgeInput::Full);

        let judge_prompt = generator.prompts().pop().unwrap();
        let (pro_seen, con_seen) = judged_sections(&judge_prompt);
        assert_eq!(pro_seen, format!("RegularRound 1 Pro: {pro}\n"));
        assert_eq!(con_seen, format!("RegularRound 1 Con: {con}\n"));
    }

    #[tokio::test]
    async fn test_judge_sees_summaries_at_limit() {
        let pro = "a".repeat(1479);
        let con = "b".repeat(1479);
        let generator = Arc::new(ScriptedGenerator::with_replies([pro.clone(), con.clone()]));
        let outcome = Debate::new(config(1, 0, 1), generator.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.transcript_chars, 3000);
        assert_eq!(outcome.judge_input, JudgeInput::Summarized);
        // The caller still gets everything
        assert_eq!(outcome.pro_transcript, format!("RegularRound 1 Pro: {pro}\n"));
        assert_eq!(outcome.con_transcript, format!("RegularRound 1 Con: {con}\n"));

        let judge_prompt = generator.prompts().pop().unwrap();
        let (pro_seen, con_seen) = judged_sections(&judge_prompt);
        assert_eq!(pro_seen, format!("RegularRound 1 Pro: {}...", "a".repeat(149)));
        assert_eq!(con_seen, format!("RegularRound 1 Con: {}...", "b".repeat(149)));
    }

    #[tokio::test]
    async fn test_summaries_capped_at_ten_lines_per_side() {
        let replies: Vec<String> = (0..100)
            .map(|n| format!("{n} {}", "point ".repeat(30)))
            .collect();
        let generator = Arc::new(ScriptedGenerator::with_replies(replies));
        let outcome = Debate::new(config(8, 4, 3), generator.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.judge_input, JudgeInput::Summarized);
        let judge_prompt = generator.prompts().pop().unwrap();
        let (pro_seen, con_seen) = judged_sections(&judge_prompt);
        assert_eq!(pro_seen.lines().count(), 10);
        assert_eq!(con_seen.lines().count(), 10);
        assert_eq!(labels(&outcome.pro_transcript).len(), 8 + 4 * 2);
    }

    #[tokio::test]
    async fn test_failure_on_first_pro_statement_aborts() {
        let generator = Arc::new(ScriptedGenerator::new().failing_on_call(1));
        let err = Debate::new(config(3, 2, 1), generator.clone())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Backend(_)));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_in_free_debate_skips_judge() {
        // Call 4 is Con's answer in the first free round
        let generator = Arc::new(ScriptedGenerator::new().failing_on_call(4));
        let result = Debate::new(config(1, 2, 1), generator.clone()).run().await;

        assert!(result.is_err());
        assert_eq!(generator.calls(), 4);
    }

    #[test]
    fn test_new_debate_is_idle() {
        let debate = Debate::new(config(1, 0, 9), Arc::new(ScriptedGenerator::new()));
        assert_eq!(debate.phase(), DebatePhase::Idle);
        assert_eq!(debate.config().context_rounds, MAX_CONTEXT_ROUNDS);
        assert_eq!(debate.pro_window.capacity(), MAX_CONTEXT_ROUNDS);
        assert_eq!(debate.con_window.capacity(), MAX_CONTEXT_ROUNDS);
        assert!(DebatePhase::Idle < DebatePhase::RegularRounds);
        assert!(DebatePhase::FreeDebate < DebatePhase::Adjudication);
        assert!(DebatePhase::Adjudication < DebatePhase::Done);
    }
}
