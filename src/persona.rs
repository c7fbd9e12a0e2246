//! Debating personas
//!
//! A persona is a side, a stance and a working language bound to a text
//! generator. It turns each speech-act into a prompt and returns whatever
//! the generator says. Every prompt restates the stance and the language so
//! the model neither drifts position nor switches language mid-debate.

use std::sync::Arc;

use crate::error::Result;
use crate::generator::TextGenerator;
use crate::types::Side;

pub struct Persona {
    side: Side,
    stance: String,
    language: String,
    generator: Arc<dyn TextGenerator>,
}

impl Persona {
    pub fn new(
        side: Side,
        stance: impl Into<String>,
        language: impl Into<String>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            side,
            stance: stance.into(),
            language: language.into(),
            generator,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn stance(&self) -> &str {
        &self.stance
    }

    /// Opening-style statement answering the opponent's recent statements
    pub async fn state_opening(&self, topic: &str, opponent_context: &str) -> Result<String> {
        self.generator
            .generate(&self.opening_prompt(topic, opponent_context))
            .await
    }

    /// A pointed question aimed at the weak spots of `opponent_argument`
    pub async fn pose_question(&self, topic: &str, opponent_argument: &str) -> Result<String> {
        self.generator
            .generate(&self.question_prompt(topic, opponent_argument))
            .await
    }

    /// Answer an opponent's question without giving up the stance
    pub async fn answer_question(&self, topic: &str, question: &str) -> Result<String> {
        self.generator
            .generate(&self.answer_prompt(topic, question))
            .await
    }

    fn preamble(&self, topic: &str) -> String {
        format!(
            "You are the {role} side in a debate.\nTopic: {topic}\nYour stance: {stance}\n",
            role = self.side.label(),
            stance = self.stance,
        )
    }

    pub(crate) fn opening_prompt(&self, topic: &str, opponent_context: &str) -> String {
        format!(
            r#"{preamble}
Argue strictly from your stance and never abandon it.

Opponent's recent statements:
{opponent_context}

Respond only in {language}. State your position concisely and forcefully, with clear logic.
"#,
            preamble = self.preamble(topic),
            language = self.language,
        )
    }

    pub(crate) fn question_prompt(&self, topic: &str, opponent_argument: &str) -> String {
        format!(
            r#"{preamble}
Opponent's argument:
{opponent_argument}

Ask one sharp question that challenges the logic of this argument.
Look for gaps, contradictions or inconsistencies in the opponent's reasoning.
Your question should:
1. Target the weakest point of the argument directly
2. Expose the logical problem
3. Force the opponent to give a serious answer
4. Be asked only in {language}

Never abandon your stance.
"#,
            preamble = self.preamble(topic),
            language = self.language,
        )
    }

    pub(crate) fn answer_prompt(&self, topic: &str, question: &str) -> String {
        format!(
            r#"{preamble}
Question from your opponent:
{question}

Answer this question only in {language}, and while doing so:
1. Defend your stance and never abandon it
2. Rebut the doubt implied by the question
3. Stay logically consistent
4. Where possible, turn the question into support for your stance
"#,
            preamble = self.preamble(topic),
            language = self.language,
        )
    }
}
