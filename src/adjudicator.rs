//! The judge
//!
//! One generation call over both transcripts: a neutral summary of each side
//! followed by an explicit verdict. The model's answer is returned verbatim.

use std::sync::Arc;

use crate::error::Result;
use crate::generator::TextGenerator;

pub struct Adjudicator {
    language: String,
    generator: Arc<dyn TextGenerator>,
}

impl Adjudicator {
    pub fn new(language: impl Into<String>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            language: language.into(),
            generator,
        }
    }

    pub async fn judge(&self, topic: &str, pro_text: &str, con_text: &str) -> Result<String> {
        self.generator
            .generate(&self.judge_prompt(topic, pro_text, con_text))
            .await
    }

    pub(crate) fn judge_prompt(&self, topic: &str, pro_text: &str, con_text: &str) -> String {
        format!(
            r#"You are the judge of a debate.

Topic: {topic}

Pro side transcript:
{pro_text}

Con side transcript:
{con_text}

Respond only in {language}.
First summarize the arguments of both sides neutrally.
Then give an explicit, objective verdict on which side argued better and why.
"#,
            language = self.language,
        )
    }
}
