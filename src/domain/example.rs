// ============================================================
// Layer 3 — SQuAD Example Domain Type
// ============================================================
// One (context, question, answers) record as published in the
// SQuAD dataset. The on-disk shape mirrors the Hugging Face
// export, one JSON object per line:
//
//   {"id": "...", "title": "...", "context": "...",
//    "question": "...",
//    "answers": {"text": ["..."], "answer_start": [515]}}
//
// Several acceptable answers may be listed; preprocessing only
// ever looks at the first one.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadExample {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    pub context: String,

    pub question: String,

    #[serde(default)]
    pub answers: Answers,
}

/// Parallel lists: `text[i]` starts at character `answer_start[i]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    #[serde(default)]
    pub text: Vec<String>,

    #[serde(default)]
    pub answer_start: Vec<i64>,
}

impl Answers {
    pub fn first_text(&self) -> Option<&str> {
        self.text.first().map(String::as_str)
    }

    pub fn first_start(&self) -> Option<i64> {
        self.answer_start.first().copied()
    }
}

impl SquadExample {
    pub fn new(
        id:       impl Into<String>,
        context:  impl Into<String>,
        question: impl Into<String>,
        answers:  Answers,
    ) -> Self {
        Self {
            id:       id.into(),
            title:    String::new(),
            context:  context.into(),
            question: question.into(),
            answers,
        }
    }
}

// ─── AnswerBounds ─────────────────────────────────────────────────────────────
/// Character range of the gold answer inside the *untruncated* context.
///
/// `end_char` is exclusive, so a missing answer produces the degenerate
/// range `0..0` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerBounds {
    pub start_char: usize,
    pub end_char:   usize,
}

impl AnswerBounds {
    pub fn new(start_char: usize, end_char: usize) -> Self {
        Self { start_char, end_char }
    }

    /// Derive the bounds from the first listed answer.
    ///
    /// * no `answer_start` → start defaults to 0
    /// * no `text`         → end equals start
    ///
    /// The answer length is counted in characters, matching the
    /// character offsets the dataset uses.
    pub fn from_example(example: &SquadExample) -> Result<Self> {
        let start = example.answers.first_start().unwrap_or(0);
        if start < 0 {
            return Err(PipelineError::NegativeAnswerStart {
                id:    example.id.clone(),
                value: start,
            });
        }
        let start_char = start as usize;

        let end_char = match example.answers.first_text() {
            Some(text) => start_char + text.chars().count(),
            None       => start_char,
        };

        Ok(Self { start_char, end_char })
    }

    pub fn is_empty(&self) -> bool {
        self.start_char == self.end_char
    }
}
