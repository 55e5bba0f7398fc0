// ============================================================
// Layer 4 — Processed Records
// ============================================================
// The row types each preprocessing scheme writes to disk.
// Field names match the column names the Hugging Face
// `datasets` library uses, so downstream training code can
// read them without renaming.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Tokenisation scheme a processed split targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Bert,
    Gpt,
    Lstm,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Bert, Scheme::Gpt, Scheme::Lstm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Bert => "bert",
            Scheme::Gpt  => "gpt",
            Scheme::Lstm => "lstm",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One BERT window: [CLS] question [SEP] context-slice [SEP] [PAD]...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BertFeature {
    pub input_ids:       Vec<u32>,
    pub token_type_ids:  Vec<u32>,
    pub attention_mask:  Vec<u32>,
    pub start_positions: usize,
    pub end_positions:   usize,
}

impl BertFeature {
    pub fn has_answer(&self) -> bool {
        !(self.start_positions == 0 && self.end_positions == 0)
    }
}

/// One GPT prompt, truncated and padded to a fixed length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GptFeature {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
}

/// One untokenised row for the LSTM baseline.
/// `answer_start` is -1 when the example has no answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LstmRecord {
    pub context:      String,
    pub question:     String,
    pub answer_text:  String,
    pub answer_start: i64,
}

impl LstmRecord {
    pub const HEADER: [&'static str; 4] = ["context", "question", "answer_text", "answer_start"];
}
