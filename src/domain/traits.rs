// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two external capabilities the pipeline leans on are
// expressed as traits so the application layer never names a
// concrete file format or lexicon:
//
//   ExampleSource  — anything that can produce SQuAD examples
//                    (local JSON-lines files, the Hugging Face hub)
//   PolarityScorer — anything that can score text polarity
//                    (the VADER lexicon, a stub in tests)

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::example::SquadExample;
use crate::domain::sentiment::PolarityScores;

/// The two splits SQuAD v1.1 ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Validation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train      => "train",
            Split::Validation => "validation",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Implementations:
///   - JsonlExampleLoader → data/raw/squad_{split}.json
///   - SquadHub           → rajpurkar/squad parquet files on the hub
pub trait ExampleSource {
    fn load_split(&self, split: Split) -> Result<Vec<SquadExample>>;
}

// ─── PolarityScorer ───────────────────────────────────────────────────────────
/// Scores are expected in VADER's convention: `positive`, `negative`
/// and `neutral` are proportions, `compound` is normalised to [-1, 1].
///
/// Implementations must be shareable across request handlers.
pub trait PolarityScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}
