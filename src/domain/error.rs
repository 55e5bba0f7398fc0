// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// The few failures the pure domain code can report.
// Everything else in the pipeline degrades through sentinel
// values (see aligner.rs) or is wrapped in anyhow at the
// application boundary.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A window with no tokens at all cannot be aligned
    #[error("offset mapping is empty")]
    EmptyOffsets,

    #[error("answer end ({end}) precedes answer start ({start})")]
    InvertedBounds { start: usize, end: usize },

    /// Raised while deriving answer bounds from a dataset record
    #[error("example '{id}' has a negative answer_start ({value})")]
    NegativeAnswerStart { id: String, value: i64 },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
