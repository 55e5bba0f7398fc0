// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From raw SQuAD examples to the records each model family
// trains on:
//
//   squad_{split}.json
//       │
//       ▼
//   JsonlExampleLoader   → SquadExample
//       │
//       ├──► bert: Preprocessor → WindowEncoder → aligner → BertFeature
//       ├──► gpt:  prompt formatting → fixed-length encoding → GptFeature
//       └──► lstm: flattening → LstmRecord
//
// Each module handles exactly one step and is tested on its own.

/// Reads and writes JSON-lines SQuAD splits
pub mod loader;

/// Whitespace clean-up that keeps answer offsets valid
pub mod preprocessor;

/// Sliding-window tokenisation with character offsets
pub mod windowing;

/// Character answer range → token span, per window
pub mod aligner;

/// Row types written by each scheme
pub mod dataset;

pub mod bert;

pub mod gpt;

pub mod lstm;
