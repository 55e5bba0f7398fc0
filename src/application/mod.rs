// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case coordinates the data and infra layers to reach
// one goal the CLI exposes.
//
// Rules for this layer:
//   - No tokenization or alignment logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - No direct file formats here (that's Layer 4 and 6)
//   - Only workflow coordination

// Fetch SQuAD into data/raw
pub mod download_use_case;

// Model-specific preprocessing (BERT / GPT / LSTM)
pub mod preprocess_use_case;

// Recording, scoring and reporting benchmark results
pub mod benchmark_use_case;

// Sentiment → speech parameters
pub mod analyze_use_case;

// Everything above, in order
pub mod pipeline_use_case;
