// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with. No file I/O, no network, no tokenizer.
//
//   example.rs   — SQuAD records and answer character bounds
//   span.rs      — token offsets and token-level answer spans
//   sentiment.rs — sentiment labels and speech parameters
//   traits.rs    — seams for example sources and polarity scorers
//   error.rs     — the typed errors this layer can raise

pub mod error;

pub mod example;

pub mod span;

pub mod sentiment;

pub mod traits;
