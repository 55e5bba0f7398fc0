// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the network, the disk or a third-party
// resource:
//
//   hub.rs             — SQuAD parquet download via hf-hub
//   tokenizer_store.rs — pretrained tokenizer cache / download
//   store.rs           — processed dataset writer (JSONL / CSV)
//   benchmark.rs       — benchmark results map + JSON persistence
//   metrics.rs         — SQuAD exact match / F1
//   lexicon.rs         — VADER polarity scorer

pub mod hub;

pub mod tokenizer_store;

pub mod store;

pub mod benchmark;

pub mod metrics;

pub mod lexicon;
