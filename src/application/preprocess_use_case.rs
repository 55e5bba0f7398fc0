// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Orchestrates preprocessing for every requested scheme:
//
//   Step 1: Load both splits             (Layer 4 - data, hub fallback)
//   Step 2: Build the scheme's processor (Layer 6 - tokenizer store)
//   Step 3: Process examples in batches  (Layer 4 - data)
//   Step 4: Stream rows to disk          (Layer 6 - store)
//   Step 5: Save the config next to them (Layer 6 - store)
//
// Splits are loaded once and shared by all schemes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    bert::BertFeatureBuilder,
    dataset::Scheme,
    gpt::GptFeatureBuilder,
    loader::JsonlExampleLoader,
    lstm::build_lstm_records,
    windowing::WindowEncoder,
};
use crate::domain::example::SquadExample;
use crate::domain::traits::{ExampleSource, Split};
use crate::infra::{
    hub::SquadHub,
    store::{ProcessedStore, SplitWriter},
    tokenizer_store::TokenizerStore,
};

// ─── Preprocessing Configuration ─────────────────────────────────────────────
// Saved as preprocess_config.json beside each scheme's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub raw_dir:        String,
    pub output_dir:     String,
    pub tokenizer_dir:  String,
    pub dataset_id:     String,
    pub bert_tokenizer: String,
    pub gpt_tokenizer:  String,
    pub max_length:     usize,
    pub stride:         usize,
    pub gpt_max_length: usize,
    pub batch_size:     usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            raw_dir:        "data/raw".to_string(),
            output_dir:     "data/processed".to_string(),
            tokenizer_dir:  "data/tokenizers".to_string(),
            dataset_id:     crate::infra::hub::SQUAD_DATASET_ID.to_string(),
            bert_tokenizer: "bert-base-uncased".to_string(),
            gpt_tokenizer:  "gpt2".to_string(),
            max_length:     384,
            stride:         128,
            gpt_max_length: 512,
            batch_size:     1000,
        }
    }
}

/// What one (scheme, split) run produced
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub scheme:   Scheme,
    pub split:    Split,
    pub examples: usize,
    pub rows:     usize,
    pub path:     PathBuf,
}

enum Processor {
    Bert(BertFeatureBuilder),
    Gpt(GptFeatureBuilder),
    Lstm,
}

impl Processor {
    fn append(&self, batch: &[SquadExample], out: &mut SplitWriter) -> Result<()> {
        match self {
            Processor::Bert(b) => out.append_json(&b.build(batch)?),
            Processor::Gpt(g)  => out.append_json(&g.build(batch)?),
            Processor::Lstm    => out.append_csv(&build_lstm_records(batch)),
        }
    }
}

// ─── PreprocessUseCase ───────────────────────────────────────────────────────
pub struct PreprocessUseCase {
    config: PreprocessConfig,
}

impl PreprocessUseCase {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, schemes: &[Scheme]) -> Result<Vec<SplitReport>> {
        let cfg = &self.config;

        // ── Step 1: Load splits ──────────────────────────────────────────────
        let splits = Split::ALL
            .iter()
            .map(|&split| Ok((split, self.load_split(split)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut reports = Vec::new();
        for &scheme in schemes {
            tracing::info!("Preprocessing for {}...", scheme);

            // ── Step 2: Processor for this scheme ───────────────────────────
            let processor = self.processor(scheme)?;
            let store     = ProcessedStore::new(&cfg.output_dir, scheme)?;
            self.warn_if_settings_changed(&store);

            // ── Steps 3-4: Batches → disk ───────────────────────────────────
            for (split, examples) in &splits {
                let mut out = match scheme {
                    Scheme::Lstm => store.csv_writer(*split)?,
                    _            => store.jsonl_writer(*split)?,
                };

                for (n, batch) in examples.chunks(cfg.batch_size.max(1)).enumerate() {
                    processor
                        .append(batch, &mut out)
                        .with_context(|| format!("{scheme} {split} batch {n}"))?;
                    tracing::debug!("{} {}: batch {} done ({} examples)", scheme, split, n, batch.len());
                }

                let (path, rows) = out.finish()?;
                reports.push(SplitReport {
                    scheme,
                    split: *split,
                    examples: examples.len(),
                    rows,
                    path,
                });
            }

            // ── Step 5: Config ──────────────────────────────────────────────
            store.save_config(cfg)?;

            let train_rows = reports
                .iter()
                .filter(|r| r.scheme == scheme && r.split == Split::Train)
                .map(|r| r.rows)
                .sum::<usize>();
            tracing::info!(
                "{} preprocessing complete. Examples: {} (saved under '{}')",
                scheme.as_str().to_uppercase(),
                train_rows,
                store.dir().display()
            );
        }

        Ok(reports)
    }

    /// Local JSON-lines first; fall back to the hub when they are
    /// missing or unreadable.
    fn load_split(&self, split: Split) -> Result<Vec<SquadExample>> {
        let local = JsonlExampleLoader::new(&self.config.raw_dir);
        match local.load_split(split) {
            Ok(examples) => Ok(examples),
            Err(e) => {
                tracing::warn!("Local {} split unavailable ({:#}); downloading instead", split, e);
                SquadHub::new(&self.config.dataset_id).load_split(split)
            }
        }
    }

    fn processor(&self, scheme: Scheme) -> Result<Processor> {
        let cfg = &self.config;
        let tokenizers = TokenizerStore::new(&cfg.tokenizer_dir);

        Ok(match scheme {
            Scheme::Bert => {
                let tok = tokenizers.load_or_download(&cfg.bert_tokenizer)?;
                Processor::Bert(BertFeatureBuilder::new(WindowEncoder::new(
                    tok,
                    cfg.max_length,
                    cfg.stride,
                )?))
            }
            Scheme::Gpt => {
                let tok = tokenizers.load_or_download(&cfg.gpt_tokenizer)?;
                Processor::Gpt(GptFeatureBuilder::new(tok, cfg.gpt_max_length)?)
            }
            Scheme::Lstm => Processor::Lstm,
        })
    }

    fn warn_if_settings_changed(&self, store: &ProcessedStore) {
        if let Ok(previous) = store.load_config() {
            if previous != self.config {
                tracing::warn!(
                    "Overwriting '{}', which was produced with different settings",
                    store.dir().display()
                );
            }
        }
    }
}
