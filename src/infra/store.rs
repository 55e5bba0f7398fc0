// ============================================================
// Layer 6 — Processed Dataset Store
// ============================================================
// Persists preprocessing output, one directory per scheme:
//
//   data/processed/
//     bert/
//       train.jsonl              ← one BertFeature per line
//       validation.jsonl
//       preprocess_config.json   ← parameters used for this run
//     gpt/
//       train.jsonl, validation.jsonl, preprocess_config.json
//     lstm/
//       train.csv, validation.csv, preprocess_config.json
//
// CSV output quotes a field only when it has to (comma, quote
// or line break inside), doubling embedded quotes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::application::preprocess_use_case::PreprocessConfig;
use crate::data::dataset::{LstmRecord, Scheme};
use crate::domain::traits::Split;

const CONFIG_FILE: &str = "preprocess_config.json";

pub struct ProcessedStore {
    dir: PathBuf,
}

impl ProcessedStore {
    /// `root` is the processed-data root; each scheme gets its own subdirectory
    pub fn new(root: impl Into<PathBuf>, scheme: Scheme) -> Result<Self> {
        let dir = root.into().join(scheme.as_str());
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Open `{split}.jsonl` for appending rows batch by batch
    pub fn jsonl_writer(&self, split: Split) -> Result<SplitWriter> {
        SplitWriter::create(self.dir.join(format!("{split}.jsonl")), Format::Jsonl)
    }

    /// Open `{split}.csv` and write the LSTM header line
    pub fn csv_writer(&self, split: Split) -> Result<SplitWriter> {
        let mut w = SplitWriter::create(self.dir.join(format!("{split}.csv")), Format::Csv)?;
        writeln!(w.out, "{}", LstmRecord::HEADER.join(","))?;
        Ok(w)
    }

    pub fn save_config(&self, cfg: &PreprocessConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved preprocessing config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<PreprocessConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read config from '{}'. Has 'preprocess' been run?",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

// ─── SplitWriter ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Jsonl,
    Csv,
}

/// Streams one processed split to disk so a full split never has
/// to sit in memory.
pub struct SplitWriter {
    path:   PathBuf,
    format: Format,
    out:    BufWriter<File>,
    rows:   usize,
}

impl SplitWriter {
    fn create(path: PathBuf, format: Format) -> Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        Ok(Self { path, format, out: BufWriter::new(file), rows: 0 })
    }

    pub fn append_json<T: Serialize>(&mut self, rows: &[T]) -> Result<()> {
        debug_assert_eq!(self.format, Format::Jsonl);
        for row in rows {
            serde_json::to_writer(&mut self.out, row)?;
            self.out.write_all(b"\n")?;
        }
        self.rows += rows.len();
        Ok(())
    }

    pub fn append_csv(&mut self, rows: &[LstmRecord]) -> Result<()> {
        debug_assert_eq!(self.format, Format::Csv);
        for r in rows {
            writeln!(
                self.out,
                "{},{},{},{}",
                csv_field(&r.context),
                csv_field(&r.question),
                csv_field(&r.answer_text),
                r.answer_start,
            )?;
        }
        self.rows += rows.len();
        Ok(())
    }

    /// Flush and return (path, rows written)
    pub fn finish(mut self) -> Result<(PathBuf, usize)> {
        self.out
            .flush()
            .with_context(|| format!("Cannot write '{}'", self.path.display()))?;
        tracing::debug!("Wrote {} rows to '{}'", self.rows, self.path.display());
        Ok((self.path, self.rows))
    }
}

fn csv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}
