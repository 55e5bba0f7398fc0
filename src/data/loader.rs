// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads SQuAD splits saved by the `download` step:
//
//   {raw_dir}/squad_train.json
//   {raw_dir}/squad_validation.json
//
// Despite the .json extension these are JSON-lines files (one
// example per line), the layout the Hugging Face exporter
// writes.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::example::SquadExample;
use crate::domain::traits::{ExampleSource, Split};

pub struct JsonlExampleLoader {
    dir: PathBuf,
}

impl JsonlExampleLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn split_path(&self, split: Split) -> PathBuf {
        self.dir.join(format!("squad_{split}.json"))
    }

    /// Write one split in the same JSON-lines layout `load_split` reads
    pub fn save_split(&self, split: Split, examples: &[SquadExample]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.split_path(split);
        let mut out = BufWriter::new(
            File::create(&path).with_context(|| format!("Cannot create '{}'", path.display()))?,
        );
        for ex in examples {
            serde_json::to_writer(&mut out, ex)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        tracing::info!("Saved {} {} examples to '{}'", examples.len(), split, path.display());
        Ok(path)
    }
}

impl ExampleSource for JsonlExampleLoader {
    fn load_split(&self, split: Split) -> Result<Vec<SquadExample>> {
        let path = self.split_path(split);
        let examples = read_jsonl(&path)?;
        tracing::info!("Loaded {} {} examples from '{}'", examples.len(), split, path.display());
        Ok(examples)
    }
}

fn read_jsonl(path: &Path) -> Result<Vec<SquadExample>> {
    let file = File::open(path).with_context(|| format!("Cannot open '{}'", path.display()))?;

    let mut examples = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Cannot read '{}'", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let ex: SquadExample = serde_json::from_str(&line)
            .with_context(|| format!("Malformed example at {}:{}", path.display(), n + 1))?;
        examples.push(ex);
    }
    Ok(examples)
}
