// ============================================================
// Layer 2 — DownloadUseCase
// ============================================================
// Fetches both SQuAD splits and stores them as JSON lines under
// the raw data directory:
//
//   data/raw/squad_train.json
//   data/raw/squad_validation.json
//
// The source is generic so tests can feed examples from memory.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::loader::JsonlExampleLoader;
use crate::domain::traits::{ExampleSource, Split};

pub struct DownloadUseCase<S: ExampleSource> {
    source: S,
    raw:    JsonlExampleLoader,
}

impl<S: ExampleSource> DownloadUseCase<S> {
    pub fn new(source: S, raw_dir: impl Into<PathBuf>) -> Self {
        Self { source, raw: JsonlExampleLoader::new(raw_dir) }
    }

    /// Returns `(split, example count)` for every split written
    pub fn execute(&self) -> Result<Vec<(Split, usize)>> {
        let mut sizes = Vec::with_capacity(Split::ALL.len());

        for split in Split::ALL {
            let examples = self.source.load_split(split)?;

            if split == Split::Train {
                if let Some(first) = examples.first() {
                    tracing::info!(
                        "First training example: id={} title={:?} question={:?} answer={:?}",
                        first.id,
                        first.title,
                        first.question,
                        first.answers.first_text().unwrap_or("")
                    );
                }
            }

            self.raw.save_split(split, &examples)?;
            sizes.push((split, examples.len()));
        }

        for (split, n) in &sizes {
            tracing::info!("{} size: {}", split, n);
        }
        Ok(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::{Answers, SquadExample};

    struct InMemory;

    impl ExampleSource for InMemory {
        fn load_split(&self, split: Split) -> Result<Vec<SquadExample>> {
            let n = match split {
                Split::Train      => 3,
                Split::Validation => 1,
            };
            Ok((0..n)
                .map(|i| {
                    SquadExample::new(
                        format!("{split}-{i}"),
                        "Paris is in France.",
                        "Where is Paris?",
                        Answers { text: vec!["France".into()], answer_start: vec![12] },
                    )
                })
                .collect())
        }
    }

    #[test]
    fn test_writes_both_splits() {
        let dir = tempfile::tempdir().unwrap();
        let sizes = DownloadUseCase::new(InMemory, dir.path()).execute().unwrap();
        assert_eq!(sizes, vec![(Split::Train, 3), (Split::Validation, 1)]);

        let back = JsonlExampleLoader::new(dir.path()).load_split(Split::Train).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[0].id, "train-0");
        assert!(dir.path().join("squad_validation.json").exists());
    }
}
