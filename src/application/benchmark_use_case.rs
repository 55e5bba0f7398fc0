// ============================================================
// Layer 2 — BenchmarkUseCase
// ============================================================
// Three ways to touch the results file:
//
//   record — add metrics you already have (name=value pairs)
//   score  — compute SQuAD EM / F1 for a predictions file
//            against a raw split, then record them
//   report — per-model average of one metric
//
// Every call loads the existing results first, so recording
// accumulates instead of overwriting.

use anyhow::{bail, Context, Result};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use crate::data::loader::JsonlExampleLoader;
use crate::domain::traits::{ExampleSource, Split};
use crate::infra::{
    benchmark::{BenchmarkFramework, Metrics},
    metrics::{self, SquadScores},
};

pub struct BenchmarkUseCase {
    results_path: PathBuf,
    framework:    BenchmarkFramework,
}

impl BenchmarkUseCase {
    pub fn open(results_path: impl Into<PathBuf>) -> Result<Self> {
        let results_path = results_path.into();
        let mut framework = BenchmarkFramework::new();
        framework.load_results(&results_path)?;
        Ok(Self { results_path, framework })
    }

    pub fn framework(&self) -> &BenchmarkFramework {
        &self.framework
    }

    pub fn record(&mut self, model: &str, dataset: &str, metrics: Metrics) -> Result<()> {
        tracing::info!("Recording {} metric(s) for {} on {}", metrics.len(), model, dataset);
        self.framework.add_result(model, dataset, metrics);
        self.framework.save_results(&self.results_path)
    }

    /// Score `predictions` (a JSON object `{question id: answer text}`)
    /// against the gold answers of a raw split and record the result.
    pub fn score(
        &mut self,
        model:       &str,
        dataset:     &str,
        predictions: &Path,
        raw_dir:     &Path,
        split:       Split,
    ) -> Result<SquadScores> {
        let json = fs::read_to_string(predictions)
            .with_context(|| format!("Cannot read predictions '{}'", predictions.display()))?;
        let predicted: HashMap<String, String> = serde_json::from_str(&json)
            .with_context(|| format!("Predictions '{}' must map id → text", predictions.display()))?;

        let gold = JsonlExampleLoader::new(raw_dir).load_split(split)?;
        if gold.is_empty() {
            bail!("No {} examples under '{}' to score against", split, raw_dir.display());
        }

        let scores = metrics::score(
            gold.iter()
                .map(|ex| (predicted.get(&ex.id).map(String::as_str), ex.answers.text.as_slice())),
        );
        if scores.missing > 0 {
            tracing::warn!("{} of {} questions have no prediction", scores.missing, gold.len());
        }
        tracing::info!(
            "{} on {} ({}): EM {:.2}, F1 {:.2}",
            model, dataset, split, scores.exact_match, scores.f1
        );

        self.record(model, dataset, scores.as_metrics())?;
        Ok(scores)
    }

    pub fn report(&self, metric: &str) -> BTreeMap<String, f64> {
        self.framework.average_performance(metric)
    }
}

/// Parse `name=value` pairs given on the command line
pub fn parse_metrics(pairs: &[String]) -> Result<Metrics> {
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("Expected name=value, got '{pair}'"))?;
            let value: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("'{}' is not a number in '{pair}'", value.trim()))?;
            Ok((name.trim().to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::{Answers, SquadExample};

    #[test]
    fn test_parse_metrics() {
        let m = parse_metrics(&["exact_match=80.5".into(), " f1 = 88.7".into()]).unwrap();
        assert_eq!(m["exact_match"], 80.5);
        assert_eq!(m["f1"], 88.7);

        assert!(parse_metrics(&["f1".into()]).is_err());
        assert!(parse_metrics(&["f1=high".into()]).is_err());
    }

    #[test]
    fn test_record_accumulates_across_runs() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut first = BenchmarkUseCase::open(&path).unwrap();
        first.record("BERT-base", "SQuAD", parse_metrics(&["f1=88.0".into()]).unwrap()).unwrap();

        let mut second = BenchmarkUseCase::open(&path).unwrap();
        second.record("GPT-2", "SQuAD", parse_metrics(&["f1=80.0".into()]).unwrap()).unwrap();

        let report = second.report("f1");
        assert_eq!(report.len(), 2);
        assert_eq!(report["BERT-base"], 88.0);
    }

    #[test]
    fn test_score_predictions_file() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");

        let ex = |id: &str, answer: &str| {
            SquadExample::new(
                id,
                "ctx",
                "q",
                Answers { text: vec![answer.into()], answer_start: vec![0] },
            )
        };
        JsonlExampleLoader::new(&raw)
            .save_split(Split::Validation, &[ex("a", "Denver Broncos"), ex("b", "Santa Clara"), ex("c", "1966")])
            .unwrap();

        let preds = dir.path().join("preds.json");
        fs::write(&preds, r#"{"a": "the Denver Broncos", "b": "Clara"}"#).unwrap();

        let mut uc = BenchmarkUseCase::open(dir.path().join("results.json")).unwrap();
        let s = uc.score("mine", "SQuAD", &preds, &raw, Split::Validation).unwrap();

        assert_eq!(s.missing, 1);
        assert_eq!(s.scored, 2);
        // a: exact (article dropped); b: F1 2/3; c: missing
        assert!((s.exact_match - 100.0 / 3.0).abs() < 1e-9);
        assert!((s.f1 - 100.0 * (1.0 + 2.0 / 3.0) / 3.0).abs() < 1e-9);

        let m = uc.framework().get("mine", "SQuAD").unwrap();
        assert!((m["f1"] - s.f1).abs() < 1e-9);
    }
}
