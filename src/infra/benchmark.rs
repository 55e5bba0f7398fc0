// ============================================================
// Layer 6 — Benchmark Results Store
// ============================================================
// Collects evaluation metrics as
//
//   model name → dataset name → metric name → value
//
// and persists them as pretty-printed JSON:
//
//   {
//     "BERT-base": {
//       "SQuAD": { "exact_match": 80.5, "f1": 88.7, "timestamp": 1760000000.0 }
//     }
//   }
//
// Every added result is stamped with the time it was recorded.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

pub const DEFAULT_RESULTS_PATH: &str = "evaluation/benchmark_results.json";

pub type Metrics = BTreeMap<String, f64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkFramework {
    results: BTreeMap<String, BTreeMap<String, Metrics>>,
}

impl BenchmarkFramework {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `metrics` for a model on a dataset, replacing any earlier entry
    pub fn add_result(&mut self, model: &str, dataset: &str, mut metrics: Metrics) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        metrics.insert("timestamp".to_string(), timestamp);

        self.results
            .entry(model.to_string())
            .or_default()
            .insert(dataset.to_string(), metrics);
    }

    pub fn get(&self, model: &str, dataset: &str) -> Option<&Metrics> {
        self.results.get(model)?.get(dataset)
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    pub fn save_results(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write results to '{}'", path.display()))?;
        tracing::info!("Results saved to '{}'", path.display());
        Ok(())
    }

    /// Replace the in-memory results with the file's contents.
    /// A missing file is not an error: the current results are kept.
    pub fn load_results(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            tracing::warn!("No results file found at '{}'", path.display());
            return Ok(());
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        *self = serde_json::from_str(&json)
            .with_context(|| format!("Malformed results file '{}'", path.display()))?;
        tracing::info!("Results loaded from '{}'", path.display());
        Ok(())
    }

    /// Mean of `metric` per model over the datasets that report it.
    /// Models with no value for `metric` are left out.
    pub fn average_performance(&self, metric: &str) -> BTreeMap<String, f64> {
        self.results
            .iter()
            .filter_map(|(model, datasets)| {
                let values: Vec<f64> = datasets
                    .values()
                    .filter_map(|m| m.get(metric).copied())
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    let mean = values.iter().sum::<f64>() / values.len() as f64;
                    Some((model.clone(), mean))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(pairs: &[(&str, f64)]) -> Metrics {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_add_result_stamps_time() {
        let mut b = BenchmarkFramework::new();
        b.add_result("BERT-base", "SQuAD", metrics(&[("f1", 88.7)]));

        let m = b.get("BERT-base", "SQuAD").unwrap();
        assert_eq!(m["f1"], 88.7);
        assert!(m["timestamp"] > 0.0);
    }

    #[test]
    fn test_average_skips_models_without_metric() {
        let mut b = BenchmarkFramework::new();
        b.add_result("BERT-base", "SQuAD", metrics(&[("f1", 88.0)]));
        b.add_result("BERT-base", "NewsQA", metrics(&[("f1", 70.0)]));
        b.add_result("LSTM-baseline", "SQuAD", metrics(&[("exact_match", 65.3)]));

        let avg = b.average_performance("f1");
        assert_eq!(avg.len(), 1);
        assert_eq!(avg["BERT-base"], 79.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluation/benchmark_results.json");

        let mut b = BenchmarkFramework::new();
        b.add_result("LSTM-baseline", "SQuAD", metrics(&[("f1", 75.2), ("inference_time", 0.08)]));
        b.save_results(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"LSTM-baseline\": {"));

        let mut loaded = BenchmarkFramework::new();
        loaded.load_results(&path).unwrap();
        let m = loaded.get("LSTM-baseline", "SQuAD").unwrap();
        assert_eq!(m["f1"], 75.2);
        assert_eq!(m["inference_time"], 0.08);
        assert!(m.contains_key("timestamp"));
    }

    #[test]
    fn test_loading_missing_file_keeps_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut b = BenchmarkFramework::new();
        b.add_result("m", "d", metrics(&[("f1", 1.0)]));

        b.load_results(&dir.path().join("absent.json")).unwrap();
        assert!(b.get("m", "d").is_some());
    }
}
