// ============================================================
// Layer 6 — SQuAD Metrics
// ============================================================
// Exact match and token-level F1, computed the way the official
// SQuAD v1.1 evaluation script does it.
//
// Both prediction and gold answer are normalised first:
//   1. lowercase
//   2. strip punctuation
//   3. drop the articles "a", "an", "the"
//   4. collapse whitespace
//
// Each question may list several gold answers; a prediction is
// scored against the best-matching one. Totals are percentages.
//
// Example:
//   prediction "The Eiffel Tower!"  vs gold "eiffel tower"
//   → exact_match = 1, f1 = 1.0

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub fn normalize_answer(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_punct: String = lowered.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    no_punct
        .split_whitespace()
        .filter(|w| !matches!(*w, "a" | "an" | "the"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn exact_match(prediction: &str, gold: &str) -> bool {
    normalize_answer(prediction) == normalize_answer(gold)
}

pub fn f1_score(prediction: &str, gold: &str) -> f64 {
    let pred_norm = normalize_answer(prediction);
    let gold_norm = normalize_answer(gold);
    let pred: Vec<&str> = pred_norm.split_whitespace().collect();
    let gold: Vec<&str> = gold_norm.split_whitespace().collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for w in &gold {
        *counts.entry(*w).or_insert(0) += 1;
    }

    let mut common = 0usize;
    for w in &pred {
        if let Some(c) = counts.get_mut(w) {
            if *c > 0 {
                *c -= 1;
                common += 1;
            }
        }
    }

    if common == 0 {
        return 0.0;
    }
    let precision = common as f64 / pred.len() as f64;
    let recall    = common as f64 / gold.len() as f64;
    2.0 * precision * recall / (precision + recall)
}

/// Aggregate scores over a set of predictions, as percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquadScores {
    pub exact_match: f64,
    pub f1:          f64,
    /// Questions that had a prediction
    pub scored:      usize,
    /// Questions with no prediction (count as zero)
    pub missing:     usize,
}

impl SquadScores {
    pub fn as_metrics(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("exact_match".to_string(), self.exact_match),
            ("f1".to_string(), self.f1),
        ])
    }
}

/// Score `(prediction, gold answers)` pairs. `None` means no prediction.
pub fn score<'a, I>(items: I) -> SquadScores
where
    I: IntoIterator<Item = (Option<&'a str>, &'a [String])>,
{
    let mut total   = 0usize;
    let mut missing = 0usize;
    let mut em_sum  = 0.0;
    let mut f1_sum  = 0.0;

    for (prediction, golds) in items {
        total += 1;
        let Some(pred) = prediction else {
            missing += 1;
            continue;
        };

        em_sum += golds
            .iter()
            .map(|g| if exact_match(pred, g) { 1.0 } else { 0.0 })
            .fold(0.0, f64::max);
        f1_sum += golds.iter().map(|g| f1_score(pred, g)).fold(0.0, f64::max);
    }

    let pct = |sum: f64| if total == 0 { 0.0 } else { 100.0 * sum / total as f64 };
    SquadScores {
        exact_match: pct(em_sum),
        f1:          pct(f1_sum),
        scored:      total - missing,
        missing,
    }
}
