// ============================================================
// Layer 3 — Sentiment and Speech Parameters
// ============================================================
// Turns raw lexicon polarity scores into a labelled sentiment
// and then into text-to-speech parameters (rate, pitch, volume).
//
// Compound score → label and normalised score:
//
//   compound ≥  0.05  → positive, 0.05..1   maps to 0.5..1
//   compound ≤ -0.05  → negative, 0.05..1   (abs) maps to 0.5..1
//   otherwise         → neutral, -0.05..0.05 maps to 0..0.5
//
// Everything here is a pure function of its inputs; the lexicon
// that produces PolarityScores lives in infra/lexicon.rs.

use serde::{Deserialize, Serialize};

/// Compound scores inside (-0.05, 0.05) are neutral
pub const NEUTRAL_THRESHOLD: f64 = 0.05;

/// Scores above this make positive speech louder and negative speech softer
const STRONG_SCORE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Raw lexicon output for one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral:  f64,
    pub compound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,

    /// Strength of the label in [0, 1], rounded to two decimals
    pub score: f64,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<PolarityScores>,
}

impl SentimentResult {
    /// Result reported for blank input; no lexicon lookup happens
    pub fn blank() -> Self {
        Self { sentiment: SentimentLabel::Neutral, score: 0.5, details: None }
    }

    pub fn from_polarity(scores: PolarityScores) -> Self {
        let compound = scores.compound;

        let (sentiment, score) = if compound >= NEUTRAL_THRESHOLD {
            (
                SentimentLabel::Positive,
                0.5 + (compound - NEUTRAL_THRESHOLD) * 0.5 / 0.95,
            )
        } else if compound <= -NEUTRAL_THRESHOLD {
            (
                SentimentLabel::Negative,
                0.5 + (compound.abs() - NEUTRAL_THRESHOLD) * 0.5 / 0.95,
            )
        } else {
            (
                SentimentLabel::Neutral,
                0.5 * (compound + NEUTRAL_THRESHOLD) / 0.1,
            )
        };

        Self { sentiment, score: round2(score), details: Some(scores) }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ─── SpeechParams ─────────────────────────────────────────────────────────────
/// Multipliers handed to the browser's speech synthesiser.
/// 1.0 is the voice's default for each parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechParams {
    pub rate:   f64,
    pub pitch:  f64,
    pub volume: f64,
}

impl SpeechParams {
    pub fn from_sentiment(result: &SentimentResult) -> Self {
        Self {
            rate:   tone(result),
            pitch:  tone(result),
            volume: volume(result),
        }
    }
}

// Rate and pitch move together: brighter for positive, flatter for negative.
fn tone(result: &SentimentResult) -> f64 {
    match result.sentiment {
        SentimentLabel::Positive => 1.1 + result.score * 0.2,
        SentimentLabel::Negative => 0.9 - result.score * 0.1,
        SentimentLabel::Neutral  => 1.0,
    }
}

fn volume(result: &SentimentResult) -> f64 {
    match result.sentiment {
        SentimentLabel::Positive if result.score > STRONG_SCORE => 1.2,
        SentimentLabel::Negative if result.score > STRONG_SCORE => 0.9,
        _ => 1.0,
    }
}
