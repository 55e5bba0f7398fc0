// ============================================================
// Layer 2 — SentimentAnalyzer
// ============================================================
// Turns text into sentiment labels plus speech-synthesis
// parameters, for the whole text and for each paragraph:
//
//   "Great news!\n\nSadly, it rained."
//     overall     → positive 0.61
//     paragraph 1 → positive, rate 1.25, pitch 1.25, volume 1.0
//     paragraph 2 → negative, rate 0.85, ...
//
// The scorer is injected; production uses the VADER lexicon,
// tests use a stub.

use serde::{Deserialize, Serialize};

use crate::domain::sentiment::{SentimentLabel, SentimentResult, SpeechParams};
use crate::domain::traits::PolarityScorer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphAnalysis {
    pub text:          String,
    pub sentiment:     SentimentLabel,
    pub score:         f64,
    pub speech_params: SpeechParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub overall:    SentimentResult,
    pub paragraphs: Vec<ParagraphAnalysis>,
}

pub struct SentimentAnalyzer<S: PolarityScorer> {
    scorer: S,
}

impl<S: PolarityScorer> SentimentAnalyzer<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn analyze_text(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::blank();
        }
        SentimentResult::from_polarity(self.scorer.polarity_scores(text))
    }

    /// Paragraphs are the non-blank lines of `text`
    pub fn analyze_document(&self, text: &str) -> DocumentAnalysis {
        let paragraphs = text
            .split('\n')
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                let result = self.analyze_text(p);
                ParagraphAnalysis {
                    text:          p.to_string(),
                    sentiment:     result.sentiment,
                    score:         result.score,
                    speech_params: SpeechParams::from_sentiment(&result),
                }
            })
            .collect();

        DocumentAnalysis { overall: self.analyze_text(text), paragraphs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::PolarityScores;

    // "good" → +0.8, "bad" → -0.8, anything else neutral
    struct KeywordScorer;

    impl PolarityScorer for KeywordScorer {
        fn polarity_scores(&self, text: &str) -> PolarityScores {
            let compound = match (text.contains("good"), text.contains("bad")) {
                (true, false) => 0.8,
                (false, true) => -0.8,
                _             => 0.0,
            };
            PolarityScores { positive: 0.0, negative: 0.0, neutral: 1.0, compound }
        }
    }

    #[test]
    fn test_blank_text_is_neutral_half() {
        let a = SentimentAnalyzer::new(KeywordScorer);
        let r = a.analyze_text("   \n ");
        assert_eq!(r.sentiment, SentimentLabel::Neutral);
        assert_eq!(r.score, 0.5);
        assert!(r.details.is_none());
    }

    #[test]
    fn test_document_drops_blank_paragraphs() {
        let a   = SentimentAnalyzer::new(KeywordScorer);
        let doc = a.analyze_document("a good day\n\n   \nsuch a bad night\nplain");

        assert_eq!(doc.paragraphs.len(), 3);
        assert_eq!(doc.paragraphs[0].sentiment, SentimentLabel::Positive);
        assert_eq!(doc.paragraphs[1].sentiment, SentimentLabel::Negative);
        assert_eq!(doc.paragraphs[2].sentiment, SentimentLabel::Neutral);
        assert_eq!(doc.paragraphs[2].speech_params.rate, 1.0);

        // both keywords present → neutral overall
        assert_eq!(doc.overall.sentiment, SentimentLabel::Neutral);
    }

    #[test]
    fn test_paragraph_json_shape() {
        let a   = SentimentAnalyzer::new(KeywordScorer);
        let doc = a.analyze_document("good");
        let v   = serde_json::to_value(&doc).unwrap();

        let p = &v["paragraphs"][0];
        assert_eq!(p["sentiment"], "positive");
        assert!(p["speechParams"]["volume"].is_number());
        assert!(v["overall"]["details"]["compound"].is_number());
    }
}
