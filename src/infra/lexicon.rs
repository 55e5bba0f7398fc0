// ============================================================
// Layer 6 — Sentiment Lexicon
// ============================================================
// VADER (Hutto & Gilbert, 2014): a rule-based lexicon scorer
// tuned for short, informal text. The vader_sentiment crate
// compiles the lexicon into the binary, so loading is a one-off
// in-memory build with no download step.
//
// Load it once at startup and share it; it is read-only.

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::domain::sentiment::PolarityScores;
use crate::domain::traits::PolarityScorer;

pub struct VaderLexicon {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderLexicon {
    pub fn load() -> Self {
        let analyzer = SentimentIntensityAnalyzer::new();
        tracing::info!("VADER sentiment lexicon loaded");
        Self { analyzer }
    }
}

impl PolarityScorer for VaderLexicon {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        PolarityScores {
            positive: get("pos"),
            negative: get("neg"),
            neutral:  get("neu"),
            compound: get("compound"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearly_positive_text() {
        let lex = VaderLexicon::load();
        let s = lex.polarity_scores("I love this product! It's amazing and works perfectly.");
        assert!(s.compound > 0.5);
        assert!(s.positive > s.negative);
    }

    #[test]
    fn test_clearly_negative_text() {
        let lex = VaderLexicon::load();
        let s = lex.polarity_scores("This is terrible. I'm very disappointed and angry.");
        assert!(s.compound < -0.5);
    }
}
