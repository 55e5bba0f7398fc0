// ============================================================
// Layer 4 — BERT Feature Builder
// ============================================================
// examples ──► clean ──► sliding windows ──► align answer ──► BertFeature
//
// One example can yield several features (one per window).
// Each window is labelled independently; windows that do not
// hold the whole answer point at [CLS] with (0, 0).

use anyhow::{Context, Result};

use crate::data::aligner::align_answer_span;
use crate::data::dataset::BertFeature;
use crate::data::preprocessor::Preprocessor;
use crate::data::windowing::WindowEncoder;
use crate::domain::example::{AnswerBounds, SquadExample};

pub struct BertFeatureBuilder {
    encoder:      WindowEncoder,
    preprocessor: Preprocessor,
}

impl BertFeatureBuilder {
    pub fn new(encoder: WindowEncoder) -> Self {
        Self { encoder, preprocessor: Preprocessor::new() }
    }

    pub fn build(&self, examples: &[SquadExample]) -> Result<Vec<BertFeature>> {
        let bounds = examples
            .iter()
            .map(AnswerBounds::from_example)
            .collect::<Result<Vec<_>, _>>()?;

        let pairs: Vec<(&str, &str)> = examples
            .iter()
            .map(|ex| {
                (
                    self.preprocessor.clean_question(&ex.question),
                    self.preprocessor.clean_context(&ex.context),
                )
            })
            .collect();

        let windows = self.encoder.encode_batch(&pairs)?;

        windows
            .into_iter()
            .map(|w| {
                let label = align_answer_span(&w.offsets, bounds[w.sample_index])
                    .with_context(|| {
                        format!("Cannot label window of example '{}'", examples[w.sample_index].id)
                    })?;

                Ok(BertFeature {
                    input_ids:       w.input_ids,
                    token_type_ids:  w.token_type_ids,
                    attention_mask:  w.attention_mask,
                    start_positions: label.start,
                    end_positions:   label.end,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Answers;
    use crate::infra::tokenizer_store::test_support::word_level_tokenizer;

    const CONTEXT: &str = "the school has a catholic character and the main building is crowned by a golden dome with a statue of the virgin mary on top";

    fn example(question: &str, answer: &str) -> SquadExample {
        let start = CONTEXT.find(answer).unwrap() as i64;
        SquadExample::new(
            "ex",
            CONTEXT,
            question,
            Answers { text: vec![answer.into()], answer_start: vec![start] },
        )
    }

    fn ids(words: &[&str]) -> Vec<u32> {
        let tok = word_level_tokenizer();
        words.iter().map(|w| tok.token_to_id(w).unwrap()).collect()
    }

    #[test]
    fn test_single_window_labels_answer_tokens() {
        let encoder  = WindowEncoder::new(word_level_tokenizer(), 64, 16).unwrap();
        let builder  = BertFeatureBuilder::new(encoder);
        let features = builder.build(&[example("what is crowned by a golden dome", "golden dome")]).unwrap();

        assert_eq!(features.len(), 1);
        let f = &features[0];
        assert!(f.has_answer());
        assert_eq!(
            f.input_ids[f.start_positions..=f.end_positions].to_vec(),
            ids(&["golden", "dome"])
        );
    }

    #[test]
    fn test_question_whitespace_does_not_shift_labels() {
        let encoder  = WindowEncoder::new(word_level_tokenizer(), 64, 16).unwrap();
        let builder  = BertFeatureBuilder::new(encoder);
        let features = builder.build(&[example("   who is on top   ", "virgin mary")]).unwrap();

        let f = &features[0];
        assert_eq!(
            f.input_ids[f.start_positions..=f.end_positions].to_vec(),
            ids(&["virgin", "mary"])
        );
    }

    #[test]
    fn test_overflow_windows_are_labelled_independently() {
        let encoder  = WindowEncoder::new(word_level_tokenizer(), 16, 4).unwrap();
        let builder  = BertFeatureBuilder::new(encoder);
        let features = builder.build(&[example("what is on top", "virgin mary")]).unwrap();

        assert!(features.len() > 1);

        let (with, without): (Vec<_>, Vec<_>) = features.iter().partition(|f| f.has_answer());
        assert!(!with.is_empty());
        assert!(!without.is_empty());

        for f in with {
            assert_eq!(
                f.input_ids[f.start_positions..=f.end_positions].to_vec(),
                ids(&["virgin", "mary"])
            );
        }
    }

    #[test]
    fn test_unanswered_example_is_not_an_error() {
        let encoder  = WindowEncoder::new(word_level_tokenizer(), 64, 16).unwrap();
        let builder  = BertFeatureBuilder::new(encoder);
        let ex = SquadExample::new("none", CONTEXT, "who", Answers::default());

        let features = builder.build(&[ex]).unwrap();
        assert_eq!(features.len(), 1);
        // degenerate answer at context position 0 → first context token
        let first_context_token = 3; // [CLS] who [SEP]
        assert_eq!(features[0].start_positions, first_context_token);
        assert_eq!(features[0].end_positions, first_context_token);
    }

    #[test]
    fn test_negative_answer_start_fails() {
        let encoder = WindowEncoder::new(word_level_tokenizer(), 64, 16).unwrap();
        let builder = BertFeatureBuilder::new(encoder);
        let ex = SquadExample::new(
            "bad",
            CONTEXT,
            "who",
            Answers { text: vec!["x".into()], answer_start: vec![-3] },
        );
        assert!(builder.build(&[ex]).is_err());
    }
}
