// ============================================================
// Layer 4 — GPT Feature Builder
// ============================================================
// Decoder-only models see Q&A as plain text continuation:
//
//   "Context: {context} Question: {question} Answer: {answer}"
//
// The prompt is truncated and right-padded to a fixed length
// (512). GPT-2 has no pad token, so the end-of-text token
// doubles as padding.

use anyhow::{anyhow, Result};
use tokenizers::{
    PaddingParams, PaddingStrategy, Tokenizer, TruncationParams, TruncationStrategy,
};

use crate::data::dataset::GptFeature;
use crate::domain::example::SquadExample;

pub const EOS_TOKEN: &str = "<|endoftext|>";

const NO_ANSWER: &str = "No answer";

pub struct GptFeatureBuilder {
    tokenizer: Tokenizer,
}

impl GptFeatureBuilder {
    pub fn new(mut tokenizer: Tokenizer, max_length: usize) -> Result<Self> {
        let eos_id = tokenizer
            .token_to_id(EOS_TOKEN)
            .ok_or_else(|| anyhow!("Tokenizer has no '{EOS_TOKEN}' token to pad with"))?;

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                strategy: TruncationStrategy::LongestFirst,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Invalid truncation settings: {e}"))?;

        tokenizer.with_padding(Some(PaddingParams {
            strategy:  PaddingStrategy::Fixed(max_length),
            pad_id:    eos_id,
            pad_token: EOS_TOKEN.to_string(),
            ..Default::default()
        }));

        Ok(Self { tokenizer })
    }

    pub fn build(&self, examples: &[SquadExample]) -> Result<Vec<GptFeature>> {
        let prompts: Vec<String> = examples.iter().map(prompt).collect();

        let encodings = self
            .tokenizer
            .encode_batch(prompts, true)
            .map_err(|e| anyhow!("Tokenisation error: {e}"))?;

        Ok(encodings
            .into_iter()
            .map(|enc| GptFeature {
                input_ids:      enc.get_ids().to_vec(),
                attention_mask: enc.get_attention_mask().to_vec(),
            })
            .collect())
    }
}

pub fn prompt(example: &SquadExample) -> String {
    format!(
        "Context: {} Question: {} Answer: {}",
        example.context,
        example.question,
        example.answers.first_text().unwrap_or(NO_ANSWER),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Answers;
    use crate::infra::tokenizer_store::test_support::word_level_tokenizer;

    fn example(answers: Answers) -> SquadExample {
        SquadExample::new("g1", "the dome is golden", "what is golden", answers)
    }

    #[test]
    fn test_prompt_uses_first_answer() {
        let ex = example(Answers {
            text:         vec!["the dome".into(), "dome".into()],
            answer_start: vec![0, 4],
        });
        assert_eq!(
            prompt(&ex),
            "Context: the dome is golden Question: what is golden Answer: the dome"
        );
    }

    #[test]
    fn test_prompt_without_answer() {
        let ex = example(Answers::default());
        assert!(prompt(&ex).ends_with("Answer: No answer"));
    }

    #[test]
    fn test_features_are_padded_with_eos() {
        let builder = GptFeatureBuilder::new(word_level_tokenizer(), 40).unwrap();
        let features = builder.build(&[example(Answers::default())]).unwrap();

        let f   = &features[0];
        let eos = word_level_tokenizer().token_to_id(EOS_TOKEN).unwrap();
        assert_eq!(f.input_ids.len(), 40);
        assert_eq!(f.attention_mask.len(), 40);
        assert_eq!(*f.input_ids.last().unwrap(), eos);
        assert_eq!(*f.attention_mask.last().unwrap(), 0);
        assert_eq!(f.attention_mask[0], 1);
    }

    #[test]
    fn test_long_prompts_are_truncated() {
        let builder = GptFeatureBuilder::new(word_level_tokenizer(), 6).unwrap();
        let features = builder.build(&[example(Answers::default())]).unwrap();
        assert_eq!(features[0].input_ids.len(), 6);
        assert!(features[0].attention_mask.iter().all(|&m| m == 1));
    }

    #[test]
    fn test_tokenizer_without_eos_is_rejected() {
        let tok: Tokenizer = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": {"type": "Whitespace"},
            "post_processor": null,
            "decoder": null,
            "model": {"type": "WordLevel", "vocab": {"[UNK]": 0}, "unk_token": "[UNK]"}
        })
        .to_string()
        .parse()
        .unwrap();
        assert!(GptFeatureBuilder::new(tok, 8).is_err());
    }
}
