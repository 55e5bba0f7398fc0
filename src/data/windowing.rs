// ============================================================
// Layer 4 — Sliding-Window Tokenisation
// ============================================================
// Splits each (question, context) pair into fixed-length token
// windows using the tokenizer's own overflow support:
//
//   max_length = 384   total tokens per window, specials included
//   stride     = 128   tokens of context shared by neighbours
//   truncation = only the second sequence (the context)
//   padding    = every window padded to max_length
//
// Every window repeats the full question; only the context
// slides. The tokenizer returns the first window as the main
// encoding and the rest as "overflowing" encodings — we
// flatten both and remember which example each came from
// (the overflow-to-sample mapping).
//
// Offsets are requested as CHARACTER offsets, because SQuAD's
// answer_start counts characters, not UTF-8 bytes.

use anyhow::{anyhow, Result};
use tokenizers::{
    Encoding, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams, TruncationStrategy,
};

use crate::domain::span::TokenOffset;

/// Sequence id the tokenizer assigns to the second input (the context)
const CONTEXT_SEQUENCE: usize = 1;

/// One fixed-length slice of a tokenized (question, context) pair
#[derive(Debug, Clone)]
pub struct Window {
    /// Index of the example (within the batch) this window came from
    pub sample_index:   usize,
    pub input_ids:      Vec<u32>,
    pub token_type_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    /// Character offsets into the context, sentinel for everything else
    pub offsets:        Vec<TokenOffset>,
}

impl Window {
    fn from_encoding(sample_index: usize, encoding: &Encoding) -> Self {
        let offsets = encoding
            .get_sequence_ids()
            .into_iter()
            .zip(encoding.get_offsets())
            .map(|(seq, &(start, end))| match seq {
                Some(CONTEXT_SEQUENCE) => TokenOffset::new(start, end),
                _ => TokenOffset::SENTINEL,
            })
            .collect();

        Self {
            sample_index,
            input_ids:      encoding.get_ids().to_vec(),
            token_type_ids: encoding.get_type_ids().to_vec(),
            attention_mask: encoding.get_attention_mask().to_vec(),
            offsets,
        }
    }
}

// ─── WindowEncoder ────────────────────────────────────────────────────────────
pub struct WindowEncoder {
    tokenizer: Tokenizer,
}

impl WindowEncoder {
    /// Configure `tokenizer` for sliding windows.
    ///
    /// Fails if the tokenizer rejects the truncation settings
    /// (e.g. `stride >= max_length`).
    pub fn new(mut tokenizer: Tokenizer, max_length: usize, stride: usize) -> Result<Self> {
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                stride,
                strategy: TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Invalid truncation settings: {e}"))?;

        let pad = padding_for(&tokenizer, max_length);
        tokenizer.with_padding(Some(pad));

        Ok(Self { tokenizer })
    }

    /// Encode a batch of (question, context) pairs into windows.
    /// Windows are returned in example order, then window order.
    pub fn encode_batch<Q, C>(&self, pairs: &[(Q, C)]) -> Result<Vec<Window>>
    where
        Q: AsRef<str>,
        C: AsRef<str>,
    {
        let mut windows = Vec::with_capacity(pairs.len());

        for (sample_index, (question, context)) in pairs.iter().enumerate() {
            let mut encoding = self
                .tokenizer
                .encode_char_offsets((question.as_ref(), context.as_ref()), true)
                .map_err(|e| anyhow!("Tokenisation error: {e}"))?;

            let overflowing = encoding.take_overflowing();
            windows.push(Window::from_encoding(sample_index, &encoding));
            windows.extend(
                overflowing
                    .iter()
                    .map(|enc| Window::from_encoding(sample_index, enc)),
            );
        }

        Ok(windows)
    }
}

/// Pad with the tokenizer's [PAD] token when it has one, id 0 otherwise
fn padding_for(tokenizer: &Tokenizer, max_length: usize) -> PaddingParams {
    PaddingParams {
        strategy:  PaddingStrategy::Fixed(max_length),
        pad_id:    tokenizer.token_to_id("[PAD]").unwrap_or(0),
        pad_token: "[PAD]".to_string(),
        ..Default::default()
    }
}
