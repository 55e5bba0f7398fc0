// ============================================================
// Layer 3 — Token Offsets and Span Labels
// ============================================================
// Extractive Q&A labels an answer as a SPAN of tokens inside
// the combined [CLS] question [SEP] context [SEP] sequence:
//
//   Question: "What does the school have?"
//   Context:  "the school has a Catholic character"
//   Answer:   tokens at positions 11 to 12 → "Catholic character"
//
// Two small value types carry that information:
//   TokenOffset — which characters of the context a token covers
//   SpanLabel   — which tokens the gold answer occupies
//
// Reference: Devlin et al. (2019) - BERT paper, §4.2 SQuAD v1.1

use serde::{Deserialize, Serialize};

/// Half-open character range `[start, end)` into the original context.
///
/// Tokens that do not come from the context (question tokens, special
/// tokens, padding) carry the sentinel `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenOffset {
    pub start: usize,
    pub end:   usize,
}

impl TokenOffset {
    pub const SENTINEL: TokenOffset = TokenOffset { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl From<(usize, usize)> for TokenOffset {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// Inclusive token range `[start, end]` of the answer within one window.
///
/// `(0, 0)` is reserved for "answer not representable in this window";
/// position 0 is always [CLS], so a real answer never starts there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanLabel {
    pub start: usize,
    pub end:   usize,
}

impl SpanLabel {
    pub const NOT_CONTAINED: SpanLabel = SpanLabel { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::NOT_CONTAINED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_offset() {
        assert!(TokenOffset::from((0, 0)).is_sentinel());
        assert!(!TokenOffset::new(0, 3).is_sentinel());
    }

    #[test]
    fn test_not_contained_label() {
        assert!(SpanLabel::NOT_CONTAINED.is_sentinel());
        assert!(!SpanLabel::new(4, 4).is_sentinel());
    }
}
