// ============================================================
// Layer 4 — Answer-Span Aligner
// ============================================================
// Maps the gold answer's character range onto token positions
// inside ONE tokenized window.
//
// A long context is split into overlapping windows
// (max_length 384, stride 128). The answer offsets always refer
// to the untruncated context, so each window has to decide on
// its own whether it holds the whole answer:
//
//   context chars:  0 ........ 400 ......... 900 ........ 1400
//   window 0:       [CLS] q [SEP] ctx[0..~1100]       [SEP]
//   window 1:       [CLS] q [SEP] ctx[~700..1400]     [SEP]
//
// Scan, per window:
//   1. walk right while token.start <= answer_start, step back
//      one → start token
//   2. from there walk right while token.end <= answer_end,
//      step back one → end token
//   3. answer not fully inside the window → (0, 0)
//
// Tokens carrying the (0, 0) sentinel offset (question, special
// tokens, padding) are walked over and never chosen.

use crate::domain::error::{PipelineError, Result};
use crate::domain::example::AnswerBounds;
use crate::domain::span::{SpanLabel, TokenOffset};

/// Label one window.
///
/// Returns `SpanLabel::NOT_CONTAINED` when the window does not hold the
/// complete answer, including windows whose context starts after the
/// answer does and windows with no context tokens at all.
pub fn align_answer_span(offsets: &[TokenOffset], answer: AnswerBounds) -> Result<SpanLabel> {
    if offsets.is_empty() {
        return Err(PipelineError::EmptyOffsets);
    }
    if answer.end_char < answer.start_char {
        return Err(PipelineError::InvertedBounds {
            start: answer.start_char,
            end:   answer.end_char,
        });
    }

    let context = || {
        offsets
            .iter()
            .enumerate()
            .filter(|(_, off)| !off.is_sentinel())
    };

    // ── Step 1: start token ───────────────────────────────────────────────
    // Last context token starting at or before the answer.
    // None here is the "decrement to -1" case.
    let Some(start) = context()
        .take_while(|(_, off)| off.start <= answer.start_char)
        .map(|(i, _)| i)
        .last()
    else {
        return Ok(SpanLabel::NOT_CONTAINED);
    };

    // ── Step 2: end token ─────────────────────────────────────────────────
    // Last token from `start` onwards ending at or before the answer.
    // If the start token already ends past it, the answer sits
    // inside that one token.
    let end = context()
        .skip_while(|(i, _)| *i < start)
        .take_while(|(_, off)| off.end <= answer.end_char)
        .map(|(i, _)| i)
        .last()
        .unwrap_or(start);

    // ── Step 3: containment ───────────────────────────────────────────────
    // The window must reach the end of the answer.
    let window_end = context().map(|(_, off)| off.end).max().unwrap_or(0);
    if window_end < answer.end_char {
        return Ok(SpanLabel::NOT_CONTAINED);
    }

    Ok(SpanLabel::new(start, end))
}
