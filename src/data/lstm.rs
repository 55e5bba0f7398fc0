// ============================================================
// Layer 4 — LSTM Records
// ============================================================
// The LSTM baseline builds its own vocabulary later, so this
// step only flattens each example into four columns. Text is
// passed through untouched.

use crate::data::dataset::LstmRecord;
use crate::domain::example::SquadExample;

impl LstmRecord {
    pub fn from_example(example: &SquadExample) -> Self {
        Self {
            context:      example.context.clone(),
            question:     example.question.clone(),
            answer_text:  example.answers.first_text().unwrap_or_default().to_string(),
            answer_start: example.answers.first_start().unwrap_or(-1),
        }
    }
}

pub fn build_lstm_records(examples: &[SquadExample]) -> Vec<LstmRecord> {
    examples.iter().map(LstmRecord::from_example).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Answers;

    #[test]
    fn test_record_takes_first_answer() {
        let ex = SquadExample::new(
            "l1",
            " raw context ",
            " raw question? ",
            Answers { text: vec!["context".into(), "raw".into()], answer_start: vec![5, 1] },
        );
        let r = LstmRecord::from_example(&ex);
        assert_eq!(r.context, " raw context ");
        assert_eq!(r.question, " raw question? ");
        assert_eq!(r.answer_text, "context");
        assert_eq!(r.answer_start, 5);
    }

    #[test]
    fn test_missing_answer_uses_placeholders() {
        let ex = SquadExample::new("l2", "c", "q", Answers::default());
        let records = build_lstm_records(&[ex]);
        assert_eq!(records[0].answer_text, "");
        assert_eq!(records[0].answer_start, -1);
    }
}
