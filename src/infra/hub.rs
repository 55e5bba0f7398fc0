//! Fetch SQuAD v1.1 (`rajpurkar/squad`) from the Hugging Face hub.
//!
//! The dataset repo ships one parquet file per split under `plain_text/`.
//! hf-hub keeps its own download cache, so repeated calls do not re-download.

use anyhow::{anyhow, bail, Context, Result};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::{Field, Row};
use std::fs::File;

use crate::domain::example::{Answers, SquadExample};
use crate::domain::traits::{ExampleSource, Split};

pub const SQUAD_DATASET_ID: &str = "rajpurkar/squad";

fn parquet_file(split: Split) -> String {
    format!("plain_text/{split}-00000-of-00001.parquet")
}

pub struct SquadHub {
    dataset_id: String,
}

impl SquadHub {
    pub fn new(dataset_id: impl Into<String>) -> Self {
        Self { dataset_id: dataset_id.into() }
    }
}

impl Default for SquadHub {
    fn default() -> Self {
        Self::new(SQUAD_DATASET_ID)
    }
}

impl ExampleSource for SquadHub {
    fn load_split(&self, split: Split) -> Result<Vec<SquadExample>> {
        let api = hf_hub::api::sync::Api::new().context("hf-hub API")?;
        let rfilename = parquet_file(split);

        tracing::info!("Fetching '{}' {} split ({})", self.dataset_id, split, rfilename);
        let local = api
            .dataset(self.dataset_id.clone())
            .get(&rfilename)
            .map_err(|e| anyhow!("hub get '{}': {}", rfilename, e))?;

        let file = File::open(&local).context("open parquet file")?;
        let reader = SerializedFileReader::new(file).context("parquet reader")?;
        let rows = reader
            .get_row_iter(None)
            .map_err(|e| anyhow!("parquet row iter: {}", e))?;

        let mut examples = Vec::new();
        for row in rows {
            let row = row.map_err(|e| anyhow!("parquet row: {}", e))?;
            examples.push(example_from_row(&row)?);
        }

        if examples.is_empty() {
            bail!("'{}' {} split has no rows", self.dataset_id, split);
        }
        Ok(examples)
    }
}

// ─── Row decoding ─────────────────────────────────────────────────────────────
// Schema: id, title, context, question: string
//         answers: struct<text: list<string>, answer_start: list<int32>>

fn example_from_row(row: &Row) -> Result<SquadExample> {
    let mut ex = SquadExample::new("", "", "", Answers::default());

    for (name, field) in row.get_column_iter() {
        match (name.as_str(), field) {
            ("id", Field::Str(s))       => ex.id = s.clone(),
            ("title", Field::Str(s))    => ex.title = s.clone(),
            ("context", Field::Str(s))  => ex.context = s.clone(),
            ("question", Field::Str(s)) => ex.question = s.clone(),
            ("answers", Field::Group(answers)) => ex.answers = answers_from_group(answers)?,
            _ => {}
        }
    }

    Ok(ex)
}

fn answers_from_group(group: &Row) -> Result<Answers> {
    let mut answers = Answers::default();

    for (name, field) in group.get_column_iter() {
        let Field::ListInternal(list) = field else { continue };
        match name.as_str() {
            "text" => {
                answers.text = list
                    .elements()
                    .iter()
                    .map(|f| match f {
                        Field::Str(s) => Ok(s.clone()),
                        other => Err(anyhow!("answers.text: unexpected value {other:?}")),
                    })
                    .collect::<Result<_>>()?;
            }
            "answer_start" => {
                answers.answer_start = list
                    .elements()
                    .iter()
                    .map(|f| match f {
                        Field::Int(v)  => Ok(i64::from(*v)),
                        Field::Long(v) => Ok(*v),
                        other => Err(anyhow!("answers.answer_start: unexpected value {other:?}")),
                    })
                    .collect::<Result<_>>()?;
            }
            _ => {}
        }
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parquet_file_names() {
        assert_eq!(parquet_file(Split::Train), "plain_text/train-00000-of-00001.parquet");
        assert_eq!(
            parquet_file(Split::Validation),
            "plain_text/validation-00000-of-00001.parquet"
        );
    }
}
