// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and all their configurable flags:
//
//   download    fetch SQuAD into data/raw
//   preprocess  build BERT / GPT / LSTM inputs
//   benchmark   record, score or report results
//   analyze     sentiment + speech parameters for some text
//   serve       the same over HTTP
//   run         download → preprocess → benchmark
//
// Every path and numeric knob has a default, so each command
// runs with no flags at all.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::{
    pipeline_use_case::Stages,
    preprocess_use_case::PreprocessConfig,
};
use crate::data::dataset::Scheme;
use crate::domain::traits::Split;
use crate::infra::{benchmark::DEFAULT_RESULTS_PATH, hub::SQUAD_DATASET_ID};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download SQuAD and save both splits as JSON lines
    Download(DownloadArgs),

    /// Tokenize and label SQuAD for one or more model families
    Preprocess(PreprocessArgs),

    /// Manage benchmark results
    #[command(subcommand)]
    Benchmark(BenchmarkCommand),

    /// Print sentiment and speech parameters for a piece of text
    Analyze(AnalyzeArgs),

    /// Serve sentiment analysis over HTTP
    Serve(ServeArgs),

    /// Run the full pipeline (all stages when none is selected)
    Run(RunArgs),
}

// ─── download ─────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Where squad_train.json / squad_validation.json are written
    #[arg(long, default_value = "data/raw")]
    pub raw_dir: String,

    /// Hugging Face dataset repo
    #[arg(long, default_value = SQUAD_DATASET_ID)]
    pub dataset_id: String,
}

// ─── preprocess ───────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Scheme(s) to build; repeat the flag for several. Default: all
    #[arg(long = "scheme", value_enum)]
    pub schemes: Vec<Scheme>,

    #[command(flatten)]
    pub settings: PreprocessSettings,
}

impl PreprocessArgs {
    pub fn schemes(&self) -> Vec<Scheme> {
        if self.schemes.is_empty() {
            Scheme::ALL.to_vec()
        } else {
            self.schemes.clone()
        }
    }
}

/// Shared by `preprocess` and `run`
#[derive(Args, Debug, Clone)]
pub struct PreprocessSettings {
    /// Raw JSON-lines input (downloaded when missing)
    #[arg(long, default_value = "data/raw")]
    pub raw_dir: String,

    /// Root of the processed output; one subdirectory per scheme
    #[arg(long, default_value = "data/processed")]
    pub output_dir: String,

    /// Cache for pretrained tokenizer.json files
    #[arg(long, default_value = "data/tokenizers")]
    pub tokenizer_dir: String,

    /// Hugging Face dataset repo used when raw files are missing
    #[arg(long, default_value = SQUAD_DATASET_ID)]
    pub dataset_id: String,

    /// Tokenizer repo for the BERT scheme
    #[arg(long, default_value = "bert-base-uncased")]
    pub bert_tokenizer: String,

    /// Tokenizer repo for the GPT scheme
    #[arg(long, default_value = "gpt2")]
    pub gpt_tokenizer: String,

    /// Tokens per BERT window: [CLS] question [SEP] context [SEP] + padding
    #[arg(long, default_value_t = 384)]
    pub max_length: usize,

    /// Context tokens shared by consecutive windows
    #[arg(long, default_value_t = 128)]
    pub stride: usize,

    /// Tokens per GPT prompt
    #[arg(long, default_value_t = 512)]
    pub gpt_max_length: usize,

    /// Examples processed per batch
    #[arg(long, default_value_t = 1000)]
    pub batch_size: usize,
}

/// The application layer never sees clap types
impl From<PreprocessSettings> for PreprocessConfig {
    fn from(s: PreprocessSettings) -> Self {
        PreprocessConfig {
            raw_dir:        s.raw_dir,
            output_dir:     s.output_dir,
            tokenizer_dir:  s.tokenizer_dir,
            dataset_id:     s.dataset_id,
            bert_tokenizer: s.bert_tokenizer,
            gpt_tokenizer:  s.gpt_tokenizer,
            max_length:     s.max_length,
            stride:         s.stride,
            gpt_max_length: s.gpt_max_length,
            batch_size:     s.batch_size,
        }
    }
}

// ─── benchmark ────────────────────────────────────────────────────────────────
#[derive(Subcommand, Debug)]
pub enum BenchmarkCommand {
    /// Add metrics for a model on a dataset
    Record(RecordArgs),

    /// Compute SQuAD exact match / F1 from a predictions file and record them
    Score(ScoreArgs),

    /// Average a metric per model across datasets
    Report(ReportArgs),
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[arg(long)]
    pub model: String,

    #[arg(long, default_value = "SQuAD")]
    pub dataset: String,

    /// name=value, e.g. f1=88.7; repeat for several
    #[arg(long = "metric", required = true)]
    pub metrics: Vec<String>,

    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    pub results: PathBuf,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[arg(long)]
    pub model: String,

    #[arg(long, default_value = "SQuAD")]
    pub dataset: String,

    /// JSON object mapping question id → predicted answer
    #[arg(long)]
    pub predictions: PathBuf,

    #[arg(long, default_value = "data/raw")]
    pub raw_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Split::Validation)]
    pub split: Split,

    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    pub results: PathBuf,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[arg(long, default_value = "f1")]
    pub metric: String,

    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    pub results: PathBuf,
}

// ─── analyze / serve ──────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Text to analyze; paragraphs are separated by newlines
    #[arg(long)]
    pub text: String,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

// ─── run ──────────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run every stage (same as selecting none)
    #[arg(long)]
    pub all: bool,

    #[arg(long)]
    pub download: bool,

    #[arg(long)]
    pub preprocess: bool,

    #[arg(long)]
    pub benchmark: bool,

    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    pub results: PathBuf,

    #[command(flatten)]
    pub settings: PreprocessSettings,
}

impl RunArgs {
    pub fn stages(&self) -> Stages {
        if self.all {
            return Stages::ALL;
        }
        Stages {
            download:   self.download,
            preprocess: self.preprocess,
            benchmark:  self.benchmark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Cli;
    use super::*;
    use clap::Parser;

    #[test]
    fn test_preprocess_defaults_match_config() {
        let cli = Cli::try_parse_from(["nlp-bench", "preprocess"]).unwrap();
        let Commands::Preprocess(args) = cli.command else {
            panic!("expected preprocess");
        };
        assert_eq!(args.schemes(), Scheme::ALL.to_vec());
        assert_eq!(PreprocessConfig::from(args.settings), PreprocessConfig::default());
    }

    #[test]
    fn test_repeated_scheme_flag() {
        let cli = Cli::try_parse_from(["nlp-bench", "preprocess", "--scheme", "lstm", "--scheme", "bert"])
            .unwrap();
        let Commands::Preprocess(args) = cli.command else {
            panic!("expected preprocess");
        };
        assert_eq!(args.schemes(), vec![Scheme::Lstm, Scheme::Bert]);
    }

    #[test]
    fn test_run_stage_flags() {
        let cli = Cli::try_parse_from(["nlp-bench", "run", "--download"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(
            args.stages(),
            Stages { download: true, preprocess: false, benchmark: false }
        );

        let cli = Cli::try_parse_from(["nlp-bench", "run", "--all", "--download"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.stages(), Stages::ALL);
    }

    #[test]
    fn test_benchmark_record_requires_metric() {
        assert!(Cli::try_parse_from(["nlp-bench", "benchmark", "record", "--model", "m"]).is_err());
        assert!(Cli::try_parse_from([
            "nlp-bench", "benchmark", "record", "--model", "m", "--metric", "f1=1"
        ])
        .is_ok());
    }

    #[test]
    fn test_serve_address() {
        let cli = Cli::try_parse_from(["nlp-bench", "serve", "--bind", "127.0.0.1", "--port", "9000"])
            .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.address(), "127.0.0.1:9000");
    }
}
