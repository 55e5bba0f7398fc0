// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. clap parses the command
// line; every command is routed to a Layer 2 use case. Printing
// results happens here and nowhere else.

pub mod commands;

// HTTP front end for `serve`
pub mod server;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{
    AnalyzeArgs, BenchmarkCommand, Commands, DownloadArgs, PreprocessArgs, RunArgs, ServeArgs,
};

use crate::application::analyze_use_case::SentimentAnalyzer;
use crate::infra::lexicon::VaderLexicon;

#[derive(Parser, Debug)]
#[command(
    name = "nlp-bench",
    version,
    about = "Prepare SQuAD for BERT / GPT / LSTM, track benchmark results, and analyze sentiment for speech."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the matching use case; nothing is computed here
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Download(args)   => run_download(args),
            Commands::Preprocess(args) => run_preprocess(args),
            Commands::Benchmark(cmd)   => run_benchmark(cmd),
            Commands::Analyze(args)    => run_analyze(args),
            Commands::Serve(args)      => run_serve(args),
            Commands::Run(args)        => run_pipeline(args),
        }
    }
}

fn run_download(args: DownloadArgs) -> Result<()> {
    use crate::application::download_use_case::DownloadUseCase;
    use crate::infra::hub::SquadHub;

    let sizes = DownloadUseCase::new(SquadHub::new(args.dataset_id), &args.raw_dir).execute()?;
    for (split, n) in sizes {
        println!("{split}: {n} examples");
    }
    Ok(())
}

fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let schemes = args.schemes();
    let reports = PreprocessUseCase::new(args.settings.into()).execute(&schemes)?;
    for r in reports {
        println!(
            "{:<5} {:<10} {:>7} examples → {:>7} rows  {}",
            r.scheme,
            r.split,
            r.examples,
            r.rows,
            r.path.display()
        );
    }
    Ok(())
}

fn run_benchmark(cmd: BenchmarkCommand) -> Result<()> {
    use crate::application::benchmark_use_case::{parse_metrics, BenchmarkUseCase};

    match cmd {
        BenchmarkCommand::Record(a) => {
            let metrics = parse_metrics(&a.metrics)?;
            BenchmarkUseCase::open(&a.results)?.record(&a.model, &a.dataset, metrics)?;
            println!("Recorded {} on {}", a.model, a.dataset);
        }
        BenchmarkCommand::Score(a) => {
            let mut uc = BenchmarkUseCase::open(&a.results)?;
            let s = uc.score(&a.model, &a.dataset, &a.predictions, &a.raw_dir, a.split)?;
            println!("exact_match: {:.2}", s.exact_match);
            println!("f1:          {:.2}", s.f1);
            if s.missing > 0 {
                println!("({} of {} questions had no prediction)", s.missing, s.scored + s.missing);
            }
        }
        BenchmarkCommand::Report(a) => {
            let uc = BenchmarkUseCase::open(&a.results)?;
            let averages = uc.report(&a.metric);
            if averages.is_empty() {
                let models: Vec<&str> = uc.framework().models().collect();
                println!("No results report '{}' (models on file: {:?})", a.metric, models);
            }
            for (model, value) in averages {
                println!("{model:<30} {value:.2}");
            }
        }
    }
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let analyzer = SentimentAnalyzer::new(VaderLexicon::load());
    let doc = analyzer.analyze_document(&args.text);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    // Lexicon is ready before the first connection is accepted
    let analyzer = SentimentAnalyzer::new(VaderLexicon::load());

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(server::run(&args.address(), analyzer))
}

fn run_pipeline(args: RunArgs) -> Result<()> {
    use crate::application::pipeline_use_case::PipelineUseCase;

    let stages = args.stages();
    PipelineUseCase::new(args.settings.into(), args.results).execute(stages)?;
    println!("Pipeline complete.");
    Ok(())
}
