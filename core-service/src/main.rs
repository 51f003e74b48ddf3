//! AFEWS - command line entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use afews_core::api::commands;
use afews_core::constants::{self, APP_NAME, APP_VERSION, DEFAULT_CORPUS_FILE};
use afews_core::logic::dataset::{self, csv_io};
use afews_core::logic::engine;
use afews_core::{EngineConfig, ScoringEngine};

#[derive(Parser)]
#[command(name = "afews", about = "Authentication failure early-warning scoring", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a labeled corpus and write it as CSV.
    Generate {
        /// Number of records.
        #[arg(long, default_value_t = constants::get_corpus_size())]
        records: usize,
        /// Generator seed.
        #[arg(long, default_value_t = constants::get_seed())]
        seed: u64,
        /// Output file (defaults to the local data directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fit the engine and print the training report.
    Train {
        #[command(flatten)]
        engine: EngineArgs,
        /// Print the full status as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fit the engine, then score one record.
    Score {
        #[command(flatten)]
        engine: EngineArgs,
        #[arg(long, allow_negative_numbers = true)]
        age: i64,
        #[arg(long, allow_negative_numbers = true)]
        bio_years: i64,
        #[arg(long, allow_negative_numbers = true)]
        mobile_years: i64,
        #[arg(long, allow_negative_numbers = true)]
        scanner_quality: i64,
        /// Fingerprint, Iris or OTP (anything else uses the fallback code).
        #[arg(long)]
        device_type: String,
        #[arg(long, allow_negative_numbers = true)]
        auth_count: i64,
        #[arg(long, allow_negative_numbers = true)]
        recent_failures: i64,
    },
}

/// Overrides on top of the `AFEWS_*` environment
#[derive(Args)]
struct EngineArgs {
    /// Train from this corpus CSV instead of synthesizing one.
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Synthetic corpus size.
    #[arg(long)]
    records: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Number of trees.
    #[arg(long)]
    trees: Option<usize>,
}

impl EngineArgs {
    fn into_config(self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if let Some(records) = self.records {
            config = config.with_synthetic(records);
        }
        if let Some(path) = self.corpus {
            config = config.with_corpus_file(path);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(trees) = self.trees {
            config = config.with_trees(trees);
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("{} v{}", APP_NAME, APP_VERSION);

    match cli.command {
        Commands::Generate { records, seed, out } => cmd_generate(records, seed, out),
        Commands::Train { engine, json } => cmd_train(engine.into_config(), json),
        Commands::Score {
            engine: engine_args,
            age,
            bio_years,
            mobile_years,
            scanner_quality,
            device_type,
            auth_count,
            recent_failures,
        } => {
            engine::init(&engine_args.into_config()).context("failed to initialize scoring engine")?;
            let output = commands::score_record(
                age,
                bio_years,
                mobile_years,
                scanner_quality,
                &device_type,
                auth_count,
                recent_failures,
            )?;
            println!("Status: {}", output.status);
            println!("Score:  {}", output.score_display);
            println!("Advice: {}", output.advice);
            Ok(())
        }
    }
}

fn cmd_generate(records: usize, seed: u64, out: Option<PathBuf>) -> Result<()> {
    let path = out.unwrap_or_else(|| constants::get_dataset_dir().join(DEFAULT_CORPUS_FILE));
    let corpus = dataset::build_corpus(records, seed);
    csv_io::save_corpus(&path, &corpus)
        .with_context(|| format!("failed to write corpus to {}", path.display()))?;

    let positives = corpus.iter().filter(|l| l.at_risk).count();
    println!("Wrote {} records ({} at risk) to {}", corpus.len(), positives, path.display());
    println!("Digest: {}", dataset::corpus_digest(&corpus));
    Ok(())
}

fn cmd_train(config: EngineConfig, json: bool) -> Result<()> {
    let engine = ScoringEngine::fit(&config).context("failed to fit scoring engine")?;
    let status = engine.status();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let model = &status.model;
    println!("Model:             {} ({} trees, seed {})", model.model_type, model.n_trees, model.seed);
    println!("Records:           {}", model.trained_on_records);
    println!("Positive rate:     {:.3}", model.positive_rate);
    println!("Training accuracy: {:.4}", model.training_accuracy);
    match model.oob_accuracy {
        Some(oob) => println!("OOB accuracy:      {:.4}", oob),
        None => println!("OOB accuracy:      n/a"),
    }
    println!("Devices:           {}", status.device_categories.join(", "));
    println!("Corpus digest:     {}", model.corpus_digest);
    println!("Feature importances:");
    for fi in &model.feature_importances {
        println!("  {:<16} {:.4}", fi.feature, fi.importance);
    }
    Ok(())
}
