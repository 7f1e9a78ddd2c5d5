use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use lyric_match::artifact::ARTIFACT_FORMAT_VERSION;
use lyric_match::config::{self, Config, DEFAULT_CONFIG_FILE};
use lyric_match::dataset::{self, LyricRecord};
use lyric_match::{CorpusBuilder, LookupService, TrainedArtifact};

#[derive(Debug, Parser)]
#[command(name = "lyric-match", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ./lyric-match.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Build the lyric index from a CSV dataset
    ///
    /// The dataset needs a header row; lyrics, song name and artist columns
    /// are detected by name. Songs whose lyrics are empty after
    /// normalization are skipped.
    Train {
        /// Dataset CSV (overrides dataset_path)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Output artifact (overrides artifact_path)
        #[arg(long)]
        artifact: Option<PathBuf>,
        /// Train on the built-in sample songs instead of a dataset
        #[arg(long, conflicts_with = "dataset")]
        sample: bool,
        /// Write the sample songs to the dataset path when no file exists there
        #[arg(long)]
        sample_if_missing: bool,
    },
    /// Identify the song a lyric snippet comes from
    Predict {
        /// Lyric snippet
        lyrics: String,
        /// Artifact to query (overrides artifact_path)
        #[arg(long)]
        artifact: Option<PathBuf>,
        /// Print the K best matches instead of one
        #[arg(long, value_name = "K")]
        top: Option<usize>,
    },
    /// Show what a trained artifact contains
    Inspect {
        /// Artifact to inspect (overrides artifact_path)
        #[arg(long)]
        artifact: Option<PathBuf>,
    },
    /// Write an example config file
    InitConfig {
        /// Destination (default: ./lyric-match.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    model_loaded: bool,
    songs_available: usize,
    vocabulary_size: usize,
    format_version: u32,
    supported_format_version: u32,
    ruleset: &'a str,
    engine: &'a str,
}

fn main() -> Result<()> {
    // stdout carries JSON only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig { path } => init_config(path),
        command => {
            let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
            run(command, &config)
        }
    }
}

fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Train {
            dataset,
            artifact,
            sample,
            sample_if_missing,
        } => {
            let dataset_path = dataset.unwrap_or_else(|| config.dataset_path.clone());
            let artifact_path = artifact.unwrap_or_else(|| config.artifact_path.clone());
            let records = load_records(&dataset_path, sample, sample_if_missing)?;

            let builder: CorpusBuilder = CorpusBuilder::new(config.vectorizer);
            let (trained, report) = builder.build(&records).context("Failed to build the lyric index")?;
            trained
                .save(&artifact_path)
                .with_context(|| format!("Failed to save artifact to {}", artifact_path.display()))?;
            print_json(&report)
        }
        Commands::Predict { lyrics, artifact, top } => {
            let artifact_path = artifact.unwrap_or_else(|| config.artifact_path.clone());
            let service = LookupService::from_load(TrainedArtifact::load(&artifact_path));
            match top {
                Some(k) => print_json(&service.predict_top_k(&lyrics, k)?),
                None => print_json(&service.predict(&lyrics)?),
            }
        }
        Commands::Inspect { artifact } => {
            let artifact_path = artifact.unwrap_or_else(|| config.artifact_path.clone());
            let trained = TrainedArtifact::load(&artifact_path)
                .map(Arc::new)
                .with_context(|| format!("Failed to load artifact from {}", artifact_path.display()))?;
            let health = LookupService::new(Arc::clone(&trained)).health();
            print_json(&InspectReport {
                model_loaded: health.model_loaded,
                songs_available: health.songs_available,
                vocabulary_size: trained.vocabulary().dim(),
                format_version: trained.format_version(),
                supported_format_version: ARTIFACT_FORMAT_VERSION,
                ruleset: trained.ruleset(),
                engine: trained.engine(),
            })
        }
        Commands::InitConfig { path } => init_config(path),
    }
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if config::write_example_config(&path).context("Failed to write config file")? {
        println!("Wrote example config to {}", path.display());
    } else {
        println!("Config file already exists at {}", path.display());
    }
    Ok(())
}

fn load_records(dataset_path: &Path, sample: bool, sample_if_missing: bool) -> Result<Vec<LyricRecord>> {
    if sample {
        info!("training on built-in sample songs");
        return Ok(dataset::sample_records());
    }
    let records = if sample_if_missing {
        dataset::read_csv_or_create_sample(dataset_path)
    } else {
        dataset::read_csv(dataset_path)
    };
    records
        .with_context(|| format!("Failed to read dataset {}", dataset_path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON")?;
    writeln!(stdout)?;
    Ok(())
}
