//! Application entry point: lexicon builder CLI.
//!
//! # Commands
//!
//! * `extract <corpus-dir>`: corpus files → deduplicated word list.
//! * `enrich`: word list → phonetic + morphology records (JSON).
//! * `tag`: enrichment result → result with layman categories (JSON).
//!
//! # Startup sequence
//!
//! 1. Initialise logging (`RUST_LOG`, default `info`).
//! 2. Load [`AppConfig`] from `--config` or the platform `settings.toml`.
//! 3. Apply command-line / environment overrides.
//! 4. Run the command; `enrich` gets a multi-thread tokio runtime.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lexicon_builder::{
    config::AppConfig,
    corpus::{write_word_list, CorpusExtractor},
    lexicon::{ResultSink, WordSource},
    morphology::ApiFetcher,
    phonetic::MalayalamTranscriber,
    pipeline::{PipelineOrchestrator, RunSummary, WordRecord},
    tagging::tag_records,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "lexicon-builder",
    version,
    about = "Builds a lexicon enriched with phonetics and morphology"
)]
struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a deduplicated word list from a directory of corpus files.
    Extract {
        /// Directory walked recursively for corpus files.
        corpus_dir: PathBuf,

        /// Word list to write (defaults to the configured source path).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Enrich a word list with phonetic and morphological analyses.
    Enrich {
        /// Word list, one word per line.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Result file to write.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of words read from the input.
        #[arg(long, env = "LEXICON_WORD_LIMIT")]
        limit: Option<usize>,

        /// Maximum concurrent analysis requests.
        #[arg(long, env = "LEXICON_CONCURRENCY")]
        concurrency: Option<usize>,

        /// Base URL of the morphology analysis service.
        #[arg(long, env = "LEXICON_MORPH_URL")]
        base_url: Option<String>,
    },

    /// Attach layman grammatical categories to an enrichment result.
    Tag {
        /// Enrichment result to read.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Tagged result to write.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn extract(config: &AppConfig, corpus_dir: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.source.path.clone());

    let mut extractor = CorpusExtractor::new();
    extractor
        .add_dir(&corpus_dir)
        .with_context(|| format!("corpus extraction from {} failed", corpus_dir.display()))?;

    let words = extractor.into_words();
    write_word_list(&output, &words)?;

    println!(
        "Extracted {} unique words to {}",
        words.len(),
        output.display()
    );
    Ok(())
}

fn enrich(config: &AppConfig) -> Result<()> {
    let words = WordSource::from_path(&config.source.path, config.source.word_limit)?;
    let word_count = words.len();

    let orchestrator = PipelineOrchestrator::new(
        Arc::new(MalayalamTranscriber::new()),
        Arc::new(ApiFetcher::from_config(&config.morphology)),
        config.morphology.concurrency,
    );

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    log::info!(
        "Enriching {word_count} words from {} via {}",
        config.source.path.display(),
        config.morphology.base_url
    );

    let records = rt
        .block_on(orchestrator.run(words))
        .context("enrichment aborted, no output written")?;

    let sink = ResultSink::new(&config.output.path);
    sink.write(&records)
        .context("could not persist enrichment results")?;

    println!(
        "Processed {} → {}",
        RunSummary::from_records(&records),
        sink.path().display()
    );
    Ok(())
}

fn tag(config: &AppConfig, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let input = ResultSink::new(input.unwrap_or_else(|| config.output.path.clone()));
    let output = ResultSink::new(output.unwrap_or_else(|| config.output.tagged_path.clone()));

    let records: Vec<WordRecord> = input.read()?;
    let tagged = tag_records(records);
    output
        .write(&tagged)
        .context("could not persist tagged results")?;

    println!(
        "Tagged {} entries → {}",
        tagged.len(),
        output.path().display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // 2. Configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("cannot load settings from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };

    // 3./4. Overrides + dispatch
    match cli.command {
        Command::Extract { corpus_dir, output } => extract(&config, corpus_dir, output),
        Command::Enrich {
            input,
            output,
            limit,
            concurrency,
            base_url,
        } => {
            if let Some(input) = input {
                config.source.path = input;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            if let Some(limit) = limit {
                config.source.word_limit = limit;
            }
            if let Some(concurrency) = concurrency {
                config.morphology.concurrency = concurrency;
            }
            if let Some(base_url) = base_url {
                config.morphology.base_url = base_url;
            }
            enrich(&config)
        }
        Command::Tag { input, output } => tag(&config, input, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_enrich_overrides() {
        let cli = Cli::try_parse_from([
            "lexicon-builder",
            "enrich",
            "--input",
            "words.txt",
            "--concurrency",
            "4",
            "--limit",
            "100",
        ])
        .unwrap();

        match cli.command {
            Command::Enrich {
                input,
                concurrency,
                limit,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("words.txt")));
                assert_eq!(concurrency, Some(4));
                assert_eq!(limit, Some(100));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn extract_requires_corpus_dir() {
        assert!(Cli::try_parse_from(["lexicon-builder", "extract"]).is_err());
    }
}
