use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;
use tokenbin::TokenTable;
use tracing::*;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

mod documents;
mod report;

use documents::Document;
use report::{Report, ReportOrder};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: Globals,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Globals {
    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the tokens in some files, treating each file as one document
    Count {
        /// Rank tokens by `frequency` or by number of `documents`
        #[arg(long, default_value_t = ReportOrder::Frequency)]
        by: ReportOrder,

        /// How many of the top tokens to print
        #[arg(long, env = "TOKBIN_TOP", default_value_t = 20)]
        top: usize,

        /// Print the report as JSON instead of a text table
        #[arg(long)]
        json: bool,

        /// Fold documents into a single table in place, instead of building a table per document
        /// and merging them
        #[arg(long)]
        incremental: bool,

        /// Maximum number of files to read at the same time
        #[arg(long, env = "TOKBIN_CONCURRENCY", default_value = "4")]
        concurrency: NonZeroUsize,

        /// Files to read.  Directories are searched recursively.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Time building and folding tables, using some files as sample documents
    Perf {
        /// How many documents to fold.  The sample files are repeated to make up this many.
        #[arg(long, env = "TOKBIN_DOCUMENTS", default_value_t = 10_000)]
        documents: usize,

        /// Maximum number of files to read at the same time
        #[arg(long, env = "TOKBIN_CONCURRENCY", default_value = "4")]
        concurrency: NonZeroUsize,

        /// Files to use as sample documents.  Directories are searched recursively.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

impl Commands {
    async fn execute(self, _globals: &Globals) -> Result<()> {
        use Commands::*;
        match self {
            Count {
                by,
                top,
                json,
                incremental,
                concurrency,
                paths,
            } => {
                let paths = documents::expand_paths(&paths)?;
                info!(files = paths.len(), "Counting tokens");

                let documents = documents::read_documents(paths, concurrency).await?;
                let table = if incremental {
                    fold_in_place(&documents)?
                } else {
                    fold_by_merging(&documents)?
                };

                let report = Report::new(&table, by, top);
                let stdout = std::io::stdout().lock();
                if json {
                    report.write_json(stdout)?;
                } else {
                    report.write_text(stdout)?;
                }
            }
            Perf {
                documents,
                concurrency,
                paths,
            } => {
                perf(documents, concurrency, paths).await?;
            }
        }

        Ok(())
    }
}

/// Build one table per document and merge them all
fn fold_by_merging(documents: &[Document]) -> Result<TokenTable> {
    let table = TokenTable::merge_all(
        documents
            .iter()
            .map(|document| TokenTable::build(&document.tokens)),
    )?;

    Ok(table)
}

/// Fold every document into one table with `add_tokens`
fn fold_in_place(documents: &[Document]) -> Result<TokenTable> {
    let mut table = TokenTable::default();
    for document in documents {
        table.add_tokens(&document.tokens)?;
    }
    table.sort_entries();

    Ok(table)
}

/// Load some sample documents, repeat them to make up `count` documents, and time the different
/// ways of folding them into a single table.
async fn perf(count: usize, concurrency: NonZeroUsize, paths: Vec<PathBuf>) -> Result<()> {
    println!("Loading and tokenizing some documents");
    let start = Instant::now();

    let paths = documents::expand_paths(&paths)?;
    let samples = documents::read_documents(paths, concurrency).await?;
    if samples.is_empty() {
        bail!("No sample documents found");
    }

    let documents = samples
        .iter()
        .cycle()
        .take(count)
        .map(|document| document.tokens.as_slice())
        .collect::<Vec<_>>();

    println!(
        "Loaded {} documents in {:?}. (This is not what we are optimizing)",
        documents.len(),
        start.elapsed()
    );

    println!("Creating {} tables...", documents.len());
    let start = Instant::now();
    let tables = documents
        .iter()
        .map(|&tokens| TokenTable::build(tokens))
        .collect::<Vec<_>>();
    println!("Created {} tables in {:?}", tables.len(), start.elapsed());

    println!("Concatenating {} times", tables.len());
    let start = Instant::now();
    let concatenated = TokenTable::merge_all(&tables)?;
    println!(
        "Concatenated {} times in {:?}. {} distinct tokens.",
        tables.len(),
        start.elapsed(),
        concatenated.len()
    );
    drop(tables);

    println!("Now, \"streaming\" one document at a time, dropping tables as we create them...");
    let start = Instant::now();
    let streamed = TokenTable::merge_all(documents.iter().map(|&tokens| TokenTable::build(tokens)))?;
    println!(
        "Created and concatenated {} tables in {:?}. {} distinct tokens.",
        documents.len(),
        start.elapsed(),
        streamed.len()
    );

    println!("Now, folding every document into one table in place...");
    let start = Instant::now();
    let mut folded = TokenTable::default();
    for &tokens in &documents {
        folded.add_tokens(tokens)?;
    }
    folded.sort_entries();
    println!(
        "Added {} documents in {:?}. {} distinct tokens.",
        documents.len(),
        start.elapsed(),
        folded.len()
    );

    if concatenated != streamed || concatenated != folded {
        bail!("BUG: folding strategies produced different tables");
    }
    debug!(
        documents = concatenated.total_documents(),
        tokens = concatenated.total_tokens(),
        "All folding strategies agree"
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let default_log_directive = match cli.globals.debug {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Log events are JSON on stderr, so they never mix with the report on stdout
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_log_directive.into())
                .from_env_lossy(),
        )
        .json()
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    if let Err(e) = cli.command.execute(&cli.globals).await {
        error!("{:#}", e);
        exit(1);
    } else {
        debug!("command executed successfully");
    }
}
