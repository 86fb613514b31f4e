// src/main.rs
mod utils;
mod wiki;
mod extractors;
mod storage;
mod runner;

use std::sync::Arc;

use clap::Parser;
use utils::AppError;
use extractors::DocumentExtractor;
use runner::RunOptions;
use storage::StorageManager;
use wiki::SiteConfig;

/// Command Line Interface for the wiki article extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Archived article pages to extract (file paths)
    #[arg(required = true)]
    files: Vec<String>,

    /// Output directory for extracted JSON records
    #[arg(short, long, default_value = "data")]
    output_dir: String,

    /// Number of documents processed in parallel
    #[arg(short, long, default_value_t = 4)]
    jobs: usize,

    /// Stop scheduling new documents after the first fatal extraction error
    #[arg(long)]
    fail_fast: bool,

    /// Debug mode - save annotated HTML for pages with unexpected markup
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting processing for args: {:?}", args);

    if args.jobs == 0 {
        return Err(AppError::Config("--jobs must be at least 1".to_string()));
    }

    // 3. Initialize storage and extractor
    let storage = Arc::new(StorageManager::new(&args.output_dir)?);
    let extractor = Arc::new(DocumentExtractor::new(SiteConfig::default()));

    let options = RunOptions {
        jobs: args.jobs,
        fail_fast: args.fail_fast,
        debug: args.debug,
    };

    // 4. Process each source
    tracing::info!("Processing {} sources with {} workers", args.files.len(), options.jobs);
    let summary = runner::run_all(args.files, extractor, storage, &options).await?;

    tracing::info!(
        "Processing finished. Written: {}, Skipped: {}, Failures: {}",
        summary.written, summary.rejected, summary.failed
    );

    if summary.failed > 0 {
        return Err(AppError::Processing(format!("{} documents failed to extract", summary.failed)));
    }

    Ok(())
}
