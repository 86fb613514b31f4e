// src/runner.rs
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::extractors::DocumentExtractor;
use crate::storage::StorageManager;
use crate::utils::error::ExtractError;
use crate::utils::{html_debug, AppError};

/// Per-run settings taken from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub jobs: usize,
    pub fail_fast: bool,
    pub debug: bool,
}

/// What happened to one source identifier.
#[derive(Debug)]
pub enum Outcome {
    Written(PathBuf),
    Rejected,
    Failed(AppError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Extracts and stores a single document. Runs on a blocking worker.
pub fn process_source(
    file: &str,
    extractor: &DocumentExtractor,
    storage: &StorageManager,
    debug: bool,
) -> Outcome {
    let result = match extractor.extract_file(file) {
        Ok(result) => result,
        Err(e) => {
            if debug {
                save_failure_annotation(file, &e, extractor, storage);
            }
            return Outcome::Failed(e.into());
        }
    };

    match result {
        Some(document) => match storage.save_document(&document) {
            Ok(path) => Outcome::Written(path),
            Err(e) => Outcome::Failed(e.into()),
        },
        None => Outcome::Rejected,
    }
}

fn save_failure_annotation(file: &str, error: &ExtractError, extractor: &DocumentExtractor, storage: &StorageManager) {
    let Some(tag) = error.offending_tag() else { return };
    let Ok(html) = fs::read_to_string(file) else { return };

    let page_id = extractor.site().page_id(file);
    let path = storage
        .base_dir()
        .join("debug")
        .join(format!("{}.annotated.html", page_id));
    if let Err(e) = html_debug::annotate_unexpected_tag(&html, tag, &path) {
        tracing::warn!("Failed to create debug HTML: {}", e);
    }
}

/// Processes every source on Tokio's blocking pool, at most `jobs` at a time.
///
/// A new document is only scheduled once a worker slot is free, and the
/// finished task that freed it has been recorded first, so with
/// `fail_fast` nothing is scheduled after a recorded failure.
pub async fn run_all(
    files: Vec<String>,
    extractor: Arc<DocumentExtractor>,
    storage: Arc<StorageManager>,
    options: &RunOptions,
) -> Result<RunSummary, AppError> {
    let jobs = options.jobs.max(1);
    let mut tasks = JoinSet::new();
    let mut summary = RunSummary::default();
    let mut stop = false;

    for file in files {
        while let Some(joined) = tasks.try_join_next() {
            stop |= record(joined, &mut summary, options)?;
        }
        while !stop && tasks.len() >= jobs {
            if let Some(joined) = tasks.join_next().await {
                stop |= record(joined, &mut summary, options)?;
            }
        }
        if stop {
            tracing::warn!("Stopping after first failure; {} not processed", file);
            break;
        }

        let extractor = Arc::clone(&extractor);
        let storage = Arc::clone(&storage);
        let debug = options.debug;

        tasks.spawn_blocking(move || {
            let outcome = process_source(&file, &extractor, &storage, debug);
            (file, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        record(joined, &mut summary, options)?;
    }

    Ok(summary)
}

/// Logs one finished task. Returns true when processing should stop.
fn record(
    joined: Result<(String, Outcome), tokio::task::JoinError>,
    summary: &mut RunSummary,
    options: &RunOptions,
) -> Result<bool, AppError> {
    let (file, outcome) = joined.map_err(|e| AppError::Task(e.to_string()))?;
    match outcome {
        Outcome::Written(path) => {
            tracing::debug!("Wrote {} from {}", path.display(), file);
            summary.written += 1;
            Ok(false)
        }
        Outcome::Rejected => {
            tracing::info!("Skipped {}", file);
            summary.rejected += 1;
            Ok(false)
        }
        Outcome::Failed(e) => {
            tracing::error!("{}", e);
            summary.failed += 1;
            Ok(options.fail_fast)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::SiteConfig;

    const GOOD_PAGE: &str = r#"<html><head><title>Momo | Avatar Wiki | FANDOM powered by Wikia</title>
        <meta property="og:url" content="http://avatar.wikia.com/wiki/Momo"></head>
        <body><div id="WikiaArticle"><div id="mw-content-text"><p><a href="Appa">Appa</a>'s friend.</p></div></div></body></html>"#;

    const BAD_PAGE: &str = r#"<html><head><title>Bad</title>
        <meta property="og:url" content="http://avatar.wikia.com/wiki/Bad"></head>
        <body><div id="WikiaArticle"><div id="mw-content-text"><pre>x</pre></div></div></body></html>"#;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wiki_extract_run_{}_{}", name, std::process::id()));
        fs::create_dir_all(dir.join("avatar.wikia.com/wiki")).unwrap();
        dir
    }

    #[test]
    fn test_run_all_writes_skips_and_counts_failures() {
        let dir = fixture_dir("mixed");
        let good = dir.join("avatar.wikia.com/wiki/Momo.html");
        let bad = dir.join("avatar.wikia.com/wiki/Bad.html");
        fs::write(&good, GOOD_PAGE).unwrap();
        fs::write(&bad, BAD_PAGE).unwrap();

        let files = vec![
            good.display().to_string(),
            dir.join("avatar.wikia.com/wiki/Forum_Chat.html").display().to_string(),
            bad.display().to_string(),
            dir.join("avatar.wikia.com/wiki/Missing.html").display().to_string(),
        ];
        let extractor = Arc::new(DocumentExtractor::new(SiteConfig::default()));
        let storage = Arc::new(StorageManager::new(dir.join("data")).unwrap());
        let options = RunOptions { jobs: 2, fail_fast: false, debug: true };

        let summary = tokio_test::block_on(run_all(files, extractor, Arc::clone(&storage), &options)).unwrap();

        assert_eq!(summary, RunSummary { written: 1, rejected: 2, failed: 1 });
        let written = fs::read_to_string(storage.document_path("Momo")).unwrap();
        assert!(written.contains("\"text\": \"Appa's friend.\""));
        assert!(dir.join("data/debug/Bad.annotated.html").exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_process_source_reports_failure() {
        let dir = fixture_dir("single");
        let bad = dir.join("avatar.wikia.com/wiki/Bad.html");
        fs::write(&bad, BAD_PAGE).unwrap();

        let extractor = DocumentExtractor::new(SiteConfig::default());
        let storage = StorageManager::new(dir.join("data")).unwrap();
        let outcome = process_source(&bad.display().to_string(), &extractor, &storage, false);

        assert!(matches!(outcome, Outcome::Failed(AppError::Extraction(_))));
        assert!(!storage.document_path("Bad").exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_fail_fast_stops_scheduling_after_failure() {
        let dir = fixture_dir("fail_fast");
        let bad = dir.join("avatar.wikia.com/wiki/Bad.html");
        let good = dir.join("avatar.wikia.com/wiki/Momo.html");
        let later = dir.join("avatar.wikia.com/wiki/Later.html");
        fs::write(&bad, BAD_PAGE).unwrap();
        fs::write(&good, GOOD_PAGE).unwrap();
        fs::write(&later, GOOD_PAGE).unwrap();

        let files = vec![
            bad.display().to_string(),
            good.display().to_string(),
            later.display().to_string(),
        ];
        let extractor = Arc::new(DocumentExtractor::new(SiteConfig::default()));
        let storage = Arc::new(StorageManager::new(dir.join("data")).unwrap());
        let options = RunOptions { jobs: 1, fail_fast: true, debug: false };

        let summary = tokio_test::block_on(run_all(files, extractor, Arc::clone(&storage), &options)).unwrap();

        assert_eq!(summary, RunSummary { written: 0, rejected: 0, failed: 1 });
        assert!(!storage.document_path("Momo").exists());
        assert!(!storage.document_path("Later").exists());

        fs::remove_dir_all(&dir).ok();
    }
}
