//! Dump loading service
//!
//! Runs the author pass to completion, then the work pass. Works resolve
//! their author names against what the author pass persisted, so the work
//! pass never starts while author lines are still outstanding.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::SplitStream, StreamExt};

use crate::{
    dump::{parse_line, translate_author, translate_work},
    error::{AppError, AppResult, LineError},
    models::{LoadReport, PassKind, PassOutcome, PassReport},
    repository::CatalogStore,
};

/// Lazy sequence of raw dump lines, the file is closed when it is dropped.
///
/// Lines stay as bytes so a badly encoded line is skipped on its own instead
/// of failing the stream.
pub type DumpLines = SplitStream<BufReader<File>>;

/// Open a dump for one pass
pub async fn open_dump(path: &Path) -> AppResult<DumpLines> {
    let file = File::open(path)
        .await
        .map_err(|source| AppError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(SplitStream::new(BufReader::new(file).split(b'\n')))
}

/// Decode one raw line, dropping a trailing `\r`
pub fn decode_line(mut raw: Vec<u8>) -> Result<String, LineError> {
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    String::from_utf8(raw).map_err(|e| LineError::InvalidEncoding(e.utf8_error().to_string()))
}

#[derive(Clone)]
pub struct LoaderService {
    store: Arc<dyn CatalogStore>,
    progress_every: u64,
}

impl LoaderService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            progress_every: 0,
        }
    }

    /// Log a progress line every `lines` lines (0 disables)
    pub fn with_progress_every(mut self, lines: u64) -> Self {
        self.progress_every = lines;
        self
    }

    /// Load both dumps, authors first
    pub async fn run(&self, authors: &Path, works: &Path) -> LoadReport {
        let authors = self.load_authors(authors).await;
        let works = self.load_works(works).await;

        let report = LoadReport { authors, works };
        tracing::info!(
            authors_loaded = report.authors.loaded,
            authors_skipped = report.authors.skipped,
            works_loaded = report.works.loaded,
            works_skipped = report.works.skipped,
            "Load finished with {} skipped line(s)",
            report.total_skipped()
        );
        report
    }

    /// Author pass
    pub async fn load_authors(&self, path: &Path) -> PassReport {
        self.run_pass(PassKind::Authors, path).await
    }

    /// Work pass; only meaningful once the author pass is done
    pub async fn load_works(&self, path: &Path) -> PassReport {
        self.run_pass(PassKind::Works, path).await
    }

    async fn run_pass(&self, kind: PassKind, path: &Path) -> PassReport {
        let started = Instant::now();
        let mut report = PassReport::new(kind);
        tracing::info!(pass = %kind, path = %path.display(), "Starting pass");

        if let Err(e) = self.consume(kind, path, &mut report).await {
            tracing::error!(pass = %kind, "Pass aborted: {}", e);
            report.outcome = PassOutcome::Aborted(e.to_string());
        }

        report.elapsed = started.elapsed();
        tracing::info!(
            pass = %kind,
            lines = report.lines_read,
            loaded = report.loaded,
            skipped = report.skipped,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Pass finished"
        );
        report
    }

    async fn consume(&self, kind: PassKind, path: &Path, report: &mut PassReport) -> AppResult<()> {
        let mut lines = open_dump(path).await?;

        while let Some(raw) = lines.next().await {
            let raw = raw.map_err(|source| AppError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
            let line_no = report.lines_read + 1;

            match self.load_line(kind, raw).await {
                Ok(()) => report.record_loaded(),
                Err(e) => {
                    tracing::warn!(pass = %kind, line = line_no, kind = e.kind(), "Skipping line: {}", e);
                    report.record_skipped(e.kind());
                }
            }

            if self.progress_every > 0 && report.lines_read % self.progress_every == 0 {
                tracing::info!(
                    pass = %kind,
                    lines = report.lines_read,
                    loaded = report.loaded,
                    skipped = report.skipped,
                    "Progress"
                );
            }
        }

        Ok(())
    }

    /// Parse, translate and persist one line. Nothing is written unless the
    /// whole record translated.
    async fn load_line(&self, kind: PassKind, raw: Vec<u8>) -> Result<(), LineError> {
        let line = decode_line(raw)?;
        let record = parse_line(&line)?;
        match kind {
            PassKind::Authors => {
                let author = translate_author(&record)?;
                tracing::debug!(id = %author.id, "Loading author");
                self.store.upsert_author(&author).await?;
            }
            PassKind::Works => {
                let book = translate_work(&record, self.store.as_lookup()).await?;
                tracing::debug!(id = %book.id, authors = book.author_ids.len(), "Loading book");
                self.store.upsert_book(&book).await?;
            }
        }
        Ok(())
    }
}
