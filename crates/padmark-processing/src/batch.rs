//! Batch driver - pads, resizes and watermarks every file of an input directory
//!
//! Files are independent: a failure is recorded against its file name and the batch moves
//! on. Only the preconditions (input directory, output directory, logo) abort a run.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use bytes::Bytes;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use padmark_core::{BatchConfig, BatchOutcome, FileError, PipelineError};

use crate::image::{ImageTransformer, TransformParams};
use crate::listing::{list_entries, ListedEntry};
use crate::preflight::{check_input_dir, ensure_output_dir, read_logo};

/// Per-file results, keyed by listing index
#[derive(Debug, Default)]
struct BatchResults {
    processed: usize,
    errors: Vec<(usize, FileError)>,
    recorded: Vec<bool>,
}

impl BatchResults {
    fn with_capacity(total: usize) -> Self {
        Self {
            processed: 0,
            errors: Vec::new(),
            recorded: vec![false; total],
        }
    }

    fn record_success(&mut self, index: usize) {
        self.processed += 1;
        self.recorded[index] = true;
    }

    fn record_failure(&mut self, index: usize, error: FileError) {
        self.errors.push((index, error));
        self.recorded[index] = true;
    }
}

/// Process every eligible file of `config.input_path`.
pub async fn run_batch(config: &BatchConfig) -> Result<BatchOutcome, PipelineError> {
    run_batch_with_cancel(config, CancellationToken::new()).await
}

/// Like [`run_batch`], but stops starting new files once `cancel` fires.
///
/// Files already in flight finish; the rest are reported with the `CANCELLED` code.
#[tracing::instrument(
    skip(config, cancel),
    fields(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        logo = %config.watermark_logo_file.display()
    )
)]
pub async fn run_batch_with_cancel(
    config: &BatchConfig,
    cancel: CancellationToken,
) -> Result<BatchOutcome, PipelineError> {
    let started = Instant::now();

    check_input_dir(&config.input_path).await?;
    ensure_output_dir(&config.output_path).await?;
    let logo = read_logo(&config.watermark_logo_file).await?;

    let entries = list_entries(&config.input_path, config.listing_order).await?;
    if entries.is_empty() {
        tracing::info!("No images found to process");
        return Ok(BatchOutcome::empty());
    }

    let total = entries.len();
    let max_concurrency = config.max_concurrency.max(1);
    tracing::info!(total = total, max_concurrency = max_concurrency, "Batch started");

    let params = TransformParams::from(config);
    let semaphore = Arc::new(Semaphore::new(max_concurrency));
    let results = Arc::new(Mutex::new(BatchResults::with_capacity(total)));
    let output_dir = Arc::new(config.output_path.clone());
    let mut names = Vec::with_capacity(total);
    let mut tasks = JoinSet::new();
    let mut cancelled = false;

    for entry in entries {
        names.push(entry.name.clone());

        let permit = if cancelled {
            None
        } else {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                permit = semaphore.clone().acquire_owned() => permit.ok(),
            }
        };

        let Some(permit) = permit else {
            if !cancelled {
                tracing::info!(file = %entry.name, "Batch cancelled, skipping remaining files");
                cancelled = true;
            }
            lock(&results).record_failure(entry.index, FileError::cancelled(&entry.name));
            continue;
        };

        let logo = logo.clone();
        let output_dir = Arc::clone(&output_dir);
        let results = Arc::clone(&results);
        tasks.spawn(async move {
            let _permit = permit;
            let outcome = process_file(&entry, &output_dir, logo, params).await;

            let mut results = lock(&results);
            match outcome {
                Ok(()) => results.record_success(entry.index),
                Err(e) => {
                    tracing::warn!(
                        file = %entry.name,
                        code = e.error_code(),
                        error = %e,
                        "Failed to process file"
                    );
                    results.record_failure(entry.index, FileError::new(&entry.name, &e));
                }
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "Batch task failed");
        }
    }

    let mut results = lock(&results);
    for (index, name) in names.iter().enumerate() {
        if !results.recorded[index] {
            let err =
                PipelineError::Internal(format!("processing task for {} did not complete", name));
            results.record_failure(index, FileError::new(name.as_str(), &err));
        }
    }
    results.errors.sort_by_key(|(index, _)| *index);

    let outcome = BatchOutcome {
        success: true,
        processed: results.processed,
        total,
        errors: results.errors.drain(..).map(|(_, error)| error).collect(),
        message: None,
        cancelled,
    };

    tracing::info!(
        processed = outcome.processed,
        failed = outcome.failed(),
        total = outcome.total,
        cancelled = outcome.cancelled,
        duration_ms = started.elapsed().as_millis() as u64,
        "Batch finished"
    );

    Ok(outcome)
}

/// Read, transform and write one file.
async fn process_file(
    entry: &ListedEntry,
    output_dir: &Path,
    logo: Bytes,
    params: TransformParams,
) -> Result<(), PipelineError> {
    let file_started = Instant::now();

    let source = tokio::fs::read(&entry.path)
        .await
        .map_err(|source| PipelineError::Read {
            file: entry.name.clone(),
            source,
        })?;

    let output_path = output_dir.join(&entry.file_name);
    let format = ImageTransformer::output_format_for(&output_path);
    let name = entry.name.clone();

    let encoded = tokio::task::spawn_blocking(move || {
        ImageTransformer::transform(&name, &source, &logo, &params, format)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, file = %entry.name, "Failed to spawn blocking task");
        PipelineError::Internal(e.to_string())
    })??;

    tokio::fs::write(&output_path, &encoded)
        .await
        .map_err(|source| PipelineError::Write {
            file: entry.name.clone(),
            source,
        })?;

    tracing::debug!(
        file = %entry.name,
        output = %output_path.display(),
        bytes = encoded.len(),
        duration_ms = file_started.elapsed().as_millis() as u64,
        "Processed file"
    );
    Ok(())
}

/// Poisoning is ignored: every record is a single push.
fn lock(results: &Mutex<BatchResults>) -> std::sync::MutexGuard<'_, BatchResults> {
    results
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
