//! Run entry points: extract, translate, assemble.
//!
//! One call to [`convert`] is one run. All run state (page cache, progress
//! counter, result accumulator) is local to the call — there are no ambient
//! globals, so concurrent runs are fully isolated from each other.
//!
//! Failure semantics are all-or-nothing: the first parse or translation
//! failure aborts the run and no document is produced. Pages are processed
//! strictly sequentially, files in upload order and pages in physical
//! order, so the output ordering invariant is structural.

use crate::config::TranslationConfig;
use crate::error::PipelineError;
use crate::output::{RunOutput, RunStats, SourceFile, TranslatedFile, TranslatedPage};
use crate::pipeline::{assemble, extract, translate};
use crate::progress::ProgressTracker;
use crate::providers::{OpenAiProvider, TranslationProvider};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Translate every page of every input PDF into one Word document.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `files`  — uploaded PDFs in upload order (name + raw bytes)
/// * `config` — run configuration (style, instructions, backend)
///
/// # Errors
/// * [`PipelineError::MissingApiKey`] before any file is opened when no
///   provider, key, or `OPENAI_API_KEY` is available
/// * [`PipelineError::InvalidPdf`] naming the offending file when parsing
///   fails — no translation calls have been made at that point
/// * [`PipelineError::TranslationFailed`] naming file and page when the
///   backend fails for good; no document is produced
pub async fn convert(
    files: &[SourceFile],
    config: &TranslationConfig,
) -> Result<RunOutput, PipelineError> {
    let total_start = Instant::now();

    // Provider resolution comes first: a missing credential must surface
    // before any extraction work happens.
    let provider = resolve_provider(config)?;
    info!(provider = provider.name(), files = files.len(), "starting translation run");

    // ── Extraction pass ──────────────────────────────────────────────────
    // All files are extracted up front so the total page count is known
    // before the first translation call — progress is a fraction of real
    // work, not a guess.
    let extract_start = Instant::now();
    let mut page_cache: Vec<(&str, Vec<String>)> = Vec::with_capacity(files.len());
    let mut total_pages = 0usize;
    for file in files {
        let pages = extract::extract_pages(&file.bytes).map_err(|e| PipelineError::InvalidPdf {
            file: file.name.clone(),
            detail: e.to_string(),
        })?;
        debug!(file = %file.name, pages = pages.len(), "extracted");
        total_pages += pages.len();
        page_cache.push((&file.name, pages));
    }
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    info!(total_pages, "extraction complete");

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total_pages);
    }

    // ── Translation pass ─────────────────────────────────────────────────
    let translate_start = Instant::now();
    let mut tracker = ProgressTracker::new(total_pages);
    let mut translated_files: Vec<TranslatedFile> = Vec::with_capacity(page_cache.len());
    let mut placeholder_pages = 0usize;

    for (name, pages) in &page_cache {
        let mut out_pages = Vec::with_capacity(pages.len());
        for (i, page_text) in pages.iter().enumerate() {
            let page_num = i + 1;
            let result = translate::translate_page(&provider, page_text, config)
                .await
                .map_err(|e| PipelineError::TranslationFailed {
                    file: name.to_string(),
                    page: page_num,
                    source: e,
                })?;

            if result.placeholder {
                placeholder_pages += 1;
            }
            out_pages.push(TranslatedPage {
                page_num,
                label: format!("Page {page_num}"),
                text: result.text,
                placeholder: result.placeholder,
                retries: result.retries,
            });

            let fraction = tracker.advance();
            debug!(file = %name, page = page_num, fraction, "page translated");
            if let Some(ref cb) = config.progress_callback {
                cb.on_page_complete(tracker.completed(), total_pages, fraction);
            }
        }
        translated_files.push(TranslatedFile {
            name: name.to_string(),
            pages: out_pages,
        });
    }
    let translate_duration_ms = translate_start.elapsed().as_millis() as u64;

    // ── Assembly ─────────────────────────────────────────────────────────
    let docx = assemble::build_docx(&translated_files)?;

    let stats = RunStats {
        total_files: files.len(),
        total_pages,
        translated_pages: total_pages - placeholder_pages,
        placeholder_pages,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        extract_duration_ms,
        translate_duration_ms,
    };
    info!(
        pages = stats.total_pages,
        placeholders = stats.placeholder_pages,
        duration_ms = stats.total_duration_ms,
        "run complete"
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total_pages);
    }

    Ok(RunOutput {
        docx,
        files: translated_files,
        stats,
    })
}

/// Run [`convert`] and write the document to `output_path`.
///
/// Uses atomic write (temp file + rename) so a crash never leaves a partial
/// .docx behind.
pub async fn convert_to_file(
    files: &[SourceFile],
    output_path: impl AsRef<Path>,
    config: &TranslationConfig,
) -> Result<RunStats, PipelineError> {
    let output = convert(files, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PipelineError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("docx.tmp");
    tokio::fs::write(&tmp_path, &output.docx)
        .await
        .map_err(|e| PipelineError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| PipelineError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    files: &[SourceFile],
    config: &TranslationConfig,
) -> Result<RunOutput, PipelineError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PipelineError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(files, config))
}

/// Resolve the translation provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`) — used as-is; this is how
///    tests inject a deterministic stub.
/// 2. **Explicit key** (`config.api_key`) — builds an [`OpenAiProvider`]
///    with the configured model, endpoint, and timeout.
/// 3. **Environment** (`OPENAI_API_KEY`) — the zero-configuration path.
///
/// An empty or whitespace key counts as absent.
fn resolve_provider(
    config: &TranslationConfig,
) -> Result<Arc<dyn TranslationProvider>, PipelineError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    let key = config
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|k| !k.trim().is_empty())
        .ok_or(PipelineError::MissingApiKey)?;

    Ok(Arc::new(OpenAiProvider::new(
        key,
        config.model.clone(),
        config.endpoint.clone(),
        config.api_timeout_secs,
    )?))
}
