//! Generation pipeline — one request, start to finish.
//!
//! Flow: build_resume → render (spawn_blocking) → resume_filename → storage.save.
//! The first failure aborts the request; nothing is retried.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::document::build_resume;
use crate::models::profile::Profile;
use crate::render::{DocumentRenderer, RenderError};
use crate::storage::{ResumeStorage, StorageError};

/// Everything that can go wrong while producing a résumé file.
/// Callers see all variants the same way: as the error's message text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Rendering task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// A rendered résumé that has been written to storage.
#[derive(Debug, Clone)]
pub struct GeneratedResumeFile {
    pub filename: String,
    pub storage_path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Runs the full pipeline for one profile.
///
/// `today` only feeds the file name; the layout itself does not depend on the date.
pub async fn generate_resume(
    renderer: Arc<dyn DocumentRenderer>,
    storage: &dyn ResumeStorage,
    profile: &Profile,
    today: NaiveDate,
) -> Result<GeneratedResumeFile, GenerationError> {
    let blocks = build_resume(profile);
    info!("Built résumé layout with {} blocks", blocks.len());

    // CPU-bound — keep it off the async executor.
    let bytes = tokio::task::spawn_blocking(move || renderer.render(&blocks)).await??;
    info!("Rendered PDF ({} bytes)", bytes.len());

    let filename = resume_filename(&profile.full_name, today);
    let storage_path = storage.save(&filename, &bytes).await?;
    info!("Stored résumé at {}", storage_path.display());

    Ok(GeneratedResumeFile {
        filename,
        storage_path,
        bytes,
    })
}

/// `resume_{full name, spaces → '_'}_{YYYYMMDD}.pdf`.
///
/// Path separators and NUL are replaced too, so the name is always a single
/// file name. Two requests for the same name on the same day get the same file.
pub fn resume_filename(full_name: &str, date: NaiveDate) -> String {
    let sanitized: String = full_name
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();
    format!("resume_{sanitized}_{}.pdf", date.format("%Y%m%d"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
