use std::sync::Arc;

use crate::render::DocumentRenderer;
use crate::storage::ResumeStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Turns document blocks into PDF bytes. Default: `PdfRenderer` on US letter.
    pub renderer: Arc<dyn DocumentRenderer>,
    /// Where rendered files go. Default: `LocalResumeStorage` under `RESUME_STORAGE_DIR`.
    pub storage: Arc<dyn ResumeStorage>,
}
