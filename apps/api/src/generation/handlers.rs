//! Axum route handler for résumé generation.

use axum::{extract::State, Json};
use chrono::Local;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::generation::pipeline::generate_resume;
use crate::models::profile::ResumeRequest;
use crate::state::AppState;

const SUCCESS_MESSAGE: &str = "Resume generated successfully";

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub success: bool,
    /// Storage path of the written file.
    pub resume_url: String,
    pub filename: String,
    pub message: String,
}

/// POST /generate-resume
///
/// Builds, renders and stores a PDF résumé for the submitted profile.
/// Any failure becomes a 500 with the failure's message as `detail`.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate_resume", %request_id);

    async move {
        let today = Local::now().date_naive();
        let file = generate_resume(
            state.renderer.clone(),
            state.storage.as_ref(),
            &request.profile,
            today,
        )
        .await?;

        info!("Generated {} ({} bytes)", file.filename, file.bytes.len());

        Ok::<_, AppError>(Json(GenerateResumeResponse {
            success: true,
            resume_url: file.storage_path.display().to_string(),
            filename: file.filename,
            message: SUCCESS_MESSAGE.to_string(),
        }))
    }
    .instrument(span)
    .await
}
