//! Axum route handler for the Analyze API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Name of the multipart field carrying the PDF.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// POST /api/analyze
///
/// Accepts `multipart/form-data` with one `file` field holding PDF bytes and
/// returns the model's assessment. Fields other than `file` are skipped.
/// A body that is not multipart at all is an internal failure, not a bare
/// axum rejection, so clients always get a JSON `error`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let mut multipart = multipart.map_err(|e| AppError::Internal(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(e.body_text()))?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload.ok_or_else(AppError::no_file)?;

    let span = tracing::info_span!("analyze", %request_id, file = %file_name, bytes = data.len());
    span.in_scope(|| info!("Analyzing upload"));

    let analysis = state.analyzer.analyze(data).instrument(span).await?;
    Ok(Json(AnalyzeResponse { analysis }))
}
