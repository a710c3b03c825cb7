use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use insight_core::{AnalysisResult, AnalyzeRequest};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Structured analysis of the feedback", body = AnalysisResult),
        (status = 422, description = "Malformed or empty feedback", body = ErrorResponse),
        (status = 500, description = "OpenRouter is not configured", body = ErrorResponse),
        (status = 502, description = "OpenRouter request failed or returned unusable output", body = ErrorResponse),
        (status = 504, description = "OpenRouter did not answer in time", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let span = tracing::info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        mode = %state.dispatcher.mode(),
        items = request.feedback.len(),
    );

    async move {
        let result = state.dispatcher.analyze(&request).await?;
        tracing::info!(themes = result.themes.len(), "Analysis complete");
        Ok::<_, AppError>(Json(result))
    }
    .instrument(span)
    .await
}
