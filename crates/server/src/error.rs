use analyzer::AnalysisError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use insight_core::CoreError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Analysis(AnalysisError),
}

/// Body of every non-2xx response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable code, e.g. `openrouter_timeout`
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Analysis(err) => match err {
                AnalysisError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AnalysisError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                AnalysisError::Request { .. } | AnalysisError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Analysis(err) => err.code(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.code();

        let message = match self {
            AppError::Validation(msg) => {
                tracing::debug!("Rejected analyze request: {}", msg);
                msg
            }
            AppError::Analysis(err) => {
                tracing::error!(code = error_type, "Analysis failed: {}", err);
                err.to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Analysis(err)
    }
}
