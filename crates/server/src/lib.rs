pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Insight2Spec API",
        version = "0.1.0",
        description = "Turns raw product feedback into themes, opportunities, experiments and a PRD outline"
    ),
    paths(routes::health_check, routes::analyze),
    components(schemas(
        routes::HealthResponse,
        error::ErrorResponse,
        insight_core::AnalyzeRequest,
        insight_core::AnalysisResult,
        insight_core::AnalysisMode,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "analysis", description = "Feedback analysis")
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health_check))
        .route("/analyze", post(routes::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
