use crate::data::TimetableResult;
use crate::error::TimetableError;
use crate::timetable::{self, TimetableRequest};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

async fn solve_handler(
    Json(request): Json<TimetableRequest>,
) -> Result<Json<TimetableResult>, (StatusCode, String)> {
    info!(
        "Received {} request: {} modules, {} halls.",
        request.variant,
        request.modules.len(),
        request.halls.len()
    );
    // the solve blocks for up to the time budget
    let outcome = tokio::task::spawn_blocking(move || timetable::solve_timetable(&request))
        .await
        .map_err(|e| {
            error!("Solver task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("solver task failed: {e}"))
        })?;
    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(TimetableError::Input(e)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            error!("{}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/v1/timetable/solve", post(solve_handler))
        .route("/health", get(|| async { "ok" }))
}

pub async fn run_server() -> std::io::Result<()> {
    let addr = std::env::var("TIMETABLE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await
}
