use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::handlers::{self, RequestOutcome};
use crate::repository::PartRepository;
use crate::view::render_listing;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PartRepository>,
}

#[derive(Debug, Deserialize)]
pub struct PartRequestForm {
    pub part_requested: Option<String>,
    pub amount_requested: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/requestparts", post(request_parts))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = handlers::list_parts(state.repo.as_ref()).await?;
    Ok(Html(render_listing(&page)))
}

pub async fn request_parts(
    State(state): State<AppState>,
    Form(form): Form<PartRequestForm>,
) -> Result<Response, AppError> {
    let outcome = handlers::request_parts(
        state.repo.as_ref(),
        form.part_requested.as_deref(),
        form.amount_requested.as_deref(),
    )
    .await?;

    Ok(match outcome {
        RequestOutcome::Decremented => Redirect::to("/").into_response(),
        RequestOutcome::Rejected(page) => Html(render_listing(&page)).into_response(),
    })
}

pub async fn health_check() -> &'static str {
    "OK"
}
