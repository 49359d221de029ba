pub mod config;
pub mod content;
pub mod domain;
pub mod handlers;
pub mod paths;
pub mod quiz;
pub mod session;
pub mod state;
pub mod validation;

use axum::{routing::get, routing::post, Router};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the application router. Shared between main and the HTTP tests.
pub fn app(state: AppState) -> Router {
  Router::new()
    .route("/", get(handlers::index))
    .route("/level", post(handlers::select_level))
    .route("/exercise-type", post(handlers::select_exercise_type))
    .route("/answer", post(handlers::set_answer))
    .route("/check", post(handlers::check_answers))
    .route("/next", post(handlers::next_exercise))
    .route("/practiced", post(handlers::mark_practiced))
    .route("/progress", get(handlers::progress_page))
    .route("/reset-progress", post(handlers::reset_progress))
    .nest_service("/static", ServeDir::new(paths::STATIC_DIR))
    .with_state(state)
}
