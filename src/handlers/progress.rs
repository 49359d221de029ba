use askama::Template;
use axum::{
  extract::State,
  response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use super::{average_score, ensure_session_cookie, progress_rows, LevelProgressRow};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "progress.html")]
pub struct ProgressTemplate {
  pub rows: Vec<LevelProgressRow>,
  pub score: u32,
  pub total_exercises: u32,
  pub avg_score: String,
}

pub async fn progress_page(
  State(state): State<AppState>,
  jar: CookieJar,
) -> (CookieJar, Html<String>) {
  let (jar, session_id) = ensure_session_cookie(jar);

  let template = state.sessions.with_session(&session_id, |session| ProgressTemplate {
    rows: progress_rows(session),
    score: session.score(),
    total_exercises: session.total_exercises(),
    avg_score: average_score(session.score(), session.total_exercises()),
  });

  (jar, Html(template.render().unwrap_or_default()))
}

/// Wipe score, counters and every level's ledger; all pinned sessions are
/// invalidated so the next renders redraw.
pub async fn reset_progress(
  State(state): State<AppState>,
  jar: CookieJar,
) -> (CookieJar, Redirect) {
  let (jar, session_id) = ensure_session_cookie(jar);
  state.sessions.with_session(&session_id, |session| session.reset_progress());
  (jar, Redirect::to("/"))
}
