//! Action endpoints for the exercise lifecycle.
//!
//! Each POST runs exactly one state transition and then redirects back to
//! the main page (or answers 204 for the htmx answer updates).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::{ensure_session_cookie, render_index, Notice, SESSION_COOKIE};
use crate::domain::{ExerciseType, Level};
use crate::state::AppState;
use crate::validation::{check_writing_submission, WritingCheck};

#[derive(Deserialize)]
pub struct LevelForm {
  pub level: String,
}

/// Switch the active level; invalidates every pinned session.
pub async fn select_level(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<LevelForm>,
) -> (CookieJar, Redirect) {
  let (jar, session_id) = ensure_session_cookie(jar);

  match Level::from_str(&form.level) {
    Some(level) => {
      state.sessions.with_session(&session_id, |session| session.select_level(level));
    }
    None => tracing::warn!("Ignoring unknown level '{}'", form.level),
  }

  (jar, Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct ExerciseTypeForm {
  pub exercise_type: String,
}

/// Switch the active exercise type; preserves its pinned session.
pub async fn select_exercise_type(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<ExerciseTypeForm>,
) -> (CookieJar, Redirect) {
  let (jar, session_id) = ensure_session_cookie(jar);

  match ExerciseType::from_str(&form.exercise_type) {
    Some(exercise_type) => {
      state
        .sessions
        .with_session(&session_id, |session| session.select_exercise_type(exercise_type));
    }
    None => tracing::warn!("Ignoring unknown exercise type '{}'", form.exercise_type),
  }

  (jar, Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct AnswerForm {
  pub question_index: usize,
  pub option_index: usize,
}

/// Record one answer choice (htmx, no page swap).
pub async fn set_answer(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<AnswerForm>,
) -> StatusCode {
  // No cookie means the page was never rendered; nothing to update
  let Some(cookie) = jar.get(SESSION_COOKIE) else {
    return StatusCode::NO_CONTENT;
  };

  state.sessions.with_session(cookie.value(), |session| {
    session.set_answer(form.question_index, form.option_index);
  });

  StatusCode::NO_CONTENT
}

/// Grade the current answers. Guarded against repeat grading.
pub async fn check_answers(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
  let (jar, session_id) = ensure_session_cookie(jar);
  state.sessions.with_session(&session_id, |session| {
    session.check_answers();
  });
  (jar, Redirect::to("/"))
}

/// Retire the current exercise; the next render draws a fresh one.
pub async fn next_exercise(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
  let (jar, session_id) = ensure_session_cookie(jar);
  state.sessions.with_session(&session_id, |session| session.next_exercise());
  (jar, Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct PracticedForm {
  /// Writing submission text; absent for pronunciation
  pub text: Option<String>,
}

/// Complete a writing or pronunciation exercise.
///
/// Renders directly instead of redirecting so the word count and the
/// empty-submission prompt survive to the response.
pub async fn mark_practiced(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<PracticedForm>,
) -> (CookieJar, Html<String>) {
  let (jar, session_id) = ensure_session_cookie(jar);

  let notice = state.sessions.with_session(&session_id, |session| {
    match session.current_type() {
      ExerciseType::Writing => {
        let text = form.text.as_deref().unwrap_or("");
        match check_writing_submission(text) {
          WritingCheck::Empty => Notice::warning("Please write something before submitting."),
          WritingCheck::Accepted { word_count } => {
            if session.mark_practiced() {
              Notice::success(format!("Writing submitted! Word count: {}.", word_count))
            } else {
              Notice::info("This exercise is already marked complete.")
            }
          }
        }
      }
      ExerciseType::Pronunciation => {
        if session.mark_practiced() {
          Notice::success("Pronunciation marked as practiced.")
        } else {
          Notice::info("This set is already marked as practiced.")
        }
      }
      other => {
        tracing::warn!("Completion posted for graded type {}", other.as_str());
        Notice::warning("This exercise type is graded with Check Answers.")
      }
    }
  });

  let body = render_index(&state, &session_id, Some(notice));
  (jar, body)
}
