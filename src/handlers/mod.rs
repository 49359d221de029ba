//! HTTP handlers and the view models they render.
//!
//! Handlers resolve the session from the sid cookie, run one state
//! transition under the session lock, and render or redirect. All view
//! data is flattened into plain structs here so the templates stay free
//! of domain logic.

pub mod exercise;
pub mod progress;

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::config;
use crate::domain::{ContentItem, ExerciseType, Level};
use crate::quiz::{ExerciseSession, SessionState};
use crate::session;
use crate::state::AppState;

pub use exercise::{check_answers, mark_practiced, next_exercise, select_exercise_type, select_level, set_answer};
pub use progress::{progress_page, reset_progress};

/// Name of the session id cookie
pub(crate) const SESSION_COOKIE: &str = "sid";

/// Read the session id from the jar, issuing a fresh cookie if missing.
pub(crate) fn ensure_session_cookie(jar: CookieJar) -> (CookieJar, String) {
  if let Some(cookie) = jar.get(SESSION_COOKIE) {
    let id = cookie.value().to_string();
    (jar, id)
  } else {
    let id = session::generate_session_id();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
      .path("/")
      .http_only(true)
      .max_age(time::Duration::hours(config::SESSION_EXPIRY_HOURS))
      .build();
    (jar.add(cookie), id)
  }
}

/// One-line status message rendered above the exercise area.
pub struct Notice {
  pub kind: String,
  pub text: String,
}

impl Notice {
  pub fn success(text: impl Into<String>) -> Self {
    Self { kind: "success".to_string(), text: text.into() }
  }

  pub fn warning(text: impl Into<String>) -> Self {
    Self { kind: "warning".to_string(), text: text.into() }
  }

  pub fn info(text: impl Into<String>) -> Self {
    Self { kind: "info".to_string(), text: text.into() }
  }
}

pub struct LevelOption {
  pub value: String,
  pub label: String,
  pub selected: bool,
}

pub struct TypeTab {
  pub value: String,
  pub label: String,
  pub active: bool,
}

pub struct OptionView {
  pub index: usize,
  pub label: String,
  pub selected: bool,
}

pub struct QuestionView {
  pub index: usize,
  pub prompt: String,
  pub options: Vec<OptionView>,
  pub is_correct: bool,
  pub correct_label: String,
  pub chosen_label: String,
}

pub struct QuizView {
  /// Passage text; empty for everything but reading
  pub passage: String,
  /// Transcript text; empty for everything but listening
  pub transcript: String,
  pub is_listening: bool,
  pub instructions: String,
  pub questions: Vec<QuestionView>,
  pub graded: bool,
  pub banner_kind: String,
  pub banner_text: String,
}

pub struct WritingView {
  pub prompt: String,
  pub completed: bool,
}

pub struct PronunciationRow {
  pub word: String,
  pub meaning: String,
}

pub struct PronunciationView {
  pub words: Vec<PronunciationRow>,
  pub completed: bool,
}

pub struct LevelProgressRow {
  pub level: String,
  pub percent: String,
  pub width: u32,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
  pub levels: Vec<LevelOption>,
  pub current_level: String,
  pub level_description: String,
  pub score: u32,
  pub total_exercises: u32,
  pub tabs: Vec<TypeTab>,
  pub heading: String,
  pub notice: Option<Notice>,
  /// Non-empty when the (level, type) partition has no content
  pub unavailable_message: String,
  pub quiz: Option<QuizView>,
  pub writing: Option<WritingView>,
  pub pronunciation: Option<PronunciationView>,
  pub progress_rows: Vec<LevelProgressRow>,
  pub avg_score: String,
}

fn heading(exercise_type: ExerciseType) -> &'static str {
  match exercise_type {
    ExerciseType::Reading => "\u{1F4D6} Reading Comprehension (Lesen)",
    ExerciseType::Listening => "\u{1F442} Listening Comprehension (Hören)",
    ExerciseType::Writing => "\u{270D}\u{FE0F} Writing Exercise (Schreiben)",
    ExerciseType::Pronunciation => "\u{1F5E3}\u{FE0F} Pronunciation Practice (Sprechen)",
    ExerciseType::Grammar => "\u{2699}\u{FE0F} Grammar Quiz (Grammatik)",
    ExerciseType::Vocabulary => "\u{1F4DA} Vocabulary Building (Wortschatz)",
  }
}

fn instructions(exercise_type: ExerciseType) -> &'static str {
  match exercise_type {
    ExerciseType::Reading => "Answer the questions (Multiple Choice):",
    ExerciseType::Listening => "Answer the questions based on what you heard:",
    ExerciseType::Grammar => "Fill in the blanks with the correct option:",
    ExerciseType::Vocabulary => "Choose the correct English translation:",
    // Completion-only types render their own blocks
    ExerciseType::Writing | ExerciseType::Pronunciation => "",
  }
}

fn multiple_choice_view(
  index: usize,
  prompt: &str,
  options: &[String],
  correct: usize,
  answers: &[usize],
) -> QuestionView {
  let chosen = answers.get(index).copied().unwrap_or(0);
  QuestionView {
    index,
    prompt: prompt.to_string(),
    options: options
      .iter()
      .enumerate()
      .map(|(i, label)| OptionView { index: i, label: label.clone(), selected: i == chosen })
      .collect(),
    is_correct: chosen == correct,
    correct_label: options.get(correct).cloned().unwrap_or_default(),
    chosen_label: options.get(chosen).cloned().unwrap_or_default(),
  }
}

fn question_views(session: &ExerciseSession) -> Vec<QuestionView> {
  let mut views = Vec::new();
  let mut cursor = 0;
  for item in &session.items {
    match item {
      ContentItem::Reading(p) | ContentItem::Listening(p) => {
        for sub in &p.questions {
          views.push(multiple_choice_view(cursor, &sub.q, &sub.options, sub.correct, &session.answers));
          cursor += 1;
        }
      }
      ContentItem::Grammar(g) => {
        views.push(multiple_choice_view(cursor, &g.q, &g.options, g.correct, &session.answers));
        cursor += 1;
      }
      ContentItem::Vocabulary(v) => {
        let correct = v.options.iter().position(|o| *o == v.english).unwrap_or(0);
        views.push(multiple_choice_view(cursor, &v.german, &v.options, correct, &session.answers));
        cursor += 1;
      }
      ContentItem::Pronunciation(_) | ContentItem::Writing(_) => {}
    }
  }
  views
}

fn result_banner(correct: usize, total: usize) -> (String, String) {
  if correct == total {
    (
      "success".to_string(),
      format!("Perfect! You got all {} questions correct! \u{1F389}", total),
    )
  } else if correct * 10 >= total * 7 {
    (
      "success".to_string(),
      format!("Great job! You got {}/{} questions correct! \u{1F44D}", correct, total),
    )
  } else {
    (
      "warning".to_string(),
      format!("You got {}/{} questions correct. Keep practicing! \u{1F4AA}", correct, total),
    )
  }
}

fn quiz_view(session: &ExerciseSession) -> QuizView {
  let questions = question_views(session);
  let (banner_kind, banner_text) = if session.graded {
    let correct = questions.iter().filter(|q| q.is_correct).count();
    result_banner(correct, questions.len())
  } else {
    (String::new(), String::new())
  };

  let (passage, transcript) = match session.items.first() {
    Some(ContentItem::Reading(p)) => (p.text.clone(), String::new()),
    Some(ContentItem::Listening(p)) => (String::new(), p.text.clone()),
    _ => (String::new(), String::new()),
  };

  QuizView {
    passage,
    transcript,
    is_listening: session.exercise_type == ExerciseType::Listening,
    instructions: instructions(session.exercise_type).to_string(),
    questions,
    graded: session.graded,
    banner_kind,
    banner_text,
  }
}

fn progress_rows(session: &SessionState) -> Vec<LevelProgressRow> {
  Level::ALL
    .iter()
    .map(|level| {
      let percent = config::progress_percent(session.progress_for(*level));
      LevelProgressRow {
        level: level.as_str().to_string(),
        percent: format!("{:.1}", percent),
        width: percent.round() as u32,
      }
    })
    .collect()
}

fn average_score(score: u32, total_exercises: u32) -> String {
  if total_exercises > 0 {
    format!("{:.2}", f64::from(score) / f64::from(total_exercises))
  } else {
    "N/A".to_string()
  }
}

fn build_index(session: &SessionState, notice: Option<Notice>) -> IndexTemplate {
  let level = session.current_level();
  let exercise_type = session.current_type();

  let mut template = IndexTemplate {
    levels: Level::ALL
      .iter()
      .map(|l| LevelOption {
        value: l.as_str().to_string(),
        label: format!("{} - {}", l.as_str(), l.display_name()),
        selected: *l == level,
      })
      .collect(),
    current_level: level.as_str().to_string(),
    level_description: level.description().to_string(),
    score: session.score(),
    total_exercises: session.total_exercises(),
    tabs: ExerciseType::ALL
      .iter()
      .map(|t| TypeTab {
        value: t.as_str().to_string(),
        label: t.label().to_string(),
        active: *t == exercise_type,
      })
      .collect(),
    heading: heading(exercise_type).to_string(),
    notice,
    unavailable_message: String::new(),
    quiz: None,
    writing: None,
    pronunciation: None,
    progress_rows: progress_rows(session),
    avg_score: average_score(session.score(), session.total_exercises()),
  };

  match session.current_session() {
    Some(pinned) => match exercise_type {
      ExerciseType::Writing => {
        let prompt = match pinned.items.first() {
          Some(ContentItem::Writing(w)) => w.prompt.clone(),
          _ => String::new(),
        };
        template.writing = Some(WritingView { prompt, completed: pinned.graded });
      }
      ExerciseType::Pronunciation => {
        let words = pinned
          .items
          .iter()
          .filter_map(|item| match item {
            ContentItem::Pronunciation(p) => {
              Some(PronunciationRow { word: p.word.clone(), meaning: p.meaning.clone() })
            }
            _ => None,
          })
          .collect();
        template.pronunciation = Some(PronunciationView { words, completed: pinned.graded });
      }
      _ => template.quiz = Some(quiz_view(pinned)),
    },
    None => {
      template.unavailable_message = format!(
        "No {} exercises available for {} yet.",
        exercise_type.label(),
        level.as_str()
      );
    }
  }

  template
}

/// Pin a session if needed and render the main page.
pub(crate) fn render_index(state: &AppState, session_id: &str, notice: Option<Notice>) -> Html<String> {
  let template = state.sessions.with_session(session_id, |session| {
    session.ensure_session(&state.content);
    build_index(session, notice)
  });

  Html(template.render().unwrap_or_default())
}

pub async fn index(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
  let (jar, session_id) = ensure_session_cookie(jar);
  let body = render_index(&state, &session_id, None);
  (jar, body)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_result_banner_thresholds() {
    assert_eq!(result_banner(3, 3).0, "success");
    assert_eq!(result_banner(7, 10).0, "success");
    assert_eq!(result_banner(6, 10).0, "warning");
    assert!(result_banner(0, 1).1.contains("Keep practicing"));
  }

  #[test]
  fn test_average_score_formatting() {
    assert_eq!(average_score(5, 2), "2.50");
    assert_eq!(average_score(0, 0), "N/A");
  }

  #[test]
  fn test_multiple_choice_view_marks_selection() {
    let options = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let view = multiple_choice_view(0, "Frage?", &options, 2, &[1]);

    assert!(!view.options[0].selected);
    assert!(view.options[1].selected);
    assert!(!view.is_correct);
    assert_eq!(view.correct_label, "c");
    assert_eq!(view.chosen_label, "b");
  }
}
