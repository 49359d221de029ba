//! Per-user session state and the exercise lifecycle.
//!
//! Each exercise type cycles through Unselected → InProgress → Graded and
//! back, keyed off the shared current level. All mutation goes through the
//! methods here; handlers never touch the slots directly. The transitions
//! are synchronous, so no render can observe a half-cleared state.

use crate::config;
use crate::content::ContentRepository;
use crate::domain::{ExerciseType, Level};
use crate::quiz::grader::{self, GradeOutcome};
use crate::quiz::selector::{self, ExerciseSession};

/// Mutable state for one user session.
#[derive(Debug, Clone)]
pub struct SessionState {
  current_level: Level,
  current_type: ExerciseType,
  /// Pinned working set per exercise type, indexed by [`ExerciseType::index`]
  slots: [Option<ExerciseSession>; 6],
  score: u32,
  total_exercises: u32,
  /// Accumulated fractional score per level, indexed by [`Level::index`]
  progress: [f64; 4],
}

impl Default for SessionState {
  fn default() -> Self {
    Self::new()
  }
}

impl SessionState {
  pub fn new() -> Self {
    Self {
      current_level: Level::A1,
      current_type: ExerciseType::Reading,
      slots: Default::default(),
      score: 0,
      total_exercises: 0,
      progress: [0.0; 4],
    }
  }

  pub fn current_level(&self) -> Level {
    self.current_level
  }

  pub fn current_type(&self) -> ExerciseType {
    self.current_type
  }

  pub fn score(&self) -> u32 {
    self.score
  }

  pub fn total_exercises(&self) -> u32 {
    self.total_exercises
  }

  /// Accumulated fractional score for a level.
  pub fn progress_for(&self, level: Level) -> f64 {
    self.progress[level.index()]
  }

  /// The pinned session for the active exercise type, if any.
  pub fn current_session(&self) -> Option<&ExerciseSession> {
    self.slots[self.current_type.index()].as_ref()
  }

  /// Pin a session for the active exercise type if none is pinned yet.
  ///
  /// Idempotent: an already-pinned session for the current level is
  /// returned unchanged, so repeated renders never reshuffle. Returns
  /// false when the (level, type) partition has no content.
  pub fn ensure_session(&mut self, repo: &ContentRepository) -> bool {
    let slot = &mut self.slots[self.current_type.index()];

    // A stale session from another level must never be shown
    if slot.as_ref().is_some_and(|s| s.level != self.current_level) {
      *slot = None;
    }

    if slot.is_none() {
      *slot = selector::select(repo, self.current_level, self.current_type);
    }

    slot.is_some()
  }

  /// Record one answer choice. Out-of-range indices indicate a caller bug
  /// and are logged and dropped; no state changes.
  pub fn set_answer(&mut self, question: usize, option: usize) {
    let Some(session) = self.slots[self.current_type.index()].as_mut() else {
      tracing::warn!("Answer submitted with no pinned session");
      return;
    };

    match session.option_count(question) {
      Some(count) if option < count => session.answers[question] = option,
      Some(count) => {
        tracing::warn!("Option index {} out of range for question {} ({} options)", option, question, count);
      }
      None => {
        tracing::warn!("Answer for unknown question index {}", question);
      }
    }
  }

  /// Grade the current answer snapshot and apply score and progress.
  ///
  /// One-way and guarded: a second invocation without an intervening
  /// next-exercise reset is a no-op, so score is never double-counted.
  /// Returns None when there is nothing to grade (no session, already
  /// graded, or a completion-only exercise type).
  pub fn check_answers(&mut self) -> Option<GradeOutcome> {
    if !self.current_type.is_graded() {
      tracing::warn!("Check requested for completion-only type {}", self.current_type.as_str());
      return None;
    }

    let level = self.current_level;
    let Some(session) = self.slots[self.current_type.index()].as_mut() else {
      tracing::warn!("Check requested with no pinned session");
      return None;
    };
    if session.graded {
      return None;
    }

    let outcome = grader::grade(&session.items, &session.answers);
    if outcome.total == 0 {
      return None;
    }

    session.graded = true;
    self.score += outcome.correct as u32;
    self.total_exercises += 1;
    self.progress[level.index()] += outcome.progress_delta();

    Some(outcome)
  }

  /// Apply completion credit for writing or pronunciation.
  ///
  /// The caller validates writing text before invoking this; a graded
  /// (already completed) session yields no additional credit. Returns
  /// whether credit was applied.
  pub fn mark_practiced(&mut self) -> bool {
    let credit = match self.current_type {
      ExerciseType::Writing => config::WRITING_COMPLETION_CREDIT,
      ExerciseType::Pronunciation => config::PRONUNCIATION_COMPLETION_CREDIT,
      other => {
        tracing::warn!("Completion requested for graded type {}", other.as_str());
        return false;
      }
    };

    let level = self.current_level;
    let Some(session) = self.slots[self.current_type.index()].as_mut() else {
      tracing::warn!("Completion requested with no pinned session");
      return false;
    };
    if session.graded {
      return false;
    }

    session.graded = true;
    self.total_exercises += 1;
    self.progress[level.index()] += credit;
    true
  }

  /// Retire the current exercise. The next render draws a fresh session.
  pub fn next_exercise(&mut self) {
    self.slots[self.current_type.index()] = None;
  }

  /// Switch levels. A level change is a hard reset: every exercise
  /// type's pinned session (and with it the graded flag) is dropped.
  pub fn select_level(&mut self, level: Level) {
    if level == self.current_level {
      return;
    }
    self.current_level = level;
    for slot in &mut self.slots {
      *slot = None;
    }
  }

  /// Switch exercise types. Unlike a level change this preserves the
  /// target type's pinned session, so returning to a type resumes the
  /// same in-progress questions; only its graded flag is cleared.
  pub fn select_exercise_type(&mut self, exercise_type: ExerciseType) {
    if exercise_type == self.current_type {
      return;
    }
    self.current_type = exercise_type;
    if let Some(session) = self.slots[exercise_type.index()].as_mut() {
      session.graded = false;
    }
  }

  /// Full reset: score, counters, every level's ledger, and every pinned
  /// session.
  pub fn reset_progress(&mut self) {
    self.score = 0;
    self.total_exercises = 0;
    self.progress = [0.0; 4];
    for slot in &mut self.slots {
      *slot = None;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ContentItem, GrammarItem, VocabularyItem, WritingItem};

  fn grammar_pool() -> Vec<ContentItem> {
    vec![
      ContentItem::Grammar(GrammarItem {
        id: "A1_G1".to_string(),
        q: "Ich __ aus Deutschland.".to_string(),
        options: vec![
          "komme".to_string(),
          "kommst".to_string(),
          "kommt".to_string(),
          "kommen".to_string(),
        ],
        correct: 0,
      }),
      ContentItem::Grammar(GrammarItem {
        id: "A1_G2".to_string(),
        q: "Das ist __ Buch.".to_string(),
        options: vec![
          "eine".to_string(),
          "ein".to_string(),
          "einer".to_string(),
          "eines".to_string(),
        ],
        correct: 1,
      }),
    ]
  }

  fn writing_pool() -> Vec<ContentItem> {
    vec![ContentItem::Writing(WritingItem {
      id: "A1_W1".to_string(),
      prompt: "Stellen Sie sich vor.".to_string(),
    })]
  }

  fn grammar_repo() -> ContentRepository {
    ContentRepository::with_items(vec![(Level::A1, ExerciseType::Grammar, grammar_pool())])
  }

  fn grammar_state(repo: &ContentRepository) -> SessionState {
    let mut state = SessionState::new();
    state.select_exercise_type(ExerciseType::Grammar);
    assert!(state.ensure_session(repo));
    state
  }

  #[test]
  fn test_selection_is_stable_across_renders() {
    let repo = grammar_repo();
    let mut state = grammar_state(&repo);

    let first: Vec<String> = state
      .current_session()
      .unwrap()
      .items
      .iter()
      .map(|i| i.id().to_string())
      .collect();

    // A re-render must not reshuffle
    assert!(state.ensure_session(&repo));
    let second: Vec<String> = state
      .current_session()
      .unwrap()
      .items
      .iter()
      .map(|i| i.id().to_string())
      .collect();

    assert_eq!(first, second);
  }

  #[test]
  fn test_ensure_session_unavailable_partition() {
    let repo = grammar_repo();
    let mut state = SessionState::new();
    state.select_exercise_type(ExerciseType::Vocabulary);

    assert!(!state.ensure_session(&repo));
    assert!(state.current_session().is_none());
  }

  #[test]
  fn test_grammar_round_end_to_end() {
    let repo = grammar_repo();
    let mut state = grammar_state(&repo);

    // Pool of exactly 2, so both items are selected deterministically
    let session = state.current_session().unwrap();
    assert_eq!(session.items.len(), 2);
    assert_eq!(session.answers, vec![0, 0]);

    // Answer by item id so the sampled order does not matter
    let correct_by_id: Vec<(usize, usize)> = session
      .items
      .iter()
      .enumerate()
      .map(|(i, item)| match item {
        ContentItem::Grammar(g) => (i, g.correct),
        _ => unreachable!(),
      })
      .collect();
    for (question, option) in correct_by_id {
      state.set_answer(question, option);
    }

    let outcome = state.check_answers().unwrap();
    assert_eq!(outcome.correct, 2);
    assert_eq!(outcome.total, 2);
    assert_eq!(state.score(), 2);
    assert_eq!(state.total_exercises(), 1);
    assert!((state.progress_for(Level::A1) - 1.0).abs() < f64::EPSILON);

    // Advance and redraw from the same pool
    state.next_exercise();
    assert!(state.current_session().is_none());
    assert!(state.ensure_session(&repo));
    let redrawn = state.current_session().unwrap();
    assert_eq!(redrawn.items.len(), 2);
    assert!(!redrawn.graded);
    assert_eq!(redrawn.answers, vec![0, 0]);
  }

  #[test]
  fn test_check_answers_is_not_double_counted() {
    let repo = grammar_repo();
    let mut state = grammar_state(&repo);
    state.set_answer(0, 0);

    let first = state.check_answers();
    assert!(first.is_some());
    let score_after_first = state.score();
    let progress_after_first = state.progress_for(Level::A1);

    // Second check without an intervening reset is a no-op
    assert!(state.check_answers().is_none());
    assert_eq!(state.score(), score_after_first);
    assert_eq!(state.total_exercises(), 1);
    assert!((state.progress_for(Level::A1) - progress_after_first).abs() < f64::EPSILON);
  }

  #[test]
  fn test_check_answers_without_session_is_ignored() {
    let mut state = SessionState::new();
    state.select_exercise_type(ExerciseType::Grammar);

    assert!(state.check_answers().is_none());
    assert_eq!(state.score(), 0);
    assert_eq!(state.total_exercises(), 0);
  }

  #[test]
  fn test_level_switch_invalidates_all_sessions() {
    let repo = ContentRepository::with_items(vec![
      (Level::A1, ExerciseType::Grammar, grammar_pool()),
      (Level::B1, ExerciseType::Grammar, grammar_pool()),
    ]);
    let mut state = grammar_state(&repo);
    state.set_answer(0, 3);
    assert_eq!(state.current_session().unwrap().answers[0], 3);

    state.select_level(Level::B1);
    assert!(state.current_session().is_none());

    // Back at A1 a fresh select occurs rather than resurrecting the old pin
    state.select_level(Level::A1);
    assert!(state.ensure_session(&repo));
    let fresh = state.current_session().unwrap();
    assert_eq!(fresh.level, Level::A1);
    assert!(!fresh.graded);
    assert_eq!(fresh.answers, vec![0; fresh.question_count()]);
  }

  #[test]
  fn test_stale_level_session_is_never_served() {
    // Simulates a slot left over from a previous level: ensure_session
    // must replace it instead of serving it
    let repo = ContentRepository::with_items(vec![
      (Level::A1, ExerciseType::Grammar, grammar_pool()),
      (Level::B1, ExerciseType::Grammar, grammar_pool()),
    ]);
    let mut state = grammar_state(&repo);
    assert_eq!(state.current_session().unwrap().level, Level::A1);

    state.select_level(Level::B1);
    assert!(state.ensure_session(&repo));
    assert_eq!(state.current_session().unwrap().level, Level::B1);
  }

  #[test]
  fn test_type_switch_preserves_session_but_clears_graded() {
    let repo = ContentRepository::with_items(vec![
      (Level::A1, ExerciseType::Grammar, grammar_pool()),
      (Level::A1, ExerciseType::Writing, writing_pool()),
    ]);
    let mut state = grammar_state(&repo);
    state.set_answer(0, 0);
    state.check_answers().unwrap();
    let graded_items: Vec<String> = state
      .current_session()
      .unwrap()
      .items
      .iter()
      .map(|i| i.id().to_string())
      .collect();

    // Navigate away and back
    state.select_exercise_type(ExerciseType::Writing);
    state.select_exercise_type(ExerciseType::Grammar);

    let resumed = state.current_session().unwrap();
    let resumed_items: Vec<String> = resumed.items.iter().map(|i| i.id().to_string()).collect();
    assert_eq!(resumed_items, graded_items);
    assert!(!resumed.graded);
    // Answers survive the round trip
    assert_eq!(resumed.answers.len(), 2);
  }

  #[test]
  fn test_writing_completion_credit() {
    let repo = ContentRepository::with_items(vec![(
      Level::A1,
      ExerciseType::Writing,
      writing_pool(),
    )]);
    let mut state = SessionState::new();
    state.select_exercise_type(ExerciseType::Writing);
    assert!(state.ensure_session(&repo));

    assert!(state.mark_practiced());
    assert_eq!(state.total_exercises(), 1);
    assert_eq!(state.score(), 0);
    assert!(
      (state.progress_for(Level::A1) - config::WRITING_COMPLETION_CREDIT).abs() < f64::EPSILON
    );

    // Repeat completion gives no extra credit
    assert!(!state.mark_practiced());
    assert_eq!(state.total_exercises(), 1);
  }

  #[test]
  fn test_pronunciation_completion_credit() {
    use crate::domain::PronunciationItem;
    let items = vec![ContentItem::Pronunciation(PronunciationItem {
      id: "A1_P1".to_string(),
      word: "tschüs".to_string(),
      meaning: "bye".to_string(),
    })];
    let repo =
      ContentRepository::with_items(vec![(Level::A1, ExerciseType::Pronunciation, items)]);
    let mut state = SessionState::new();
    state.select_exercise_type(ExerciseType::Pronunciation);
    assert!(state.ensure_session(&repo));

    assert!(state.mark_practiced());
    assert!(
      (state.progress_for(Level::A1) - config::PRONUNCIATION_COMPLETION_CREDIT).abs()
        < f64::EPSILON
    );
  }

  #[test]
  fn test_mark_practiced_rejected_for_graded_types() {
    let repo = grammar_repo();
    let mut state = grammar_state(&repo);

    assert!(!state.mark_practiced());
    assert_eq!(state.total_exercises(), 0);
  }

  #[test]
  fn test_set_answer_out_of_range_is_ignored() {
    let repo = grammar_repo();
    let mut state = grammar_state(&repo);

    state.set_answer(0, 99);
    state.set_answer(99, 0);
    assert_eq!(state.current_session().unwrap().answers, vec![0, 0]);
  }

  #[test]
  fn test_vocabulary_round_applies_label_scoring() {
    let items = vec![ContentItem::Vocabulary(VocabularyItem {
      id: "A1_V1".to_string(),
      german: "die Katze".to_string(),
      english: "cat".to_string(),
      options: vec!["dog".to_string(), "cat".to_string(), "bird".to_string()],
    })];
    let repo = ContentRepository::with_items(vec![(Level::A1, ExerciseType::Vocabulary, items)]);
    let mut state = SessionState::new();
    state.select_exercise_type(ExerciseType::Vocabulary);
    assert!(state.ensure_session(&repo));

    state.set_answer(0, 1);
    let outcome = state.check_answers().unwrap();
    assert_eq!(outcome.correct, 1);
    assert_eq!(state.score(), 1);
  }

  #[test]
  fn test_reset_progress_clears_everything() {
    let repo = grammar_repo();
    let mut state = grammar_state(&repo);
    state.set_answer(0, 0);
    state.check_answers().unwrap();
    assert!(state.score() > 0);

    state.reset_progress();
    assert_eq!(state.score(), 0);
    assert_eq!(state.total_exercises(), 0);
    for level in Level::ALL {
      assert_eq!(state.progress_for(level), 0.0);
    }
    assert!(state.current_session().is_none());
  }

  #[test]
  fn test_progress_is_monotonic_until_reset() {
    let repo = grammar_repo();
    let mut state = grammar_state(&repo);

    let mut last = 0.0;
    for _ in 0..3 {
      state.set_answer(0, 0);
      state.check_answers();
      let now = state.progress_for(Level::A1);
      assert!(now >= last);
      last = now;
      state.next_exercise();
      assert!(state.ensure_session(&repo));
    }
  }
}
