//! Pure grading over a pinned working set.
//!
//! No side effects; the session state applies the returned counts and
//! progress delta. Vocabulary is compared by resolved option label, not
//! stored index, so regenerated option orderings cannot flip a result.

use crate::domain::ContentItem;

/// Result of grading one session's answer snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeOutcome {
  pub correct: usize,
  pub total: usize,
}

impl GradeOutcome {
  /// Fraction of questions answered correctly, in [0, 1].
  pub fn progress_delta(&self) -> f64 {
    if self.total == 0 {
      0.0
    } else {
      self.correct as f64 / self.total as f64
    }
  }
}

/// Grade `answers` (one option index per graded question, in flattened
/// item order) against the items' correct options.
pub fn grade(items: &[ContentItem], answers: &[usize]) -> GradeOutcome {
  let mut correct = 0;
  let mut total = 0;
  let mut cursor = 0;

  for item in items {
    match item {
      ContentItem::Reading(p) | ContentItem::Listening(p) => {
        for sub in &p.questions {
          if answers.get(cursor) == Some(&sub.correct) {
            correct += 1;
          }
          total += 1;
          cursor += 1;
        }
      }
      ContentItem::Grammar(g) => {
        if answers.get(cursor) == Some(&g.correct) {
          correct += 1;
        }
        total += 1;
        cursor += 1;
      }
      ContentItem::Vocabulary(v) => {
        let chosen = answers.get(cursor).and_then(|&a| v.options.get(a));
        if chosen.is_some_and(|label| *label == v.english) {
          correct += 1;
        }
        total += 1;
        cursor += 1;
      }
      // Completion-only items carry no answer slots
      ContentItem::Pronunciation(_) | ContentItem::Writing(_) => {}
    }
  }

  GradeOutcome { correct, total }
}
