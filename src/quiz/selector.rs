//! Exercise session selection.
//!
//! A session pins a uniform sample (without replacement) of the content
//! partition for the active (level, exercise type). Selection happens at
//! most once per session lifetime; re-renders see the same items until
//! the controller explicitly clears the slot.

use rand::seq::index;

use crate::config;
use crate::content::ContentRepository;
use crate::domain::{ContentItem, ExerciseType, Level};

/// The pinned working set for one exercise round.
///
/// Owned exclusively by the session state; replaced wholesale on reselect,
/// never structurally mutated. `answers` holds one option index per graded
/// sub-question, in item order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSession {
  pub level: Level,
  pub exercise_type: ExerciseType,
  pub items: Vec<ContentItem>,
  pub answers: Vec<usize>,
  pub graded: bool,
}

impl ExerciseSession {
  /// Total graded answer slots across all items.
  pub fn question_count(&self) -> usize {
    self.items.iter().map(|i| i.question_count()).sum()
  }

  /// Option count for the graded question at `question`, walking the
  /// flattened question order. None if the index is out of range.
  pub fn option_count(&self, question: usize) -> Option<usize> {
    let mut cursor = 0;
    for item in &self.items {
      match item {
        ContentItem::Reading(p) | ContentItem::Listening(p) => {
          for sub in &p.questions {
            if cursor == question {
              return Some(sub.options.len());
            }
            cursor += 1;
          }
        }
        ContentItem::Grammar(g) => {
          if cursor == question {
            return Some(g.options.len());
          }
          cursor += 1;
        }
        ContentItem::Vocabulary(v) => {
          if cursor == question {
            return Some(v.options.len());
          }
          cursor += 1;
        }
        ContentItem::Pronunciation(_) | ContentItem::Writing(_) => {}
      }
    }
    None
  }
}

/// Draw a fresh session for (level, type), or None when the partition has
/// no authored content. Sample size is min(configured count, available).
pub fn select(
  repo: &ContentRepository,
  level: Level,
  exercise_type: ExerciseType,
) -> Option<ExerciseSession> {
  let pool = repo.items_for(level, exercise_type);
  if pool.is_empty() {
    return None;
  }

  let amount = config::sample_count(exercise_type).min(pool.len());
  let mut rng = rand::rng();
  let items: Vec<ContentItem> = index::sample(&mut rng, pool.len(), amount)
    .into_iter()
    .map(|i| pool[i].clone())
    .collect();

  let question_count = items.iter().map(|i| i.question_count()).sum();

  Some(ExerciseSession {
    level,
    exercise_type,
    items,
    answers: vec![0; question_count],
    graded: false,
  })
}
