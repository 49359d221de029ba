//! Content item types for the exercise bank.
//!
//! Each exercise type has its own payload struct; [`ContentItem`] is the
//! tagged union the selector and grader operate on, so per-type field
//! access is always exhaustive instead of stringly keyed.

use serde::{Deserialize, Serialize};

/// One multiple-choice question embedded in a passage or transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubQuestion {
  /// Question text
  pub q: String,
  /// Answer options, rendered in stored order
  pub options: Vec<String>,
  /// Zero-based index of the correct option
  pub correct: usize,
}

/// A reading passage or listening transcript with embedded questions.
/// Listening items render an audio placeholder instead of inline text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageItem {
  pub id: String,
  /// Passage text (reading) or dialogue transcript (listening)
  pub text: String,
  pub questions: Vec<SubQuestion>,
}

/// A German word with its English translation among distractors.
/// Graded by resolved label, not stored index: the correct choice is the
/// option equal to `english`, wherever it sits in `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
  pub id: String,
  pub german: String,
  pub english: String,
  pub options: Vec<String>,
}

/// A fill-in-the-blank sentence with one correct option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarItem {
  pub id: String,
  /// Sentence containing a `__` blank marker
  pub q: String,
  pub options: Vec<String>,
  pub correct: usize,
}

/// A word to practice aloud. Ungraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationItem {
  pub id: String,
  pub word: String,
  pub meaning: String,
}

/// A free-text writing prompt. Ungraded beyond word count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingItem {
  pub id: String,
  pub prompt: String,
}

/// Tagged union over all exercise content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
  Reading(PassageItem),
  Listening(PassageItem),
  Vocabulary(VocabularyItem),
  Grammar(GrammarItem),
  Pronunciation(PronunciationItem),
  Writing(WritingItem),
}

impl ContentItem {
  /// Unique id within the item's (level, type) partition.
  pub fn id(&self) -> &str {
    match self {
      Self::Reading(p) | Self::Listening(p) => &p.id,
      Self::Vocabulary(v) => &v.id,
      Self::Grammar(g) => &g.id,
      Self::Pronunciation(p) => &p.id,
      Self::Writing(w) => &w.id,
    }
  }

  /// Number of graded answer slots this item contributes.
  pub fn question_count(&self) -> usize {
    match self {
      Self::Reading(p) | Self::Listening(p) => p.questions.len(),
      Self::Vocabulary(_) | Self::Grammar(_) => 1,
      Self::Pronunciation(_) | Self::Writing(_) => 0,
    }
  }
}
