//! Writing submission validation.
//!
//! Free-text writing answers are not graded for content; a submission is
//! accepted when it contains any words at all, and rejected empty ones
//! leave session state untouched.

/// Outcome of checking a writing submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritingCheck {
  /// Non-empty text; carries the whitespace-delimited word count
  Accepted { word_count: usize },
  /// Blank or whitespace-only text; the user is prompted to retry
  Empty,
}

impl WritingCheck {
  pub fn is_accepted(&self) -> bool {
    matches!(self, Self::Accepted { .. })
  }

  pub fn word_count(&self) -> Option<usize> {
    match self {
      Self::Accepted { word_count } => Some(*word_count),
      Self::Empty => None,
    }
  }
}

/// Count whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
  text.split_whitespace().count()
}

/// Validate a writing submission.
pub fn check_writing_submission(text: &str) -> WritingCheck {
  if text.trim().is_empty() {
    WritingCheck::Empty
  } else {
    WritingCheck::Accepted { word_count: word_count(text) }
  }
}
