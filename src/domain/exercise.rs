use serde::{Deserialize, Serialize};

/// The six activity kinds. Reading, listening, grammar and vocabulary are
/// graded multiple choice; writing and pronunciation are completion-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
  Reading,
  Listening,
  Writing,
  Pronunciation,
  Grammar,
  Vocabulary,
}

impl ExerciseType {
  /// All exercise types, in menu order.
  pub const ALL: [ExerciseType; 6] = [
    Self::Reading,
    Self::Listening,
    Self::Writing,
    Self::Pronunciation,
    Self::Grammar,
    Self::Vocabulary,
  ];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "reading" => Some(Self::Reading),
      "listening" => Some(Self::Listening),
      "writing" => Some(Self::Writing),
      "pronunciation" => Some(Self::Pronunciation),
      "grammar" => Some(Self::Grammar),
      "vocabulary" => Some(Self::Vocabulary),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Reading => "reading",
      Self::Listening => "listening",
      Self::Writing => "writing",
      Self::Pronunciation => "pronunciation",
      Self::Grammar => "grammar",
      Self::Vocabulary => "vocabulary",
    }
  }

  /// Menu label, German first like the certificate papers.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Reading => "Lesen (Reading)",
      Self::Listening => "Hören (Listening)",
      Self::Writing => "Schreiben (Writing)",
      Self::Pronunciation => "Sprechen (Pronunciation)",
      Self::Grammar => "Grammatik (Grammar Quiz)",
      Self::Vocabulary => "Wortschatz (Vocabulary)",
    }
  }

  /// Whether answers are checked against a correct option. Writing and
  /// pronunciation are completed via an explicit "mark practiced" action.
  pub fn is_graded(&self) -> bool {
    !matches!(self, Self::Writing | Self::Pronunciation)
  }

  /// Position in [`ExerciseType::ALL`], used to index per-type slots.
  pub fn index(&self) -> usize {
    match self {
      Self::Reading => 0,
      Self::Listening => 1,
      Self::Writing => 2,
      Self::Pronunciation => 3,
      Self::Grammar => 4,
      Self::Vocabulary => 5,
    }
  }
}
