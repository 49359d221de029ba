use serde::{Deserialize, Serialize};

/// CEFR proficiency level gating which content partition is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
  A1,
  A2,
  B1,
  B2,
}

impl Level {
  /// All levels, in curriculum order.
  pub const ALL: [Level; 4] = [Self::A1, Self::A2, Self::B1, Self::B2];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "A1" => Some(Self::A1),
      "A2" => Some(Self::A2),
      "B1" => Some(Self::B1),
      "B2" => Some(Self::B2),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::A1 => "A1",
      Self::A2 => "A2",
      Self::B1 => "B1",
      Self::B2 => "B2",
    }
  }

  /// Certificate name shown in the level selector.
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::A1 => "Start Deutsch",
      Self::A2 => "Goethe-Zertifikat A2",
      Self::B1 => "Goethe-Zertifikat B1",
      Self::B2 => "Goethe-Zertifikat B2",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Self::A1 => "Basic comprehension and simple sentences.",
      Self::A2 => "Simple conversations and common situations.",
      Self::B1 => "Independent use in everyday situations.",
      Self::B2 => "Understanding complex texts and fluent communication.",
    }
  }

  /// Position in [`Level::ALL`], used to index per-level tables.
  pub fn index(&self) -> usize {
    match self {
      Self::A1 => 0,
      Self::A2 => 1,
      Self::B1 => 2,
      Self::B2 => 3,
    }
  }
}
