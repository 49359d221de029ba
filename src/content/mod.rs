//! Immutable in-memory content catalog.
//!
//! Loaded once at process start from the per-level TOML documents; no
//! mutation API exists. A (level, type) partition with no authored
//! content is a valid, expected condition and yields an empty slice.

pub mod loader;

use std::path::Path;

use crate::domain::{ContentItem, ExerciseType, Level};
use loader::{
  filter_valid, load_level_file, validate_grammar, validate_passage, validate_pronunciation,
  validate_vocabulary, validate_writing, LevelDoc,
};

/// Per-level item lists, indexed by [`ExerciseType::index`].
#[derive(Debug, Default)]
struct LevelPartitions {
  partitions: [Vec<ContentItem>; 6],
}

/// Read-only catalog of exercise items grouped by (level, exercise type).
#[derive(Debug, Default)]
pub struct ContentRepository {
  levels: [LevelPartitions; 4],
}

impl ContentRepository {
  /// Load every level document from `dir` (a1.toml .. b2.toml).
  /// Missing or unparseable files leave that level empty.
  pub fn load(dir: &Path) -> Self {
    let mut repo = Self::default();

    for level in Level::ALL {
      let path = dir.join(format!("{}.toml", level.as_str().to_lowercase()));
      match load_level_file(&path) {
        Ok(doc) => repo.levels[level.index()] = Self::build_partitions(doc, level),
        Err(e) => {
          tracing::warn!("No content loaded for level {}: {}", level.as_str(), e);
        }
      }
    }

    for level in Level::ALL {
      let total: usize = ExerciseType::ALL
        .iter()
        .map(|ty| repo.items_for(level, *ty).len())
        .sum();
      tracing::info!("Level {}: {} content items", level.as_str(), total);
    }

    repo
  }

  fn build_partitions(doc: LevelDoc, level: Level) -> LevelPartitions {
    let name = level.as_str();
    let mut parts = LevelPartitions::default();
    parts.partitions[ExerciseType::Reading.index()] =
      filter_valid(doc.reading, validate_passage, ContentItem::Reading, name);
    parts.partitions[ExerciseType::Listening.index()] =
      filter_valid(doc.listening, validate_passage, ContentItem::Listening, name);
    parts.partitions[ExerciseType::Vocabulary.index()] =
      filter_valid(doc.vocabulary, validate_vocabulary, ContentItem::Vocabulary, name);
    parts.partitions[ExerciseType::Grammar.index()] =
      filter_valid(doc.grammar, validate_grammar, ContentItem::Grammar, name);
    parts.partitions[ExerciseType::Pronunciation.index()] =
      filter_valid(doc.pronunciation, validate_pronunciation, ContentItem::Pronunciation, name);
    parts.partitions[ExerciseType::Writing.index()] =
      filter_valid(doc.writing, validate_writing, ContentItem::Writing, name);
    parts
  }

  /// Items authored for one (level, exercise type) partition.
  /// Empty slice, never an error, when nothing is authored.
  pub fn items_for(&self, level: Level, exercise_type: ExerciseType) -> &[ContentItem] {
    &self.levels[level.index()].partitions[exercise_type.index()]
  }

  /// Build a repository directly from items; used by tests.
  pub fn with_items(
    entries: Vec<(Level, ExerciseType, Vec<ContentItem>)>,
  ) -> Self {
    let mut repo = Self::default();
    for (level, ty, items) in entries {
      repo.levels[level.index()].partitions[ty.index()] = items;
    }
    repo
  }
}
