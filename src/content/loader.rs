//! Level document loading and validation.
//!
//! Each level ships as one TOML document with an array per exercise type.
//! Loading is fail-soft: a missing or broken file yields an empty level,
//! and an individual item that violates a content invariant is skipped
//! with a warning. Content authors get log noise, users never get a crash.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::{
  ContentItem, GrammarItem, PassageItem, PronunciationItem, VocabularyItem, WritingItem,
};

/// Raw per-level document as authored in content/<level>.toml.
#[derive(Debug, Default, Deserialize)]
pub struct LevelDoc {
  #[serde(default)]
  pub reading: Vec<PassageItem>,
  #[serde(default)]
  pub listening: Vec<PassageItem>,
  #[serde(default)]
  pub vocabulary: Vec<VocabularyItem>,
  #[serde(default)]
  pub grammar: Vec<GrammarItem>,
  #[serde(default)]
  pub pronunciation: Vec<PronunciationItem>,
  #[serde(default)]
  pub writing: Vec<WritingItem>,
}

/// Error loading a level document.
#[derive(Debug)]
pub enum ContentLoadError {
  IoError(String),
  ParseError(String),
}

impl std::fmt::Display for ContentLoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ContentLoadError::IoError(e) => write!(f, "IO error: {}", e),
      ContentLoadError::ParseError(e) => write!(f, "Parse error: {}", e),
    }
  }
}

impl std::error::Error for ContentLoadError {}

/// Load one level document from disk.
pub fn load_level_file(path: &Path) -> Result<LevelDoc, ContentLoadError> {
  let contents =
    fs::read_to_string(path).map_err(|e| ContentLoadError::IoError(e.to_string()))?;

  toml::from_str(&contents)
    .map_err(|e| ContentLoadError::ParseError(format!("{}: {}", path.display(), e)))
}

/// Option lists must be unambiguous: non-empty, in-range correct index,
/// and no duplicate labels that would make answer mapping ambiguous.
fn validate_options(options: &[String], correct: Option<usize>) -> Result<(), String> {
  if options.is_empty() {
    return Err("empty options".to_string());
  }
  if let Some(idx) = correct {
    if idx >= options.len() {
      return Err(format!("correct index {} out of range ({} options)", idx, options.len()));
    }
  }
  for (i, opt) in options.iter().enumerate() {
    if options[..i].contains(opt) {
      return Err(format!("duplicate option '{}'", opt));
    }
  }
  Ok(())
}

pub fn validate_passage(item: &PassageItem) -> Result<(), String> {
  if item.id.is_empty() {
    return Err("missing id".to_string());
  }
  if item.questions.is_empty() {
    return Err("passage has no questions".to_string());
  }
  for question in &item.questions {
    validate_options(&question.options, Some(question.correct))?;
  }
  Ok(())
}

pub fn validate_vocabulary(item: &VocabularyItem) -> Result<(), String> {
  if item.id.is_empty() {
    return Err("missing id".to_string());
  }
  validate_options(&item.options, None)?;
  // The target translation must appear exactly once for label matching
  let hits = item.options.iter().filter(|o| **o == item.english).count();
  if hits != 1 {
    return Err(format!("translation '{}' appears {} times in options", item.english, hits));
  }
  Ok(())
}

pub fn validate_grammar(item: &GrammarItem) -> Result<(), String> {
  if item.id.is_empty() {
    return Err("missing id".to_string());
  }
  validate_options(&item.options, Some(item.correct))
}

pub fn validate_pronunciation(item: &PronunciationItem) -> Result<(), String> {
  if item.id.is_empty() || item.word.is_empty() {
    return Err("missing id or word".to_string());
  }
  Ok(())
}

pub fn validate_writing(item: &WritingItem) -> Result<(), String> {
  if item.id.is_empty() || item.prompt.is_empty() {
    return Err("missing id or prompt".to_string());
  }
  Ok(())
}

/// Run items through a validator, keeping the valid ones.
pub fn filter_valid<T, F, C>(items: Vec<T>, validate: F, wrap: C, level: &str) -> Vec<ContentItem>
where
  F: Fn(&T) -> Result<(), String>,
  C: Fn(T) -> ContentItem,
{
  items
    .into_iter()
    .filter_map(|item| match validate(&item) {
      Ok(()) => Some(wrap(item)),
      Err(reason) => {
        tracing::warn!("Skipping invalid {} content item: {}", level, reason);
        None
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::SubQuestion;
  use std::io::Write;

  const SAMPLE_DOC: &str = r#"
[[reading]]
id = "A1_R1"
text = "Hallo! Ich heiße Anna."

[[reading.questions]]
q = "Wie heißt sie?"
options = ["Anna", "Maria", "Eva"]
correct = 0

[[grammar]]
id = "A1_G1"
q = "Er __ aus der Schweiz."
options = ["komme", "kommt", "kommen"]
correct = 1

[[vocabulary]]
id = "A1_V1"
german = "der Hund"
english = "dog"
options = ["cat", "dog", "house"]

[[pronunciation]]
id = "A1_P1"
word = "tschüs"
meaning = "bye"

[[writing]]
id = "A1_W1"
prompt = "Schreiben Sie 3 Sätze über Ihre Hobbys."
"#;

  #[test]
  fn test_parse_level_doc() {
    let doc: LevelDoc = toml::from_str(SAMPLE_DOC).unwrap();
    assert_eq!(doc.reading.len(), 1);
    assert_eq!(doc.reading[0].questions.len(), 1);
    assert_eq!(doc.grammar.len(), 1);
    assert_eq!(doc.grammar[0].correct, 1);
    assert_eq!(doc.vocabulary[0].english, "dog");
    assert_eq!(doc.pronunciation[0].word, "tschüs");
    assert_eq!(doc.writing[0].id, "A1_W1");
    // Partitions absent from the document default to empty
    assert!(doc.listening.is_empty());
  }

  #[test]
  fn test_load_level_file_missing() {
    let result = load_level_file(Path::new("/nonexistent/a1.toml"));
    assert!(matches!(result, Err(ContentLoadError::IoError(_))));
  }

  #[test]
  fn test_load_level_file_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a1.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[[grammar]]\nthis is not toml =").unwrap();

    let result = load_level_file(&path);
    assert!(matches!(result, Err(ContentLoadError::ParseError(_))));
  }

  #[test]
  fn test_load_level_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a1.toml");
    std::fs::write(&path, SAMPLE_DOC).unwrap();

    let doc = load_level_file(&path).unwrap();
    assert_eq!(doc.grammar[0].id, "A1_G1");
  }

  #[test]
  fn test_validate_grammar_correct_out_of_range() {
    let item = GrammarItem {
      id: "A1_G1".to_string(),
      q: "Er __ aus der Schweiz.".to_string(),
      options: vec!["komme".to_string(), "kommt".to_string()],
      correct: 2,
    };
    assert!(validate_grammar(&item).is_err());
  }

  #[test]
  fn test_validate_options_rejects_duplicates() {
    let item = GrammarItem {
      id: "A1_G1".to_string(),
      q: "Das ist __ Auto.".to_string(),
      options: vec!["ein".to_string(), "ein".to_string(), "eine".to_string()],
      correct: 0,
    };
    assert!(validate_grammar(&item).is_err());
  }

  #[test]
  fn test_validate_vocabulary_target_must_appear_once() {
    let mut item = VocabularyItem {
      id: "A1_V1".to_string(),
      german: "der Hund".to_string(),
      english: "dog".to_string(),
      options: vec!["cat".to_string(), "house".to_string()],
    };
    // Target missing from options
    assert!(validate_vocabulary(&item).is_err());

    item.options.push("dog".to_string());
    assert!(validate_vocabulary(&item).is_ok());
  }

  #[test]
  fn test_validate_passage_requires_questions() {
    let item = PassageItem {
      id: "A1_R1".to_string(),
      text: "Hallo!".to_string(),
      questions: vec![],
    };
    assert!(validate_passage(&item).is_err());
  }

  #[test]
  fn test_filter_valid_skips_broken_items() {
    let items = vec![
      GrammarItem {
        id: "A1_G1".to_string(),
        q: "Er __ aus der Schweiz.".to_string(),
        options: vec!["komme".to_string(), "kommt".to_string()],
        correct: 1,
      },
      GrammarItem {
        id: "A1_G2".to_string(),
        q: "Das ist __ Auto.".to_string(),
        options: vec!["ein".to_string()],
        correct: 5,
      },
    ];

    let kept = filter_valid(items, validate_grammar, ContentItem::Grammar, "A1");
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id(), "A1_G1");
  }

  #[test]
  fn test_validate_passage_checks_sub_questions() {
    let item = PassageItem {
      id: "A1_L1".to_string(),
      text: "Guten Tag.".to_string(),
      questions: vec![SubQuestion {
        q: "Was hört die Person?".to_string(),
        options: vec!["a".to_string(), "b".to_string()],
        correct: 3,
      }],
    };
    assert!(validate_passage(&item).is_err());
  }
}
