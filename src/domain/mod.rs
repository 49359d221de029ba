pub mod exercise;
pub mod item;
pub mod level;

pub use exercise::ExerciseType;
pub use item::{
  ContentItem, GrammarItem, PassageItem, PronunciationItem, SubQuestion, VocabularyItem,
  WritingItem,
};
pub use level::Level;
