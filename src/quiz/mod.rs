pub mod grader;
pub mod selector;
pub mod state;

pub use grader::{grade, GradeOutcome};
pub use selector::{select, ExerciseSession};
pub use state::SessionState;
