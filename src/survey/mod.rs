//! Survey module for survey-digest
//!
//! Loads survey exports and slices them by question.

mod extract;
mod records;
pub mod schema;

pub use extract::{collect_answers, ANSWER_SEPARATOR};
pub use records::{ResponseRecord, ResponseSet};
pub use schema::{QuestionSpec, QUESTIONS};
