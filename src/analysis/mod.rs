//! Analysis module for survey-digest
//!
//! Turns a loaded survey into model prompts: a themed report across all
//! questions, or a testimonial from one respondent.

mod summary;
mod testimonial;

pub use summary::{SummaryProgress, SurveyAnalyzer};
pub use testimonial::{
    answer_pairs, select_respondent, top_score_respondents, RankingStrategy, RespondentRole,
    Testimonial, TestimonialWriter,
};
