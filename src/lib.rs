//! survey-digest - Thematic reports and testimonials from reader surveys
//!
//! Reads a survey export, groups free-text answers by question and asks a
//! locally hosted model to summarize them.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm;
pub mod survey;

use thiserror::Error;

/// Main error type for survey-digest
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed survey file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Response {row} has no field named \"{field}\"")]
    MissingField { field: String, row: usize },

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("No respondent gave the maximum satisfaction score ({score})")]
    NoQualifyingRespondent { score: String },
}

impl From<reqwest::Error> for SurveyError {
    fn from(err: reqwest::Error) -> Self {
        SurveyError::Backend(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "survey-digest";
