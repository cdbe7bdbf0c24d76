//! Pick the most enthusiastic respondent and turn their answers into a testimonial

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::llm::prompts::build_testimonial_prompt;
use crate::llm::{GenerateRequest, Generator, TextStream};
use crate::survey::schema::{MAX_SATISFACTION_SCORE, SATISFACTION_FIELD, SUBMITTED_AT_FIELD};
use crate::survey::{QuestionSpec, ResponseRecord, ResponseSet};
use crate::{Result, SurveyError};

/// Who the testimonial speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RespondentRole {
    Subscriber,
    #[default]
    Reader,
    User,
}

impl RespondentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscriber => "subscriber",
            Self::Reader => "reader",
            Self::User => "user",
        }
    }
}

impl fmt::Display for RespondentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which top-score respondents are considered; the first one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum RankingStrategy {
    /// Most written across the open questions
    #[default]
    #[serde(rename = "length")]
    #[value(name = "length")]
    AnswerLength,
    /// Latest submission first
    #[serde(rename = "recent")]
    #[value(name = "recent")]
    MostRecent,
}

impl RankingStrategy {
    /// Sort key for `record`; higher ranks first.
    pub fn score(&self, record: &ResponseRecord, questions: &[QuestionSpec]) -> Result<i64> {
        match self {
            Self::AnswerLength => {
                let mut total = 0usize;
                for spec in questions {
                    total += record.get(spec.question)?.chars().count();
                }
                Ok(i64::try_from(total).unwrap_or(i64::MAX))
            }
            Self::MostRecent => {
                let submitted = record.get(SUBMITTED_AT_FIELD)?;
                Ok(parse_submitted_at(submitted)
                    .map(|at| at.and_utc().timestamp_millis())
                    .unwrap_or(i64::MIN))
            }
        }
    }
}

/// Accepts the survey tool's `YYYY-MM-DD HH:MM:SS`, RFC 3339 and bare dates.
fn parse_submitted_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|at| at.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Respondents who gave the top satisfaction score, in file order.
pub fn top_score_respondents(responses: &ResponseSet) -> Result<Vec<&ResponseRecord>> {
    let mut selected = Vec::new();
    for record in responses {
        if record.get(SATISFACTION_FIELD)?.trim() == MAX_SATISFACTION_SCORE {
            selected.push(record);
        }
    }
    Ok(selected)
}

/// The highest-ranked top-score respondent. Ties keep file order.
pub fn select_respondent<'a>(
    responses: &'a ResponseSet,
    questions: &[QuestionSpec],
    strategy: RankingStrategy,
) -> Result<&'a ResponseRecord> {
    let candidates = top_score_respondents(responses)?;
    tracing::info!(
        "{} of {} respondents gave a score of {}",
        candidates.len(),
        responses.len(),
        MAX_SATISFACTION_SCORE
    );

    let mut ranked = candidates
        .into_iter()
        .map(|record| Ok((strategy.score(record, questions)?, record)))
        .collect::<Result<Vec<_>>>()?;
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked
        .into_iter()
        .next()
        .map(|(_, record)| record)
        .ok_or_else(|| SurveyError::NoQualifyingRespondent {
            score: MAX_SATISFACTION_SCORE.to_string(),
        })
}

/// Question/answer pairs of one respondent, in question order.
pub fn answer_pairs<'a>(
    record: &'a ResponseRecord,
    questions: &[QuestionSpec],
) -> Result<Vec<(&'static str, &'a str)>> {
    questions
        .iter()
        .map(|spec| Ok((spec.question, record.get(spec.question)?)))
        .collect()
}

/// A testimonial generation in flight.
pub struct Testimonial {
    /// Data row of the chosen respondent
    pub row: usize,
    pub prompt: String,
    pub stream: TextStream,
}

/// Selects a respondent and requests their testimonial.
pub struct TestimonialWriter<'a> {
    generator: &'a dyn Generator,
    model: &'a str,
    system: &'a str,
}

impl<'a> TestimonialWriter<'a> {
    pub fn new(generator: &'a dyn Generator, model: &'a str, system: &'a str) -> Self {
        Self {
            generator,
            model,
            system,
        }
    }

    pub async fn write(
        &self,
        responses: &ResponseSet,
        questions: &[QuestionSpec],
        role: RespondentRole,
        strategy: RankingStrategy,
    ) -> Result<Testimonial> {
        let record = select_respondent(responses, questions, strategy)?;
        let answers = answer_pairs(record, questions)?;
        let prompt = build_testimonial_prompt(role.as_str(), &answers);

        tracing::info!("Writing testimonial from response {}", record.row());
        tracing::debug!("Testimonial prompt:\n{}", prompt);

        let stream = self
            .generator
            .generate_stream(GenerateRequest {
                model: self.model,
                prompt: &prompt,
                system: self.system,
            })
            .await?;

        Ok(Testimonial {
            row: record.row(),
            prompt,
            stream,
        })
    }
}
