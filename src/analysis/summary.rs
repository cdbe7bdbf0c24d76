//! Per-question theme summaries merged into one report

use crate::llm::prompts::{build_theme_prompt, ReportPrompt};
use crate::llm::{GenerateRequest, Generator, TextStream};
use crate::survey::{collect_answers, QuestionSpec, ResponseSet};
use crate::Result;

/// Progress reported while the per-question summaries are produced.
#[derive(Debug, Clone, Copy)]
pub enum SummaryProgress<'a> {
    /// About to summarize question `index` (1-based) of `total`
    Started {
        index: usize,
        total: usize,
        spec: &'a QuestionSpec,
    },
    /// The backend finished this question's summary
    Summarized {
        spec: &'a QuestionSpec,
        summary: &'a str,
    },
}

/// Drives the theme summaries and the final report for one survey.
pub struct SurveyAnalyzer<'a> {
    generator: &'a dyn Generator,
    model: &'a str,
    system: &'a str,
}

impl<'a> SurveyAnalyzer<'a> {
    pub fn new(generator: &'a dyn Generator, model: &'a str, system: &'a str) -> Self {
        Self {
            generator,
            model,
            system,
        }
    }

    /// Summarize every answer to one question into themes.
    pub async fn summarize_question(
        &self,
        responses: &ResponseSet,
        spec: &QuestionSpec,
    ) -> Result<String> {
        let answers = collect_answers(responses, spec.question)?;
        let prompt = build_theme_prompt(spec.question, spec.explain, &answers);

        self.generator
            .generate(GenerateRequest {
                model: self.model,
                prompt: &prompt,
                system: self.system,
            })
            .await
    }

    /// Summarize each question in order, then stream a report built from
    /// those summaries.
    ///
    /// Every question column is checked before the first request. The
    /// questions are then summarized one after another because each summary
    /// is appended to the report prompt as it completes.
    pub async fn report<F>(
        &self,
        responses: &ResponseSet,
        questions: &[QuestionSpec],
        mut on_progress: F,
    ) -> Result<TextStream>
    where
        F: FnMut(SummaryProgress<'_>),
    {
        responses.require_fields(questions.iter().map(|spec| spec.question))?;

        let mut report = ReportPrompt::new();
        let total = questions.len();

        for (i, spec) in questions.iter().enumerate() {
            on_progress(SummaryProgress::Started {
                index: i + 1,
                total,
                spec,
            });

            let summary = self.summarize_question(responses, spec).await?;
            on_progress(SummaryProgress::Summarized {
                spec,
                summary: &summary,
            });
            report.push_section(spec.question, &summary);
        }

        tracing::debug!("Report prompt is {} bytes", report.as_str().len());

        self.generator
            .generate_stream(GenerateRequest {
                model: self.model,
                prompt: report.as_str(),
                system: self.system,
            })
            .await
    }
}
