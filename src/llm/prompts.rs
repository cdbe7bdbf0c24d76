/// Number of themes each per-question summary is asked for.
pub const THEME_COUNT: usize = 5;

/// Default system instruction sent with every generation call.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a marketing assistant analyzing a reader feedback survey for a newsletter";

/// Opening of the second-level prompt that merges the per-question summaries.
pub const REPORT_PREAMBLE: &str = "Swizec asked his readers a series of questions. Below is a high level summary of responses to each question. Write a short report on what readers think about the newsletters and what Swizec can improve.";

/// Build the prompt that condenses every answer to one question into themes.
pub fn build_theme_prompt(question: &str, explain: &str, answers: &str) -> String {
    format!(
        "We asked our readers \"{question}\". Here is a list of their answers. \
Summarize the answers into {THEME_COUNT} high level themes and explain {explain}.\n\
---\n\
{answers}"
    )
}

/// Accumulates per-question summaries into the final report prompt.
#[derive(Debug, Clone)]
pub struct ReportPrompt {
    text: String,
}

impl ReportPrompt {
    pub fn new() -> Self {
        Self {
            text: REPORT_PREAMBLE.to_string(),
        }
    }

    /// Append a `## <question>` section holding its summary.
    pub fn push_section(&mut self, question: &str, summary: &str) {
        self.text.push_str(&report_section(question, summary));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Default for ReportPrompt {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one labeled section, including its leading blank line.
pub fn report_section(question: &str, summary: &str) -> String {
    format!("\n\n## {question}\n\n{summary}")
}

/// Build the prompt that rewrites one respondent's answers as a testimonial.
pub fn build_testimonial_prompt(role: &str, answers: &[(&str, &str)]) -> String {
    let count = answers.len();
    let answers = answers
        .iter()
        .map(|(question, answer)| format!("Question: {question}\nAnswer: {answer}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "We asked a {role} {count} questions about their experience. \
Turn these answers into a short testimonial. Keep the original phrasing. \
The testimonial should be short and to the point. \
It should start with a hesitation then highlight benefits that the {role} experienced. \
Finish with why the {role} would suggest this to others. \
Write a draft then make it shorter. Keep phrasing from the original answers.\n\
\n\
Here are the answers:\n\
\n\
{answers}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_prompt_embeds_question_and_answers_verbatim() {
        let answers = "Price\n\nTime";
        let prompt = build_theme_prompt(
            "What hesitation did you have about subscribing?",
            "what hesitations readers have before subscribing",
            answers,
        );

        assert!(prompt.starts_with(
            "We asked our readers \"What hesitation did you have about subscribing?\"."
        ));
        assert!(prompt.contains("into 5 high level themes"));
        assert!(prompt.contains("explain what hesitations readers have before subscribing."));
        assert!(prompt.ends_with("\n---\nPrice\n\nTime"));
    }

    #[test]
    fn theme_prompt_with_no_answers_ends_at_separator() {
        let prompt = build_theme_prompt("Q?", "things", "");
        assert!(prompt.ends_with("explain things.\n---\n"));
    }

    #[test]
    fn report_prompt_appends_sections_in_order() {
        let mut report = ReportPrompt::new();
        report.push_section("First?", "one");
        report.push_section("Second?", "two");

        let text = report.into_string();
        assert_eq!(
            text,
            format!("{REPORT_PREAMBLE}\n\n## First?\n\none\n\n## Second?\n\ntwo")
        );
    }

    #[test]
    fn testimonial_prompt_lists_every_pair() {
        let prompt = build_testimonial_prompt(
            "subscriber",
            &[("Why?", "Because"), ("How?", "Carefully")],
        );

        assert!(prompt.starts_with("We asked a subscriber 2 questions about their experience."));
        assert!(prompt.contains("benefits that the subscriber experienced"));
        assert!(prompt.contains("why the subscriber would suggest this"));
        assert!(prompt.ends_with(
            "Here are the answers:\n\nQuestion: Why?\nAnswer: Because\n\nQuestion: How?\nAnswer: Carefully"
        ));
    }
}
