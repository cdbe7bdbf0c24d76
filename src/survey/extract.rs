//! Pull every answer to one question out of a response set

use crate::survey::ResponseSet;
use crate::Result;

/// Separator placed between consecutive answers.
pub const ANSWER_SEPARATOR: &str = "\n\n";

/// Join all non-blank answers to `question`, in file order.
///
/// Answers are kept verbatim; only the blank check trims. A question nobody
/// answered yields an empty string. Fails if any record lacks the field.
pub fn collect_answers(responses: &ResponseSet, question: &str) -> Result<String> {
    let mut answers = Vec::new();
    for record in responses {
        let answer = record.get(question)?;
        if !answer.trim().is_empty() {
            answers.push(answer);
        }
    }

    tracing::debug!(
        "{} of {} respondents answered \"{}\"",
        answers.len(),
        responses.len(),
        question
    );

    Ok(answers.join(ANSWER_SEPARATOR))
}
