//! The fixed shape of the newsletter reader survey

/// Column holding the 1-5 satisfaction score.
pub const SATISFACTION_FIELD: &str = "Are you enjoying Swizec’s Newsletter?";

/// Column holding the submission timestamp.
pub const SUBMITTED_AT_FIELD: &str = "Submit Date (UTC)";

/// Top of the satisfaction scale, compared as text.
pub const MAX_SATISFACTION_SCORE: &str = "5";

/// A free-text survey question and what its summary should explain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSpec {
    /// Question text, identical to the CSV header
    pub question: &'static str,
    /// Completes "Summarize ... and explain ___"
    pub explain: &'static str,
}

/// The open-ended questions, in survey order.
pub const QUESTIONS: [QuestionSpec; 7] = [
    QuestionSpec {
        question: "What hesitation did you have about subscribing?",
        explain: "what hesitations readers have before subscribing",
    },
    QuestionSpec {
        question: "What have you learned from Swizec’s Newsletter?",
        explain: "what readers learned from the newsletter",
    },
    QuestionSpec {
        question: "What have you liked most about the Swizec’s Newsletter?",
        explain: "what readers liked about the newsletter",
    },
    QuestionSpec {
        question: "What are some other benefits you got from Swizec’s Newsletter?",
        explain: "what benefits readers got from the newsletter",
    },
    QuestionSpec {
        question: "Would you recommend Swizec’s Newsletter to a friend or coworker? Why?",
        explain: "why readers would or wouldn't recommend the newsletter",
    },
    QuestionSpec {
        question: "Any other thoughts you'd like to share about Swizec’s Newsletter?",
        explain: "how readers suggest we can improve",
    },
    QuestionSpec {
        question: "What are you going to use this knowledge for?",
        explain: "how readers intend to leverage the newsletter",
    },
];
