//! Messages produced by session transitions
//!
//! Per-question feedback and the end-of-session summary. The game screen
//! shows them as dialogs, plain mode prints them.

/// Feedback for one submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Whether the submitted answer matched the product
    pub correct: bool,
    /// Dialog title
    pub title: String,
    /// Dialog body
    pub message: String,
}

impl Feedback {
    /// Feedback for a matching answer
    pub fn correct() -> Self {
        Self {
            correct: true,
            title: "Correct!".to_string(),
            message: "This is the correct answer.".to_string(),
        }
    }

    /// Feedback for a wrong or empty answer, revealing the product
    pub fn wrong(expected: u32) -> Self {
        Self {
            correct: false,
            title: "Wrong!".to_string(),
            message: format!("The correct answer is {}.", expected),
        }
    }
}

/// Summary shown once the last question has been answered or skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of questions in the finished session
    pub difficulty: u32,
    /// Number of correct answers
    pub score: u32,
    /// Dialog title
    pub title: String,
    /// Dialog body
    pub message: String,
}

impl Summary {
    /// Build the summary for a finished session
    pub fn new(difficulty: u32, score: u32) -> Self {
        let verb = if score == 1 { " was" } else { "s were" };
        Self {
            difficulty,
            score,
            title: "Finished!".to_string(),
            message: format!(
                "You have finished {} questions.\n{} answer{} correct.\nDo you want to restart this level?",
                difficulty, score, verb
            ),
        }
    }

    /// Number of questions that were answered wrong or skipped
    pub fn missed(&self) -> u32 {
        self.difficulty - self.score
    }
}
