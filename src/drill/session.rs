//! Drill session state machine
//!
//! Owns the round state of one game: the current multiplicand, the answer
//! being typed, how many questions were asked and how many were right.
//! A session is `Active` until `questions_asked == difficulty`, then
//! `Finished` until it is restarted.

use crate::drill::settings::{DrillSettings, MULTIPLICANDS};
use crate::models::{Feedback, Summary};
use crate::{Result, XDrillsError};
use rand::Rng;
use tracing::{debug, info, warn};

/// Answers never need more digits than this (12 x 12 = 144)
pub const MAX_ANSWER_DIGITS: u32 = 4;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Questions remain
    Active,
    /// All questions asked, waiting for restart or exit
    Finished,
}

/// Result of submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Per-question feedback
    pub feedback: Feedback,
    /// Present when this answer finished the session
    pub summary: Option<Summary>,
}

/// One game: settings plus mutable round state
#[derive(Debug)]
pub struct Session<R> {
    settings: DrillSettings,
    multiplicand: u32,
    answer: Option<u32>,
    questions_asked: u32,
    score: u32,
    phase: Phase,
    summary: Option<Summary>,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Start a session, drawing the first multiplicand from `rng`
    pub fn new(settings: DrillSettings, mut rng: R) -> Self {
        let multiplicand = rng.gen_range(MULTIPLICANDS);
        info!(
            multiplier = settings.multiplier(),
            difficulty = settings.difficulty(),
            "drill session started"
        );
        Self {
            settings,
            multiplicand,
            answer: None,
            questions_asked: 0,
            score: 0,
            phase: Phase::Active,
            summary: None,
            rng,
        }
    }

    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    pub fn multiplicand(&self) -> u32 {
        self.multiplicand
    }

    /// The answer typed so far, if any
    pub fn answer(&self) -> Option<u32> {
        self.answer
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// 1-based number of the question on screen, capped at the difficulty
    pub fn question_number(&self) -> u32 {
        (self.questions_asked + 1).min(self.settings.difficulty())
    }

    /// Product expected for the current question
    pub fn expected(&self) -> u32 {
        self.settings.product(self.multiplicand)
    }

    /// Summary of the finished session
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Append a digit to the answer. Returns false if the digit was rejected.
    pub fn enter_digit(&mut self, digit: u32) -> bool {
        if digit > 9 || self.is_finished() {
            return false;
        }
        let current = self.answer.unwrap_or(0);
        if current >= 10u32.pow(MAX_ANSWER_DIGITS - 1) {
            return false;
        }
        self.answer = Some(current * 10 + digit);
        true
    }

    /// Remove the last digit of the answer
    pub fn erase_digit(&mut self) {
        self.answer = match self.answer {
            Some(value) if value >= 10 => Some(value / 10),
            _ => None,
        };
    }

    /// Replace the whole answer
    pub fn set_answer(&mut self, answer: Option<u32>) {
        if !self.is_finished() {
            self.answer = answer;
        }
    }

    /// Compare the answer to the product, score it, and move on
    pub fn submit(&mut self) -> Result<Outcome> {
        self.require(Phase::Active, "submit")?;

        let expected = self.expected();
        let feedback = if self.answer == Some(expected) {
            self.score += 1;
            Feedback::correct()
        } else {
            Feedback::wrong(expected)
        };
        debug!(
            multiplicand = self.multiplicand,
            answer = ?self.answer,
            correct = feedback.correct,
            "answer submitted"
        );

        let summary = self.advance_round();
        Ok(Outcome { feedback, summary })
    }

    /// Move on without touching the score
    pub fn skip(&mut self) -> Result<Option<Summary>> {
        self.require(Phase::Active, "skip")?;
        debug!(multiplicand = self.multiplicand, "question skipped");
        Ok(self.advance_round())
    }

    /// Start the same level over
    pub fn restart(&mut self) -> Result<()> {
        self.require(Phase::Finished, "restart")?;
        self.questions_asked = 0;
        self.score = 0;
        self.answer = None;
        self.multiplicand = self.rng.gen_range(MULTIPLICANDS);
        self.summary = None;
        self.phase = Phase::Active;
        info!(
            multiplier = self.settings.multiplier(),
            difficulty = self.settings.difficulty(),
            "drill session restarted"
        );
        Ok(())
    }

    /// Leave the finished session, handing the settings back to setup
    pub fn exit(&self) -> Result<DrillSettings> {
        self.require(Phase::Finished, "exit")?;
        debug!("drill session exited");
        Ok(self.settings)
    }

    fn advance_round(&mut self) -> Option<Summary> {
        self.questions_asked += 1;
        self.answer = None;
        self.multiplicand = self.rng.gen_range(MULTIPLICANDS);

        if self.questions_asked == self.settings.difficulty() {
            let summary = Summary::new(self.settings.difficulty(), self.score);
            info!(
                score = self.score,
                difficulty = self.settings.difficulty(),
                "drill session finished"
            );
            self.phase = Phase::Finished;
            self.summary = Some(summary.clone());
            return Some(summary);
        }
        None
    }

    fn require(&self, phase: Phase, action: &str) -> Result<()> {
        if self.phase != phase {
            warn!(phase = ?self.phase, action, "transition not available");
            return Err(XDrillsError::InvalidTransition(format!(
                "cannot {} while {:?}",
                action, self.phase
            )));
        }
        Ok(())
    }
}
