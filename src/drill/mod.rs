//! Drill module
//!
//! Session configuration and the per-question state machine. Independent
//! of any front end.

pub mod session;
pub mod settings;

pub use session::{Outcome, Phase, Session, MAX_ANSWER_DIGITS};
pub use settings::{DrillSettings, DIFFICULTIES, MULTIPLICANDS, MULTIPLIERS};
