//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod game;
pub mod setup;

pub use game::{Dialog, EndGameAction, Focus, GameEvent, GameScreen};
pub use setup::{SetupEvent, SetupScreen};
