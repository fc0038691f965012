//! Session configuration
//!
//! The multiplier and difficulty chosen on the setup screen. Fixed for the
//! lifetime of a game.

use crate::{Result, XDrillsError};
use std::ops::RangeInclusive;

/// Tables offered on the setup screen
pub const MULTIPLIERS: RangeInclusive<u32> = 2..=12;
/// Range the multiplicand of each question is drawn from
pub const MULTIPLICANDS: RangeInclusive<u32> = 2..=12;
/// Question counts offered on the setup screen
pub const DIFFICULTIES: [u32; 4] = [5, 10, 15, 20];

/// Immutable `{multiplier, difficulty}` pair handed to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillSettings {
    multiplier: u32,
    difficulty: u32,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            multiplier: 2,
            difficulty: 5,
        }
    }
}

impl DrillSettings {
    /// Create validated settings
    pub fn new(multiplier: u32, difficulty: u32) -> Result<Self> {
        let settings = Self {
            multiplier,
            difficulty,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check both values against the enumerated choices
    pub fn validate(&self) -> Result<()> {
        if !MULTIPLIERS.contains(&self.multiplier) {
            return Err(XDrillsError::ConfigError(format!(
                "Multiplier must be between {} and {} (got {})",
                MULTIPLIERS.start(),
                MULTIPLIERS.end(),
                self.multiplier
            )));
        }

        if !DIFFICULTIES.contains(&self.difficulty) {
            return Err(XDrillsError::ConfigError(format!(
                "Difficulty must be one of {:?} (got {})",
                DIFFICULTIES, self.difficulty
            )));
        }

        Ok(())
    }

    /// The times table being drilled
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Number of questions in a session
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Expected answer for a given multiplicand
    pub fn product(&self, multiplicand: u32) -> u32 {
        self.multiplier * multiplicand
    }
}
