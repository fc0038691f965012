//! XDRILLS - times-table drills in the terminal
//!
//! A small TUI game: pick a multiplication table and a question count,
//! then answer randomly drawn problems until the session is done.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod drill;
pub mod models;
pub mod simple;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum XDrillsError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Session transition requested in a state that does not offer it
    InvalidTransition(String),
}

impl fmt::Display for XDrillsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XDrillsError::IoError(err) => write!(f, "I/O error: {}", err),
            XDrillsError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            XDrillsError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            XDrillsError::InvalidTransition(msg) => write!(f, "Invalid transition: {}", msg),
        }
    }
}

impl std::error::Error for XDrillsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XDrillsError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for XDrillsError {
    fn from(err: std::io::Error) -> Self {
        XDrillsError::IoError(err)
    }
}

impl From<toml::de::Error> for XDrillsError {
    fn from(err: toml::de::Error) -> Self {
        XDrillsError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

/// Result type alias for XDRILLS operations
pub type Result<T> = std::result::Result<T, XDrillsError>;

/// Error handling utilities
pub mod error {
    use super::XDrillsError;

    /// Convert error to a short message suitable for the terminal
    pub fn user_friendly_message(error: &XDrillsError) -> String {
        match error {
            XDrillsError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your preferences file.", msg)
            }
            XDrillsError::TuiError(_) => {
                "The terminal could not be set up. Try running with --plain.".to_string()
            }
            XDrillsError::IoError(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                "Input ended unexpectedly.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "xdrills";
pub const CONFIG_FILE: &str = "xdrills.toml";
pub const DEFAULT_LOG_FILTER: &str = "xdrills=info";
