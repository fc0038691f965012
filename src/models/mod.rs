//! Data models module
//!
//! Contains the feedback and summary messages handed from the drill
//! session to the front ends.

pub mod message;

// Re-export commonly used types
pub use message::{Feedback, Summary};
