//! Utility functions module
//!
//! Layout helpers for popups and centered widgets.

pub mod layout;

pub use layout::{centered_column, centered_rect};
