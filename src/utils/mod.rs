//! Utility functions for working with captured signals.
//!
//! # Modules
//!
//! - [`generation`] - Synthetic signal generation utilities

pub mod generation;

// Re-export common utilities
pub use generation::*;
