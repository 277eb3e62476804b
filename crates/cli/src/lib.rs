//! Terminal output utilities for the wclook CLI
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting (distances, walk times, status glyphs)
//! - Progress indicators

#![warn(missing_docs)]

pub mod output;
pub mod progress;
