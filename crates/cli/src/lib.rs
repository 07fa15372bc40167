//! Terminal helpers for the Karia Mitra command line
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Result listings sized to the terminal
//! - Spinners for store round-trips

#![warn(missing_docs)]

pub mod output;
pub mod progress;
