//! Type definitions for the dice simulation
//!
//! This module is organized into submodules:
//! - `dice` - Roll state machine, pose samples, the d6 face-normal table,
//!   and settle events

pub mod dice;

// Re-export all public types for convenient access
pub use dice::*;
