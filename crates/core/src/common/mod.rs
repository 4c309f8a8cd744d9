//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Constants:** Stage count, default cycle limit, knowledge gate threshold.
//! 2. **Error Handling:** Typed errors for assembly text, program validation and configuration.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for assembly, program validation and configuration.
pub mod error;

pub use constants::{DEFAULT_MAX_CYCLES, STAGE_COUNT};
pub use error::{AsmError, ConfigError, ProgramError};
