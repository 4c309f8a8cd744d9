//! Simulator-wide constants.

/// Number of real pipeline stages (Fetch, Decode, Execute, Memory, Writeback).
///
/// `Complete` is a terminal marker and is not counted.
pub const STAGE_COUNT: usize = 5;

/// Default cycle limit after which `step()` stops advancing.
pub const DEFAULT_MAX_CYCLES: u64 = 20;

/// Minimum CPU knowledge (0-5 scale) required to start the minigame.
pub const DEFAULT_KNOWLEDGE_THRESHOLD: u8 = 3;

/// Upper bound of the knowledge scale.
pub const MAX_KNOWLEDGE: u8 = 5;

/// Number of addressable general registers (`R0`-`R31`).
pub const GPR_COUNT: u8 = 32;

/// Idealized cycles each instruction would take with one cycle per stage.
///
/// Used as the baseline of the efficiency ratio and score.
pub const BASELINE_CYCLES_PER_INSTRUCTION: u64 = STAGE_COUNT as u64;
