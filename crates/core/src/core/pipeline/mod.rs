//! Instruction Pipeline.
//!
//! This module contains the cycle-stepped, in-order pipeline model:
//! 1. **Stages:** The six positions an instruction moves through (`stage`).
//! 2. **Slots:** Per-instruction progress and remaining stage cycles (`slot`).
//! 3. **Hazards:** Register read/write sets and data/structural stall reasons (`hazards`).
//! 4. **Execution:** Register and memory side effects of Execute and Memory (`execute`).
//! 5. **Scheduling:** Pipelined and sequential advancement of one cycle (`scheduler`).
//! 6. **State:** Ownership, lifecycle, completion and score (`state`).

/// Register and memory side effects per stage.
pub mod execute;
/// Data and structural hazard detection.
pub mod hazards;
/// One-cycle advancement rules.
pub mod scheduler;
/// Per-instruction pipeline progress.
pub mod slot;
/// Pipeline stage enumeration.
pub mod stage;
/// Pipeline state and lifecycle.
pub mod state;

pub use hazards::Hazard;
pub use slot::Slot;
pub use stage::Stage;
pub use state::{PipelineState, StepOutcome};
