//! CPU core: architectural state and the instruction pipeline.

/// Architectural state (register file, memory model).
pub mod arch;
/// Instruction pipeline (stages, hazards, execution, scheduling, state).
pub mod pipeline;
