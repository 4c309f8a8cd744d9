//! Architectural state.
//!
//! This module holds the state that instructions observe and mutate:
//! 1. **Register File:** Named general registers plus the program counter.
//! 2. **Memory Model:** Sparse, insertion-ordered address-to-value cells.

/// General registers and PC.
pub mod gpr;
/// Data memory.
pub mod memory;

pub use gpr::RegisterFile;
pub use memory::MemoryModel;
