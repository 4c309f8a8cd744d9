//! Instruction set of the teaching pipeline.
//!
//! Provides the tagged instruction enum, its canonical assembly text, and
//! validated programs (instruction sequence plus seed state).

/// Assembly text parsing and formatting.
pub mod asm;
/// Registers, operands and instruction variants.
pub mod instruction;
/// Validated programs and per-stage timings.
pub mod program;

pub use instruction::{Instruction, Operand, Reg};
pub use program::{Program, ProgramEntry, StageTiming};
