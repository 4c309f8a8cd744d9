//! CPU pipeline teaching simulator library.
//!
//! This crate implements a cycle-stepped, in-order, 5-stage instruction pipeline
//! used as an educational minigame. It is organised as follows:
//! 1. **ISA:** A tiny tagged instruction set (LOAD/ADD/SUB/STORE/JUMP) with a canonical text form.
//! 2. **Core:** Architectural state (registers, memory) and the pipeline (stages, hazards,
//!    execution effects, scheduler, state lifecycle).
//! 3. **Simulation:** The text-producing minigame surface and the host slot that gates it.
//! 4. **Support:** Configuration, statistics, and status rendering.

/// Common types and constants (errors, stage count, defaults).
pub mod common;
/// Simulator configuration (limits, initial mode, program definition).
pub mod config;
/// CPU core (architectural state and pipeline).
pub mod core;
/// Instruction set (instruction variants, registers, operands, assembly text).
pub mod isa;
/// Status text rendering.
pub mod render;
/// Minigame surface and host controller.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `SimConfig::default()` or load it from JSON.
pub use crate::config::SimConfig;
/// Pipeline state owning registers, memory and in-flight instructions.
pub use crate::core::pipeline::state::PipelineState;
/// Validated program: instruction sequence plus seed registers and memory.
pub use crate::isa::program::Program;
/// Text-driven minigame and the optional-instance host.
pub use crate::sim::{MinigameHost, PipelineMinigame};
