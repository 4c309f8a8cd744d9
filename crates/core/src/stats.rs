//! Run statistics collection and reporting.
//!
//! This module tracks what happened during a run. It provides:
//! 1. **Stall counters:** Structural and data hazard stalls.
//! 2. **Progress counters:** Stage advances and applied side effects.
//! 3. **Derived metrics:** Pipeline efficiency and the minigame score.

use std::fmt::Write as _;

use crate::common::constants::BASELINE_CYCLES_PER_INSTRUCTION;
use crate::core::pipeline::state::PipelineState;

/// Counters accumulated since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Stalls because the instruction's stage was already claimed.
    pub structural_stalls: u64,
    /// Stalls because a source register was still being produced.
    pub data_stalls: u64,
    /// Stage-to-stage transitions, including instant pass-through.
    pub stage_advances: u64,
    /// Register or memory writes performed by Execute and Memory.
    pub effects_applied: u64,
}

impl PipelineStats {
    /// Total stall events of either kind.
    pub const fn total_stalls(&self) -> u64 {
        self.structural_stalls + self.data_stalls
    }
}

/// Idealized cycles over cycles used: `instructions * 5 / cycles`.
///
/// Returns 0.0 before the first cycle.
pub fn efficiency(instructions: usize, cycles: u64) -> f64 {
    if cycles == 0 {
        return 0.0;
    }
    (instructions as u64 * BASELINE_CYCLES_PER_INSTRUCTION) as f64 / cycles as f64
}

/// Score out of 100: `round(100 * instructions * 5 / cycles)`.
///
/// Deliberately unclamped; a run faster than the 5-cycles-per-instruction
/// baseline scores above 100.
pub fn score(instructions: usize, cycles: u64) -> u32 {
    (100.0 * efficiency(instructions, cycles)).round() as u32
}

/// Formats a statistics report for a finished or interrupted run.
pub fn report(state: &PipelineState) -> String {
    let s = state.stats();
    let mut out = String::new();
    let _ = writeln!(out, "==========================================================");
    let _ = writeln!(out, "CPU PIPELINE SIMULATION STATISTICS");
    let _ = writeln!(out, "==========================================================");
    let _ = writeln!(
        out,
        "mode                     {}",
        if state.is_pipelined() {
            "pipelined"
        } else {
            "sequential"
        }
    );
    let _ = writeln!(out, "sim_cycles               {}", state.cycle());
    let _ = writeln!(out, "sim_insts                {}", state.slots().len());
    let _ = writeln!(out, "completed                {}", state.is_completed());
    let _ = writeln!(out, "efficiency               {:.2}", state.efficiency());
    let _ = writeln!(out, "score                    {}", state.score());
    let _ = writeln!(out, "----------------------------------------------------------");
    let _ = writeln!(out, "stalls.structural        {}", s.structural_stalls);
    let _ = writeln!(out, "stalls.data              {}", s.data_stalls);
    let _ = writeln!(out, "stalls.total             {}", s.total_stalls());
    let _ = writeln!(out, "stage_advances           {}", s.stage_advances);
    let _ = writeln!(out, "effects_applied          {}", s.effects_applied);
    out
}
