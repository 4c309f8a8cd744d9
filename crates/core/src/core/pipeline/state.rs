//! Pipeline state and lifecycle.
//!
//! `PipelineState` exclusively owns everything a run mutates: the in-flight
//! slots, the register file, memory, the per-cycle hazard list and the run
//! statistics. Each minigame activation gets its own instance.

use tracing::debug;

use crate::common::constants::DEFAULT_MAX_CYCLES;
use crate::config::SimConfig;
use crate::core::arch::gpr::RegisterFile;
use crate::core::arch::memory::MemoryModel;
use crate::core::pipeline::hazards::Hazard;
use crate::core::pipeline::scheduler::{StageClaims, tick_pipelined, tick_sequential};
use crate::core::pipeline::slot::Slot;
use crate::isa::program::Program;
use crate::stats::{self, PipelineStats};

/// Result of a `PipelineState::step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One cycle was simulated; instructions remain.
    Advanced,
    /// One cycle was simulated and every instruction is now complete.
    Completed,
    /// Nothing happened: the run had already completed.
    AlreadyComplete,
    /// Nothing happened: the cycle limit has been reached.
    CycleLimit,
}

/// Complete simulator state for one run.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub(crate) slots: Vec<Slot>,
    pub(crate) regs: RegisterFile,
    pub(crate) memory: MemoryModel,
    pub(crate) hazards: Vec<Hazard>,
    pub(crate) stats: PipelineStats,
    program: Program,
    last_claims: StageClaims,
    cycle: u64,
    max_cycles: u64,
    pipelined: bool,
    completed: bool,
    score: u32,
}

impl PipelineState {
    /// Creates a state at cycle 0 with every instruction at Fetch.
    pub fn new(program: Program, max_cycles: u64, pipelined: bool) -> Self {
        let slots = program.entries().iter().map(Slot::new).collect();
        let regs = program.registers().clone();
        let memory = program.memory().clone();
        Self {
            slots,
            regs,
            memory,
            hazards: Vec::new(),
            stats: PipelineStats::default(),
            program,
            last_claims: StageClaims::default(),
            cycle: 0,
            max_cycles,
            pipelined,
            completed: false,
            score: 0,
        }
    }

    /// Creates a state using the limits and initial mode from `config`.
    pub fn with_config(program: Program, config: &SimConfig) -> Self {
        Self::new(program, config.max_cycles, config.pipelined)
    }

    /// Simulates one cycle.
    ///
    /// Does nothing once the run is complete or the cycle limit is reached.
    /// Otherwise the hazard list is cleared, one pipelined or sequential cycle
    /// runs, and the cycle counter is incremented. When the last instruction
    /// retires the score is computed once.
    pub fn step(&mut self) -> StepOutcome {
        if self.completed {
            return StepOutcome::AlreadyComplete;
        }
        if self.cycle >= self.max_cycles {
            return StepOutcome::CycleLimit;
        }

        self.hazards.clear();
        self.last_claims = if self.pipelined {
            tick_pipelined(self)
        } else {
            tick_sequential(self)
        };
        self.cycle += 1;

        if self.slots.iter().all(Slot::is_complete) {
            self.completed = true;
            self.score = stats::score(self.slots.len(), self.cycle);
            debug!(
                cycles = self.cycle,
                score = self.score,
                pipelined = self.pipelined,
                "pipeline run complete"
            );
            StepOutcome::Completed
        } else {
            StepOutcome::Advanced
        }
    }

    /// Flips between pipelined and sequential mode and resets the run.
    pub fn toggle_mode(&mut self) {
        self.pipelined = !self.pipelined;
        debug!(pipelined = self.pipelined, "pipeline mode toggled");
        self.reset();
    }

    /// Restores every field to its construction-time value.
    pub fn reset(&mut self) {
        self.cycle = 0;
        self.slots.iter_mut().for_each(Slot::reset);
        self.regs = self.program.registers().clone();
        self.memory = self.program.memory().clone();
        self.hazards.clear();
        self.stats = PipelineStats::default();
        self.last_claims = StageClaims::default();
        self.completed = false;
        self.score = 0;
        debug!("pipeline state reset");
    }

    /// Cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Configured cycle limit.
    pub const fn max_cycles(&self) -> u64 {
        self.max_cycles
    }

    /// True in pipelined mode, false in sequential mode.
    pub const fn is_pipelined(&self) -> bool {
        self.pipelined
    }

    /// True once every instruction has completed.
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Score of a completed run; 0 before completion. Not clamped to 100.
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Ratio of the idealized 5-cycles-per-instruction cost to the cycles used.
    pub fn efficiency(&self) -> f64 {
        stats::efficiency(self.slots.len(), self.cycle)
    }

    /// Instructions in program order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Current register values.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Current memory contents.
    pub const fn memory(&self) -> &MemoryModel {
        &self.memory
    }

    /// Hazards recorded during the most recent cycle.
    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    /// Stage claims made during the most recent cycle.
    pub const fn last_claims(&self) -> &StageClaims {
        &self.last_claims
    }

    /// Counters accumulated since the last reset.
    pub const fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// The program this state was built from.
    pub const fn program(&self) -> &Program {
        &self.program
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new(Program::teaching_sequence(), DEFAULT_MAX_CYCLES, true)
    }
}
