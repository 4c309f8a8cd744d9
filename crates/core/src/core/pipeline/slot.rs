//! Per-instruction pipeline progress.
//!
//! A `Slot` is the pipeline's view of one program line: where it is, how many
//! cycles are left in each stage, and which stage side effects have already
//! been applied.

use crate::common::constants::STAGE_COUNT;
use crate::core::pipeline::stage::Stage;
use crate::isa::instruction::Instruction;
use crate::isa::program::{ProgramEntry, StageTiming};

/// An instruction in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    inst: Instruction,
    stage: Stage,
    timing: StageTiming,
    remaining: StageTiming,
    applied: [bool; STAGE_COUNT],
}

impl Slot {
    /// Creates a slot at Fetch with the entry's full stage costs.
    pub fn new(entry: &ProgramEntry) -> Self {
        Self {
            inst: entry.inst.clone(),
            stage: Stage::Fetch,
            timing: entry.timing,
            remaining: entry.timing,
            applied: [false; STAGE_COUNT],
        }
    }

    /// The instruction.
    pub const fn inst(&self) -> &Instruction {
        &self.inst
    }

    /// Current position.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// True once the instruction has retired.
    pub const fn is_complete(&self) -> bool {
        self.stage.is_complete()
    }

    /// Cycles left in `stage`; always 0 for `Complete`.
    pub fn remaining(&self, stage: Stage) -> u32 {
        self.remaining.get(stage.index()).copied().unwrap_or(0)
    }

    /// Construction-time cycle costs.
    pub const fn timing(&self) -> &StageTiming {
        &self.timing
    }

    /// Restores the construction-time position, counters and effect flags.
    pub(crate) const fn reset(&mut self) {
        self.stage = Stage::Fetch;
        self.remaining = self.timing;
        self.applied = [false; STAGE_COUNT];
    }

    /// Marks the current stage's side effects as applied.
    ///
    /// Returns true only the first time it is called for a stage.
    pub(crate) fn mark_effects(&mut self) -> bool {
        match self.applied.get_mut(self.stage.index()) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Spends one cycle in the current stage. Returns true if the stage is finished.
    ///
    /// A zero-cycle stage finishes on its first visit.
    pub(crate) fn tick(&mut self) -> bool {
        match self.remaining.get_mut(self.stage.index()) {
            Some(left) => {
                *left = left.saturating_sub(1);
                *left == 0
            }
            None => false,
        }
    }

    /// Moves to the next stage.
    pub(crate) const fn advance(&mut self) {
        self.stage = self.stage.next();
    }
}
