//! Cycle Scheduler.
//!
//! Advances every instruction by one cycle. Two disciplines are supported:
//! 1. **Pipelined:** Instructions are visited from the most to the least
//!    advanced stage (program order breaks ties). Each stage can be claimed by
//!    one instruction per cycle; a second instruction in a claimed stage
//!    records a structural hazard, and a reader of an in-flight result records
//!    a data hazard. Updates are visible to instructions visited later in the
//!    same cycle. No instruction moves more than one stage per cycle.
//! 2. **Sequential:** Only the oldest unfinished instruction moves.

use std::cmp::Reverse;

use tracing::trace;

use crate::common::constants::STAGE_COUNT;
use crate::core::pipeline::execute::apply_stage_effects;
use crate::core::pipeline::hazards::{Hazard, data_hazard};
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::state::PipelineState;

/// Stages claimed during one cycle, with the claiming instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageClaims {
    owners: [Option<usize>; STAGE_COUNT],
}

impl StageClaims {
    /// True if `stage` already has an owner this cycle. `Complete` is never claimed.
    pub fn is_claimed(&self, stage: Stage) -> bool {
        self.owners
            .get(stage.index())
            .is_some_and(Option::is_some)
    }

    /// Claims `stage` for instruction `idx`. Returns false if it was taken.
    pub fn claim(&mut self, stage: Stage, idx: usize) -> bool {
        match self.owners.get_mut(stage.index()) {
            Some(owner @ None) => {
                *owner = Some(idx);
                true
            }
            _ => false,
        }
    }

    /// Instruction holding `stage`, if any.
    pub fn owner(&self, stage: Stage) -> Option<usize> {
        self.owners.get(stage.index()).copied().flatten()
    }
}

/// Runs the current stage of instruction `idx` for one cycle.
///
/// The stage is claimed and its effects applied. If the stage finishes, the
/// instruction moves on by exactly one stage and also claims the new stage
/// for the rest of the cycle.
fn stage_step(state: &mut PipelineState, idx: usize, claims: &mut StageClaims) {
    let PipelineState {
        slots,
        regs,
        memory,
        stats,
        ..
    } = state;
    let Some(slot) = slots.get_mut(idx) else {
        return;
    };

    let _ = claims.claim(slot.stage(), idx);
    if slot.mark_effects() && apply_stage_effects(slot.inst(), slot.stage(), regs, memory) {
        stats.effects_applied += 1;
    }
    if !slot.tick() {
        trace!(
            instruction = idx + 1,
            stage = %slot.stage(),
            left = slot.remaining(slot.stage()),
            "stage busy"
        );
        return;
    }

    let from = slot.stage();
    slot.advance();
    stats.stage_advances += 1;
    trace!(instruction = idx + 1, from = %from, to = %slot.stage(), "advance");

    // Held for the rest of the cycle; its work starts next cycle.
    let stage = slot.stage();
    if !stage.is_complete() {
        let _ = claims.claim(stage, idx);
    }
}

fn record(state: &mut PipelineState, hazard: Hazard) {
    trace!(hazard = %hazard, "stall");
    if hazard.is_data() {
        state.stats.data_stalls += 1;
    } else {
        state.stats.structural_stalls += 1;
    }
    state.hazards.push(hazard);
}

/// Advances all unfinished instructions by one pipelined cycle.
///
/// Returns the stage claims made during the cycle.
pub fn tick_pipelined(state: &mut PipelineState) -> StageClaims {
    let mut order: Vec<usize> = state
        .slots
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_complete())
        .map(|(i, _)| i)
        .collect();
    // Stable: equal stages keep program order.
    order.sort_by_key(|&i| Reverse(state.slots[i].stage()));

    let mut claims = StageClaims::default();
    for idx in order {
        let stage = state.slots[idx].stage();
        if claims.is_claimed(stage) {
            record(
                state,
                Hazard::Structural {
                    instruction: idx,
                    stage,
                },
            );
            continue;
        }
        if let Some(hazard) = data_hazard(&state.slots, idx) {
            record(state, hazard);
            continue;
        }
        stage_step(state, idx, &mut claims);
    }
    claims
}

/// Advances only the oldest unfinished instruction by one stage-step.
///
/// Returns the stage claims made during the cycle.
pub fn tick_sequential(state: &mut PipelineState) -> StageClaims {
    let mut claims = StageClaims::default();
    if let Some(idx) = state.slots.iter().position(|s| !s.is_complete()) {
        stage_step(state, idx, &mut claims);
    }
    claims
}
