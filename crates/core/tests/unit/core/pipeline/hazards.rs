//! Hazard Detection Tests.
//!
//! Verifies read/write sets, the Decode/Execute-only data hazard check, and
//! the stall messages recorded by the scheduler in the teaching sequence.

use pipesim_core::core::pipeline::hazards::{data_hazard, read_set, write_set};
use pipesim_core::core::pipeline::{Hazard, Slot, Stage};
use pipesim_core::isa::{Instruction, ProgramEntry, Reg};
use pretty_assertions::assert_eq;

use crate::common::{TestContext, program};

fn inst(text: &str) -> Instruction {
    text.parse().unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Register sets
// ══════════════════════════════════════════════════════════

#[test]
fn load_writes_destination_only() {
    let i = inst("LOAD R1, [0x1000]");
    assert!(read_set(&i).is_empty());
    assert_eq!(write_set(&i), Some(Reg(1)));
}

#[test]
fn alu_immediate_reads_one_register() {
    let i = inst("ADD R2, R1, #5");
    assert_eq!(read_set(&i), vec![Reg(1)]);
    assert_eq!(write_set(&i), Some(Reg(2)));
}

#[test]
fn alu_same_register_twice_is_read_once() {
    let i = inst("SUB R3, R1, R1");
    assert_eq!(read_set(&i), vec![Reg(1)]);
}

#[test]
fn store_reads_data_register() {
    let i = inst("STORE R3, [0x1004]");
    assert_eq!(read_set(&i), vec![Reg(3)]);
    assert_eq!(write_set(&i), None);
}

#[test]
fn jump_touches_nothing() {
    let i = inst("JUMP LABEL1");
    assert!(read_set(&i).is_empty());
    assert_eq!(write_set(&i), None);
}

// ══════════════════════════════════════════════════════════
// 2. Detection against slots
// ══════════════════════════════════════════════════════════

#[test]
fn no_check_outside_decode_and_execute() {
    // Both at Fetch: the consumer is not checked yet.
    let slots: Vec<Slot> = ["LOAD R1, [0x1000]", "ADD R2, R1, #5"]
        .iter()
        .map(|t| Slot::new(&ProgramEntry::parse(t, [1, 1, 1, 1, 1]).unwrap()))
        .collect();
    assert_eq!(data_hazard(&slots, 1), None);
}

#[test]
fn out_of_range_index_is_none() {
    let slots: Vec<Slot> = Vec::new();
    assert_eq!(data_hazard(&slots, 3), None);
}

#[test]
fn consumer_in_decode_waits_for_producer() {
    let mut ctx = TestContext::new();
    // Cycle 1: LOAD fetches. Cycle 2: LOAD decodes, ADD fetches.
    let _ = ctx.step_n(2);
    assert_eq!(&ctx.stages()[..2], &[Stage::Execute, Stage::Decode]);
    assert_eq!(
        data_hazard(ctx.state.slots(), 1),
        Some(Hazard::Data {
            instruction: 1,
            regs: vec![Reg(1)]
        })
    );
}

#[test]
fn consumer_waits_while_any_producer_in_flight() {
    let p = program(
        &[
            ("LOAD R1, [0x10]", [1, 5, 5, 5, 5]),
            ("ADD R1, R2, #1", [1, 5, 5, 5, 5]),
            ("ADD R3, R1, #1", [1, 1, 1, 1, 1]),
        ],
        &[1, 2, 3],
        &[(0x10, 0)],
    );
    let mut ctx = TestContext::with_program(p, 50, true);
    // The consumer reaches Decode while both producers are still in flight.
    let _ = ctx.step_n(3);
    assert_eq!(ctx.stages()[2], Stage::Decode);
    assert_eq!(
        data_hazard(ctx.state.slots(), 2),
        Some(Hazard::Data {
            instruction: 2,
            regs: vec![Reg(1)]
        })
    );
}

// ══════════════════════════════════════════════════════════
// 3. Recorded stalls in the teaching sequence
// ══════════════════════════════════════════════════════════

#[test]
fn first_cycle_structural_stalls_at_fetch() {
    let mut ctx = TestContext::new();
    let _ = ctx.state.step();
    assert_eq!(
        ctx.hazard_messages(),
        [
            "Instruction 2 stalled at Fetch stage due to structural hazard",
            "Instruction 3 stalled at Fetch stage due to structural hazard",
            "Instruction 4 stalled at Fetch stage due to structural hazard",
            "Instruction 5 stalled at Fetch stage due to structural hazard",
        ]
    );
}

#[test]
fn data_hazard_recorded_before_add_executes() {
    let mut ctx = TestContext::new();
    let mut saw_hazard = false;
    while ctx.stages()[1] < Stage::Execute {
        let _ = ctx.state.step();
        saw_hazard |= ctx
            .state
            .hazards()
            .iter()
            .any(|h| *h == Hazard::Data { instruction: 1, regs: vec![Reg(1)] });
        assert!(ctx.state.cycle() < 20, "ADD never reached Execute");
    }
    assert!(saw_hazard, "ADD must stall on R1 before executing");
}

#[test]
fn third_cycle_mixes_data_and_structural() {
    let mut ctx = TestContext::new();
    let _ = ctx.step_n(3);
    assert_eq!(
        ctx.hazard_messages(),
        [
            "Instruction 2 stalled due to data dependency on register(s) R1",
            "Instruction 4 stalled at Fetch stage due to structural hazard",
            "Instruction 5 stalled at Fetch stage due to structural hazard",
        ]
    );
}

#[test]
fn hazards_cleared_every_cycle() {
    let mut ctx = TestContext::new();
    let _ = ctx.run_to_end();
    // The last cycles only move STORE, which no longer waits on anything.
    assert!(ctx.state.hazards().is_empty());
    assert!(ctx.state.stats().total_stalls() > 0);
}
