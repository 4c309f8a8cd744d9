//! Property Tests.
//!
//! Randomised programs checked against the scheduler's invariants.

use pipesim_core::core::pipeline::{Stage, StepOutcome};
use pipesim_core::isa::{Program, StageTiming};
use pipesim_core::render;
use proptest::prelude::*;

use crate::common::{TestContext, program};

const TEMPLATES: [&str; 6] = [
    "LOAD R1, [0x10]",
    "ADD R2, R1, #3",
    "SUB R3, R2, R1",
    "STORE R3, [0x14]",
    "ADD R1, R3, #1",
    "JUMP LABEL1",
];

fn arb_timing() -> impl Strategy<Value = StageTiming> {
    prop::array::uniform5(0u32..3)
}

fn arb_program() -> impl Strategy<Value = Program> {
    prop::collection::vec((0..TEMPLATES.len(), arb_timing()), 1..6).prop_map(|lines| {
        let lines: Vec<(&str, StageTiming)> =
            lines.into_iter().map(|(i, t)| (TEMPLATES[i], t)).collect();
        program(&lines, &[1, 2, 3], &[(0x10, 9), (0x14, 0)])
    })
}

fn run(program: Program, pipelined: bool) -> TestContext {
    let mut ctx = TestContext::with_program(program, 200, pipelined);
    let _ = ctx.run_to_end();
    ctx
}

proptest! {
    #[test]
    fn stages_move_forward_one_at_a_time(p in arb_program(), pipelined in any::<bool>()) {
        let mut ctx = TestContext::with_program(p, 200, pipelined);
        let mut prev = ctx.stages();
        loop {
            let outcome = ctx.state.step();
            let now = ctx.stages();
            for (a, b) in prev.iter().zip(&now) {
                prop_assert!(b >= a);
                prop_assert!(b.index() <= a.index() + 1);
            }
            prev = now;
            if outcome != StepOutcome::Advanced {
                break;
            }
        }
    }

    #[test]
    fn sequential_moves_at_most_one_instruction(p in arb_program()) {
        let mut ctx = TestContext::with_program(p, 200, false);
        let mut prev = ctx.stages();
        loop {
            let outcome = ctx.state.step();
            let now = ctx.stages();
            let moved = prev.iter().zip(&now).filter(|(a, b)| a != b).count();
            prop_assert!(moved <= 1);
            prop_assert!(ctx.state.hazards().is_empty());
            prev = now;
            if outcome != StepOutcome::Advanced {
                break;
            }
        }
    }

    #[test]
    fn pipelined_progress_starts_from_distinct_stages(p in arb_program()) {
        let mut ctx = TestContext::with_program(p, 200, true);
        let mut prev = ctx.stages();
        while ctx.state.step() == StepOutcome::Advanced {
            let now = ctx.stages();
            let mut starts: Vec<Stage> = prev
                .iter()
                .zip(&now)
                .filter(|(a, b)| a != b)
                .map(|(a, _)| *a)
                .collect();
            let total = starts.len();
            starts.sort();
            starts.dedup();
            prop_assert_eq!(starts.len(), total);
            prev = now;
        }
    }

    #[test]
    fn runs_are_deterministic(p in arb_program(), pipelined in any::<bool>()) {
        let a = run(p.clone(), pipelined);
        let b = run(p, pipelined);
        prop_assert_eq!(a.state.cycle(), b.state.cycle());
        prop_assert_eq!(a.stages(), b.stages());
        prop_assert_eq!(a.state.registers(), b.state.registers());
        prop_assert_eq!(a.state.memory(), b.state.memory());
        prop_assert_eq!(a.hazard_messages(), b.hazard_messages());
        prop_assert_eq!(render::status(&a.state), render::status(&b.state));
    }

    #[test]
    fn sequential_is_never_faster(p in arb_program()) {
        let pipe = run(p.clone(), true);
        let seq = run(p, false);
        prop_assert!(pipe.state.is_completed());
        prop_assert!(seq.state.is_completed());
        prop_assert!(seq.state.cycle() >= pipe.state.cycle());
    }

    #[test]
    fn toggle_always_restarts(p in arb_program(), steps in 0usize..30) {
        let mut ctx = TestContext::with_program(p, 200, true);
        let _ = ctx.step_n(steps);
        ctx.state.toggle_mode();
        prop_assert_eq!(ctx.state.cycle(), 0);
        prop_assert!(!ctx.state.is_completed());
        prop_assert!(!ctx.state.is_pipelined());
        prop_assert!(ctx.stages().iter().all(|s| *s == Stage::Fetch));
    }
}
