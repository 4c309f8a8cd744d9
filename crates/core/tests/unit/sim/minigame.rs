//! Minigame Surface Tests.

use pipesim_core::sim::minigame::{MSG_ALREADY_COMPLETE, MSG_CYCLE_LIMIT, MSG_RESET};
use pipesim_core::{PipelineMinigame, SimConfig};
use pretty_assertions::assert_eq;

fn finish(game: &mut PipelineMinigame) -> String {
    let mut last = String::new();
    while !game.state().is_completed() {
        last = game.step();
    }
    last
}

#[test]
fn step_returns_status() {
    let mut game = PipelineMinigame::default();
    let out = game.step();
    assert!(out.starts_with("CPU Pipeline Simulation - Cycle 1\nMode: Pipelined"));
    assert_eq!(out, game.status());
}

#[test]
fn completing_step_appends_summary() {
    let mut game = PipelineMinigame::default();
    let out = finish(&mut game);
    let expected_tail =
        "\n\nSimulation complete in 18 cycles!\nPipeline Efficiency: 1.39\nScore: 139/100";
    assert!(out.ends_with(expected_tail), "{out}");
    assert!(out.starts_with(&game.status()));
}

#[test]
fn step_after_completion() {
    let mut game = PipelineMinigame::default();
    let _ = finish(&mut game);
    assert_eq!(game.step(), MSG_ALREADY_COMPLETE);
}

#[test]
fn step_at_cycle_limit() {
    let config = SimConfig {
        max_cycles: 2,
        ..SimConfig::default()
    };
    let mut game = PipelineMinigame::from_config(&config).unwrap();
    let _ = game.step();
    let _ = game.step();
    assert_eq!(game.step(), MSG_CYCLE_LIMIT);
    assert_eq!(game.state().cycle(), 2);
}

#[test]
fn toggle_reports_new_mode() {
    let mut game = PipelineMinigame::default();
    assert_eq!(
        game.toggle_mode(),
        "CPU is now running in non-pipelined mode."
    );
    assert!(game.status().contains("Mode: Non-Pipelined"));
    assert_eq!(game.toggle_mode(), "CPU is now running in pipelined mode.");
}

#[test]
fn reset_message_and_state() {
    let mut game = PipelineMinigame::default();
    let _ = game.step();
    assert_eq!(game.reset(), MSG_RESET);
    assert_eq!(game.state().cycle(), 0);
}

#[test]
fn sequential_config_runs_to_completion() {
    let config = SimConfig {
        max_cycles: 30,
        pipelined: false,
        ..SimConfig::default()
    };
    let mut game = PipelineMinigame::from_config(&config).unwrap();
    let out = finish(&mut game);
    assert!(out.contains("Mode: Non-Pipelined"));
    assert!(out.ends_with(
        "Simulation complete in 29 cycles!\nPipeline Efficiency: 0.86\nScore: 86/100"
    ));
}

#[test]
fn explanation_names_every_stage() {
    let text = PipelineMinigame::explain();
    assert!(text.starts_with("CPU PIPELINE EXPLANATION:"));
    for stage in ["Fetch", "Decode", "Execute", "Memory", "Writeback"] {
        assert!(text.contains(stage));
    }
}
