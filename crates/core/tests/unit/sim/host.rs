//! Minigame Host Tests.
//!
//! Knowledge gating, action parsing and routing through the optional slot.

use pipesim_core::sim::host::{
    MSG_MISSING_ACTION, MSG_NEED_KNOWLEDGE, MSG_NO_SIMULATION, MSG_STOPPED, UnknownAction,
};
use pipesim_core::sim::minigame::MSG_RESET;
use pipesim_core::sim::{Knowledge, PlayerContext, SimAction};
use pipesim_core::{MinigameHost, PipelineMinigame, SimConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn host() -> MinigameHost {
    MinigameHost::new(SimConfig::default()).unwrap()
}

fn active_host() -> MinigameHost {
    let mut host = host();
    let _ = host.activate(&Knowledge { cpu: 5 });
    host
}

struct Scholar;

impl PlayerContext for Scholar {
    fn cpu_knowledge(&self) -> u8 {
        4
    }
}

// ══════════════════════════════════════════════════════════
// 1. Activation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn activation_refused_below_threshold(#[case] cpu: u8) {
    let mut host = host();
    assert_eq!(host.activate(&Knowledge { cpu }), MSG_NEED_KNOWLEDGE);
    assert!(!host.is_active());
}

#[test]
fn refused_activation_keeps_running_game() {
    let mut host = active_host();
    let _ = host.handle(Some("step"));
    let _ = host.activate(&Knowledge { cpu: 0 });
    assert_eq!(host.current().unwrap().state().cycle(), 1);
}

#[rstest]
#[case(3)]
#[case(5)]
fn activation_at_or_above_threshold(#[case] cpu: u8) {
    let mut host = host();
    let out = host.activate(&Knowledge { cpu });
    assert!(host.is_active());
    assert!(out.starts_with(PipelineMinigame::explain()));
    assert!(out.contains("\n\nCPU Pipeline Simulation - Cycle 0\n"));
    assert!(out.ends_with("and 'simulate reset' to restart."));
}

#[test]
fn custom_player_context() {
    let mut host = host();
    let _ = host.activate(&Scholar);
    assert!(host.is_active());
}

#[test]
fn reactivation_starts_fresh() {
    let mut host = active_host();
    let _ = host.handle(Some("step"));
    let _ = host.activate(&Knowledge { cpu: 5 });
    assert_eq!(host.current().unwrap().state().cycle(), 0);
}

#[test]
fn configured_threshold_applies() {
    let config = SimConfig {
        knowledge_threshold: 5,
        ..SimConfig::default()
    };
    let mut host = MinigameHost::new(config).unwrap();
    assert_eq!(host.activate(&Knowledge { cpu: 4 }), MSG_NEED_KNOWLEDGE);
    assert_eq!(host.config().knowledge_threshold, 5);
}

// ══════════════════════════════════════════════════════════
// 2. Action routing
// ══════════════════════════════════════════════════════════

#[test]
fn no_simulation_running() {
    let mut host = host();
    assert_eq!(host.handle(Some("step")), MSG_NO_SIMULATION);
    assert_eq!(host.handle(None), MSG_NO_SIMULATION);
    assert_eq!(host.dispatch(SimAction::Stop), MSG_NO_SIMULATION);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn missing_action(#[case] action: Option<&str>) {
    let mut host = active_host();
    assert_eq!(host.handle(action), MSG_MISSING_ACTION);
}

#[test]
fn unknown_action() {
    let mut host = active_host();
    assert_eq!(
        host.handle(Some("fly")),
        "Unknown simulation action: fly. Try 'step', 'toggle', 'reset', or 'stop'."
    );
}

#[rstest]
#[case("step", SimAction::Step)]
#[case("STEP", SimAction::Step)]
#[case(" Toggle ", SimAction::Toggle)]
#[case("reset", SimAction::Reset)]
#[case("stop", SimAction::Stop)]
#[case("status", SimAction::Status)]
#[case("explain", SimAction::Explain)]
fn action_parsing(#[case] text: &str, #[case] expected: SimAction) {
    assert_eq!(text.parse::<SimAction>(), Ok(expected));
}

#[test]
fn action_parse_error_is_lowercased() {
    assert_eq!(
        "Jump".parse::<SimAction>(),
        Err(UnknownAction("jump".to_owned()))
    );
}

#[test]
fn step_routes_to_minigame() {
    let mut host = active_host();
    let out = host.handle(Some("step"));
    assert!(out.starts_with("CPU Pipeline Simulation - Cycle 1"));
}

#[test]
fn toggle_and_reset_route_to_minigame() {
    let mut host = active_host();
    assert_eq!(
        host.handle(Some("toggle")),
        "CPU is now running in non-pipelined mode."
    );
    assert_eq!(host.handle(Some("reset")), MSG_RESET);
    assert!(!host.current().unwrap().state().is_pipelined());
}

#[test]
fn status_does_not_advance() {
    let mut host = active_host();
    let _ = host.handle(Some("status"));
    assert_eq!(host.current().unwrap().state().cycle(), 0);
}

#[test]
fn stop_clears_slot() {
    let mut host = active_host();
    assert_eq!(host.handle(Some("stop")), MSG_STOPPED);
    assert!(!host.is_active());
    assert_eq!(host.handle(Some("step")), MSG_NO_SIMULATION);
}

#[test]
fn full_run_through_host() {
    let mut host = active_host();
    let mut last = String::new();
    for _ in 0..18 {
        last = host.handle(Some("step"));
    }
    assert!(last.ends_with("Score: 139/100"));
    assert_eq!(
        host.handle(Some("step")),
        "Simulation complete. Use 'reset' to start again."
    );
}
