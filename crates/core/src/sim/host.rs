//! Minigame host.
//!
//! The game controller owns one `MinigameHost`. It holds the running minigame,
//! if any, as an explicit `Option` and routes `simulate <action>` commands to
//! it. Starting a minigame is gated on the player's CPU knowledge.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::common::error::ProgramError;
use crate::config::SimConfig;
use crate::isa::program::Program;
use crate::sim::minigame::PipelineMinigame;

/// Returned by `activate` when the player's CPU knowledge is below the threshold.
pub const MSG_NEED_KNOWLEDGE: &str = "You need more knowledge about CPU architecture to understand this simulation. Explore CPU components and learn more first.";

/// Returned by `handle` when no minigame is running.
pub const MSG_NO_SIMULATION: &str =
    "No active simulation. Start one with 'simulate cpu' or 'simulate memory'.";

/// Returned by `handle` when no action was given.
pub const MSG_MISSING_ACTION: &str =
    "Please specify a simulation action: 'step', 'toggle', 'reset', or 'stop'.";

/// Returned by `stop`.
pub const MSG_STOPPED: &str = "Simulation stopped.";

const USAGE: &str = "Use 'simulate step' to advance the simulation, 'simulate toggle' to switch modes, and 'simulate reset' to restart.";

/// What the enclosing game exposes about the player.
pub trait PlayerContext {
    /// CPU architecture knowledge on a 0-5 scale.
    fn cpu_knowledge(&self) -> u8;
}

/// Plain knowledge levels, for callers without a richer player model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Knowledge {
    /// CPU architecture knowledge (0-5).
    pub cpu: u8,
}

impl PlayerContext for Knowledge {
    fn cpu_knowledge(&self) -> u8 {
        self.cpu
    }
}

/// Actions accepted by a running minigame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAction {
    /// Advance one cycle.
    Step,
    /// Switch pipelined/non-pipelined mode and restart.
    Toggle,
    /// Restart from cycle 0.
    Reset,
    /// Discard the running minigame.
    Stop,
    /// Show the current status without advancing.
    Status,
    /// Show the pipelining explanation.
    Explain,
}

/// Unrecognised action text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown simulation action: {}. Try 'step', 'toggle', 'reset', or 'stop'.",
            self.0
        )
    }
}

impl FromStr for SimAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = s.trim().to_ascii_lowercase();
        match action.as_str() {
            "step" => Ok(Self::Step),
            "toggle" => Ok(Self::Toggle),
            "reset" => Ok(Self::Reset),
            "stop" => Ok(Self::Stop),
            "status" => Ok(Self::Status),
            "explain" => Ok(Self::Explain),
            _ => Err(UnknownAction(action)),
        }
    }
}

/// The game controller's slot for the CPU pipeline minigame.
#[derive(Debug, Clone)]
pub struct MinigameHost {
    config: SimConfig,
    program: Program,
    current: Option<PipelineMinigame>,
}

impl MinigameHost {
    /// Creates a host, validating the configured program up front.
    ///
    /// # Errors
    ///
    /// Returns the `ProgramError` if the configured program is invalid.
    pub fn new(config: SimConfig) -> Result<Self, ProgramError> {
        let program = config.build_program()?;
        Ok(Self {
            config,
            program,
            current: None,
        })
    }

    /// Starts a fresh minigame if the player knows enough about CPUs.
    ///
    /// On success returns the explanation, the initial status and usage hints;
    /// any previous minigame is replaced. On failure the current slot is left
    /// untouched and guidance text is returned.
    pub fn activate(&mut self, ctx: &impl PlayerContext) -> String {
        let level = ctx.cpu_knowledge();
        if level < self.config.knowledge_threshold {
            debug!(
                level,
                required = self.config.knowledge_threshold,
                "minigame activation refused"
            );
            return MSG_NEED_KNOWLEDGE.to_owned();
        }

        let game = PipelineMinigame::new(self.program.clone(), &self.config);
        let text = format!(
            "{}\n\n{}\n\n{USAGE}",
            PipelineMinigame::explain(),
            game.status()
        );
        debug!(level, "minigame activated");
        self.current = Some(game);
        text
    }

    /// Handles `simulate <action>` for the running minigame.
    ///
    /// `None` means the player typed `simulate` with no action.
    pub fn handle(&mut self, action: Option<&str>) -> String {
        if self.current.is_none() {
            return MSG_NO_SIMULATION.to_owned();
        }
        let Some(action) = action.filter(|a| !a.trim().is_empty()) else {
            return MSG_MISSING_ACTION.to_owned();
        };
        match action.parse::<SimAction>() {
            Ok(action) => self.dispatch(action),
            Err(unknown) => unknown.to_string(),
        }
    }

    /// Applies a parsed action to the running minigame.
    pub fn dispatch(&mut self, action: SimAction) -> String {
        if action == SimAction::Stop {
            return match self.current.take() {
                Some(_) => {
                    debug!("minigame stopped");
                    MSG_STOPPED.to_owned()
                }
                None => MSG_NO_SIMULATION.to_owned(),
            };
        }
        let Some(game) = self.current.as_mut() else {
            return MSG_NO_SIMULATION.to_owned();
        };
        match action {
            SimAction::Step => game.step(),
            SimAction::Toggle => game.toggle_mode(),
            SimAction::Reset => game.reset(),
            SimAction::Status => game.status(),
            SimAction::Explain => PipelineMinigame::explain().to_owned(),
            SimAction::Stop => MSG_STOPPED.to_owned(),
        }
    }

    /// The running minigame, if any.
    pub const fn current(&self) -> Option<&PipelineMinigame> {
        self.current.as_ref()
    }

    /// True while a minigame is running.
    pub const fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// The host's configuration.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }
}
