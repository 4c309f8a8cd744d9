//! CPU pipeline minigame.
//!
//! Every operation returns the text shown to the player. State changes are
//! delegated to `PipelineState`; formatting to `render`.

use crate::common::error::ProgramError;
use crate::config::SimConfig;
use crate::core::pipeline::state::{PipelineState, StepOutcome};
use crate::isa::program::Program;
use crate::render;

/// Returned by `step()` after the run has completed.
pub const MSG_ALREADY_COMPLETE: &str = "Simulation complete. Use 'reset' to start again.";

/// Returned by `step()` once the cycle limit is reached.
pub const MSG_CYCLE_LIMIT: &str = "Maximum cycle count reached. Simulation terminated.";

/// Returned by `reset()`.
pub const MSG_RESET: &str = "CPU pipeline simulation reset.";

const EXPLANATION: &str = "\
CPU PIPELINE EXPLANATION:

A CPU pipeline breaks instruction execution into stages that can run in parallel.
The 5 basic stages are:

1. Fetch: Get the instruction from memory
2. Decode: Determine what the instruction does
3. Execute: Perform the operation (ALU)
4. Memory: Access memory if needed
5. Writeback: Store the result in registers

Pipelined execution allows multiple instructions to be processed simultaneously,
with each in a different stage. This increases throughput (instructions per second).

However, pipelining introduces hazards:
- Data Hazards: When an instruction depends on data from a previous instruction
- Structural Hazards: When two instructions need the same hardware resource
- Control Hazards: When the program flow changes (branches, jumps)

This simulation demonstrates how pipelining improves performance and
shows the impact of data and structural hazards.

Try toggling between pipelined and non-pipelined modes to compare!";

/// The CPU pipeline minigame.
#[derive(Debug, Clone)]
pub struct PipelineMinigame {
    state: PipelineState,
}

impl PipelineMinigame {
    /// Creates a minigame for `program` with the limits in `config`.
    pub fn new(program: Program, config: &SimConfig) -> Self {
        Self {
            state: PipelineState::with_config(program, config),
        }
    }

    /// Creates a minigame for the program described by `config`.
    ///
    /// # Errors
    ///
    /// Returns the `ProgramError` if the configured program is invalid.
    pub fn from_config(config: &SimConfig) -> Result<Self, ProgramError> {
        Ok(Self::new(config.build_program()?, config))
    }

    /// Advances one cycle and returns the new status.
    ///
    /// The completing step also carries the cycle count, efficiency and score.
    pub fn step(&mut self) -> String {
        match self.state.step() {
            StepOutcome::AlreadyComplete => MSG_ALREADY_COMPLETE.to_owned(),
            StepOutcome::CycleLimit => MSG_CYCLE_LIMIT.to_owned(),
            StepOutcome::Advanced => self.status(),
            StepOutcome::Completed => format!(
                "{}\n\n{}",
                self.status(),
                render::completion_summary(&self.state)
            ),
        }
    }

    /// Switches between pipelined and non-pipelined mode, restarting the run.
    pub fn toggle_mode(&mut self) -> String {
        self.state.toggle_mode();
        format!(
            "CPU is now running in {} mode.",
            if self.state.is_pipelined() {
                "pipelined"
            } else {
                "non-pipelined"
            }
        )
    }

    /// Restarts the run from cycle 0.
    pub fn reset(&mut self) -> String {
        self.state.reset();
        MSG_RESET.to_owned()
    }

    /// Current status text.
    pub fn status(&self) -> String {
        render::status(&self.state)
    }

    /// Explanation of pipelining shown when the minigame starts.
    pub const fn explain() -> &'static str {
        EXPLANATION
    }

    /// Read-only view of the simulator state.
    pub const fn state(&self) -> &PipelineState {
        &self.state
    }
}

impl Default for PipelineMinigame {
    fn default() -> Self {
        Self::new(Program::teaching_sequence(), &SimConfig::default())
    }
}
