//! Status rendering.
//!
//! Formats a `PipelineState` as the text the player sees after every command:
//! the cycle and mode, a stage-by-stage diagram, a register dump (PC last), a
//! memory dump in insertion order and the hazards recorded this cycle.

use std::fmt;

use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::state::PipelineState;

/// Width of one diagram column.
const COLUMN: usize = 10;

/// Display adapter producing the status text of a pipeline state.
#[derive(Debug, Clone, Copy)]
pub struct StatusView<'a>(pub &'a PipelineState);

impl fmt::Display for StatusView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "CPU Pipeline Simulation - Cycle {}", state.cycle())?;
        writeln!(f, "Mode: {}", mode_label(state.is_pipelined()))?;

        writeln!(f)?;
        writeln!(f, "Pipeline Status:")?;
        write!(f, "  ")?;
        for stage in Stage::ALL {
            write!(f, "{:<COLUMN$}", stage.name())?;
        }
        writeln!(f)?;
        for (i, slot) in state.slots().iter().enumerate() {
            write!(f, "{}: ", i + 1)?;
            let current = slot.stage();
            for stage in Stage::ALL {
                // The current cell is not padded, so long mnemonics shift the row.
                if stage == current {
                    write!(f, "[{}] ", slot.inst().mnemonic())?;
                } else if stage < current {
                    write!(f, "{:<COLUMN$}", "[DONE]")?;
                } else {
                    write!(f, "{:<COLUMN$}", "[    ]")?;
                }
            }
            writeln!(f, " {}", slot.inst())?;
        }

        writeln!(f)?;
        writeln!(f, "Register State:")?;
        let regs = state.registers();
        for (reg, val) in regs.gprs() {
            writeln!(f, "  {reg}: {val}")?;
        }
        writeln!(f, "  PC: {}", regs.pc())?;

        writeln!(f)?;
        write!(f, "Memory State:")?;
        for (addr, val) in state.memory().cells() {
            write!(f, "\n  0x{addr:04x}: {val}")?;
        }

        if !state.hazards().is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Hazards This Cycle:")?;
            for hazard in state.hazards() {
                write!(f, "\n  - {hazard}")?;
            }
        }
        Ok(())
    }
}

/// Mode label used in the status header.
pub const fn mode_label(pipelined: bool) -> &'static str {
    if pipelined { "Pipelined" } else { "Non-Pipelined" }
}

/// Renders the full status text.
pub fn status(state: &PipelineState) -> String {
    StatusView(state).to_string()
}

/// Renders the completion summary appended to the final step's output.
pub fn completion_summary(state: &PipelineState) -> String {
    format!(
        "Simulation complete in {} cycles!\nPipeline Efficiency: {:.2}\nScore: {}/100",
        state.cycle(),
        state.efficiency(),
        state.score()
    )
}
