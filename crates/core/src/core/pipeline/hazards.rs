//! Hazard Detection.
//!
//! This module decides when an instruction must stall. It provides:
//! 1. **Register Sets:** What each instruction reads and writes.
//! 2. **Data Hazards:** Read-after-write conflicts against earlier, still in-flight instructions.
//! 3. **Hazard Records:** The stall reasons shown to the player each cycle.
//!
//! There is no forwarding network: a consumer waits until its producer has
//! fully retired.

use std::fmt;

use crate::core::pipeline::slot::Slot;
use crate::core::pipeline::stage::Stage;
use crate::isa::instruction::{Instruction, Reg};

/// A stall recorded during one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hazard {
    /// The instruction reads a register an earlier in-flight instruction writes.
    Data {
        /// 0-based program index of the stalled instruction.
        instruction: usize,
        /// Conflicting registers, ascending.
        regs: Vec<Reg>,
    },
    /// The instruction's stage was already claimed this cycle.
    Structural {
        /// 0-based program index of the stalled instruction.
        instruction: usize,
        /// The contended stage.
        stage: Stage,
    },
}

impl Hazard {
    /// 0-based program index of the stalled instruction.
    pub const fn instruction(&self) -> usize {
        match self {
            Self::Data { instruction, .. } | Self::Structural { instruction, .. } => *instruction,
        }
    }

    /// True for data hazards.
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data { instruction, regs } => {
                let names: Vec<String> = regs.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "Instruction {} stalled due to data dependency on register(s) {}",
                    instruction + 1,
                    names.join(", ")
                )
            }
            Self::Structural { instruction, stage } => write!(
                f,
                "Instruction {} stalled at {stage} stage due to structural hazard",
                instruction + 1
            ),
        }
    }
}

/// Registers the instruction reads.
///
/// LOAD and STORE use absolute addresses, so only STORE's data register counts.
pub fn read_set(inst: &Instruction) -> Vec<Reg> {
    match inst {
        Instruction::Add { rs, op2, .. } | Instruction::Sub { rs, op2, .. } => {
            let mut regs = vec![*rs];
            if let Some(r) = op2.reg().filter(|r| r != rs) {
                regs.push(r);
            }
            regs
        }
        Instruction::Store { rs, .. } => vec![*rs],
        Instruction::Load { .. } | Instruction::Jump { .. } => Vec::new(),
    }
}

/// Register the instruction writes, if any.
pub const fn write_set(inst: &Instruction) -> Option<Reg> {
    match inst {
        Instruction::Load { rd, .. }
        | Instruction::Add { rd, .. }
        | Instruction::Sub { rd, .. } => Some(*rd),
        Instruction::Store { .. } | Instruction::Jump { .. } => None,
    }
}

/// Checks whether instruction `idx` must stall on a data dependency.
///
/// Only instructions in Decode or Execute are checked. Earlier instructions
/// are scanned in program order and the first one that is still in flight and
/// writes a register `idx` reads produces the hazard.
pub fn data_hazard(slots: &[Slot], idx: usize) -> Option<Hazard> {
    let slot = slots.get(idx)?;
    if !matches!(slot.stage(), Stage::Decode | Stage::Execute) {
        return None;
    }
    let reads = read_set(slot.inst());
    if reads.is_empty() {
        return None;
    }

    slots[..idx]
        .iter()
        .filter(|prev| !prev.is_complete())
        .find_map(|prev| {
            let written = write_set(prev.inst())?;
            reads.contains(&written).then(|| Hazard::Data {
                instruction: idx,
                regs: vec![written],
            })
        })
}
