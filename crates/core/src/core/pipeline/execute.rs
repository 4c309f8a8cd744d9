//! Stage side effects.
//!
//! Results are committed where they are produced: ALU results in Execute and
//! loads/stores in Memory. Writeback is bookkeeping only, which keeps the
//! model simple enough for the accompanying explanation text.

use crate::core::arch::gpr::RegisterFile;
use crate::core::arch::memory::MemoryModel;
use crate::core::pipeline::stage::Stage;
use crate::isa::instruction::{Instruction, Operand};

/// Resolves the second ALU operand against the current register file.
#[inline]
fn resolve(op2: Operand, regs: &RegisterFile) -> i64 {
    match op2 {
        Operand::Imm(v) => v,
        Operand::Reg(r) => regs.read(r),
    }
}

/// Applies the architectural effect of `inst` in `stage`.
///
/// Callers guarantee this runs at most once per stage per instruction and
/// only on a cycle where the instruction is not stalled.
///
/// # Returns
///
/// `true` if a register or memory cell was written.
pub fn apply_stage_effects(
    inst: &Instruction,
    stage: Stage,
    regs: &mut RegisterFile,
    mem: &mut MemoryModel,
) -> bool {
    match stage {
        Stage::Execute => match inst {
            Instruction::Add { rd, rs, op2 } => {
                let val = regs.read(*rs).wrapping_add(resolve(*op2, regs));
                regs.write(*rd, val);
                true
            }
            Instruction::Sub { rd, rs, op2 } => {
                let val = regs.read(*rs).wrapping_sub(resolve(*op2, regs));
                regs.write(*rd, val);
                true
            }
            Instruction::Load { .. } | Instruction::Store { .. } | Instruction::Jump { .. } => {
                false
            }
        },
        Stage::Memory => match inst {
            Instruction::Load { rd, addr } => {
                regs.write(*rd, mem.read(*addr));
                true
            }
            Instruction::Store { rs, addr } => {
                mem.write(*addr, regs.read(*rs));
                true
            }
            Instruction::Add { .. } | Instruction::Sub { .. } | Instruction::Jump { .. } => false,
        },
        Stage::Fetch | Stage::Decode | Stage::Writeback | Stage::Complete => false,
    }
}
