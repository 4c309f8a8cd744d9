//! Validated programs.
//!
//! A `Program` bundles the fixed instruction sequence, the per-stage cycle
//! costs of each instruction, and the seed register and memory values. It is
//! validated once at construction so that the pipeline never meets an operand
//! it cannot resolve.

use crate::common::constants::STAGE_COUNT;
use crate::common::error::{AsmError, ProgramError};
use crate::core::arch::gpr::RegisterFile;
use crate::core::arch::memory::MemoryModel;
use crate::isa::instruction::{Instruction, Operand, Reg};

/// Cycles spent in each real stage (Fetch, Decode, Execute, Memory, Writeback).
///
/// A zero entry means the stage is passed through instantly.
pub type StageTiming = [u32; STAGE_COUNT];

/// One program line: the instruction and its stage costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEntry {
    /// The instruction.
    pub inst: Instruction,
    /// Cycles per stage.
    pub timing: StageTiming,
}

impl ProgramEntry {
    /// Creates an entry.
    pub const fn new(inst: Instruction, timing: StageTiming) -> Self {
        Self { inst, timing }
    }

    /// Parses the instruction text and pairs it with `timing`.
    ///
    /// # Errors
    ///
    /// Returns the `AsmError` for malformed instruction text.
    pub fn parse(text: &str, timing: StageTiming) -> Result<Self, AsmError> {
        Ok(Self {
            inst: text.parse()?,
            timing,
        })
    }
}

/// A validated instruction sequence with its seed architectural state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    entries: Vec<ProgramEntry>,
    registers: RegisterFile,
    memory: MemoryModel,
}

impl Program {
    /// Validates and builds a program.
    ///
    /// # Errors
    ///
    /// Returns `ProgramError::Empty` for an empty sequence,
    /// `ProgramError::UnknownRegister` when an instruction names a register the
    /// seed register file lacks, and `ProgramError::UnmappedAddress` when an
    /// instruction addresses memory that was not seeded.
    pub fn new(
        entries: Vec<ProgramEntry>,
        registers: RegisterFile,
        memory: MemoryModel,
    ) -> Result<Self, ProgramError> {
        if entries.is_empty() {
            return Err(ProgramError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            let index = i + 1;
            if let Some(reg) = entry
                .inst
                .registers()
                .into_iter()
                .find(|r| !registers.contains(*r))
            {
                return Err(ProgramError::UnknownRegister { index, reg });
            }
            if let Some(addr) = entry.inst.address().filter(|a| !memory.contains(*a)) {
                return Err(ProgramError::UnmappedAddress { index, addr });
            }
        }
        Ok(Self {
            entries,
            registers,
            memory,
        })
    }

    /// The five-instruction sequence used by the CPU core minigame.
    ///
    /// `R1..R3` and `PC` start at zero; memory holds `0x1000: 42` and `0x1004: 0`.
    pub fn teaching_sequence() -> Self {
        let entries = vec![
            ProgramEntry::new(
                Instruction::Load {
                    rd: Reg(1),
                    addr: 0x1000,
                },
                [1, 1, 1, 2, 1],
            ),
            ProgramEntry::new(
                Instruction::Add {
                    rd: Reg(2),
                    rs: Reg(1),
                    op2: Operand::Imm(5),
                },
                [1, 1, 2, 0, 1],
            ),
            ProgramEntry::new(
                Instruction::Sub {
                    rd: Reg(3),
                    rs: Reg(2),
                    op2: Operand::Imm(2),
                },
                [1, 1, 2, 0, 1],
            ),
            ProgramEntry::new(
                Instruction::Store {
                    rs: Reg(3),
                    addr: 0x1004,
                },
                [1, 1, 1, 2, 0],
            ),
            ProgramEntry::new(
                Instruction::Jump {
                    label: "LABEL1".to_owned(),
                },
                [1, 1, 1, 0, 0],
            ),
        ];
        Self {
            entries,
            registers: RegisterFile::with_gprs([Reg(1), Reg(2), Reg(3)]),
            memory: MemoryModel::from_cells([(0x1000, 42), (0x1004, 0)]),
        }
    }

    /// Program lines in order.
    pub fn entries(&self) -> &[ProgramEntry] {
        &self.entries
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated program.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seed register values.
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Seed memory contents.
    pub const fn memory(&self) -> &MemoryModel {
        &self.memory
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::teaching_sequence()
    }
}
