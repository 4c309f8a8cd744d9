//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** The cycle limit, initial mode, knowledge gate and teaching program.
//! 2. **Structures:** `SimConfig` for run limits and `ProgramConfig` for the program text.
//! 3. **Loading:** JSON deserialization from strings or files.
//!
//! Every field is optional in JSON; omitted fields take the defaults below.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::MAX_KNOWLEDGE;
use crate::common::error::{ConfigError, ProgramError};
use crate::core::arch::gpr::RegisterFile;
use crate::core::arch::memory::MemoryModel;
use crate::isa::instruction::Reg;
use crate::isa::program::{Program, ProgramEntry, StageTiming};

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle limit after which stepping stops.
    pub const MAX_CYCLES: u64 = crate::common::constants::DEFAULT_MAX_CYCLES;

    /// Minigames start in pipelined mode.
    pub const PIPELINED: bool = true;

    /// CPU knowledge level needed to start the minigame.
    pub const KNOWLEDGE_THRESHOLD: u8 = crate::common::constants::DEFAULT_KNOWLEDGE_THRESHOLD;
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Cycle limit; `step()` is a no-op once `cycle >= max_cycles`.
    #[serde(default = "SimConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Initial mode: pipelined (true) or sequential (false).
    #[serde(default = "SimConfig::default_pipelined")]
    pub pipelined: bool,

    /// Minimum CPU knowledge (0-5) required to activate the minigame.
    #[serde(default = "SimConfig::default_knowledge_threshold")]
    pub knowledge_threshold: u8,

    /// Program to simulate.
    #[serde(default)]
    pub program: ProgramConfig,
}

impl SimConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    fn default_pipelined() -> bool {
        defaults::PIPELINED
    }

    fn default_knowledge_threshold() -> u8 {
        defaults::KNOWLEDGE_THRESHOLD
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not a valid configuration and
    /// `ConfigError::KnowledgeThreshold` if the threshold exceeds `MAX_KNOWLEDGE`.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if config.knowledge_threshold > MAX_KNOWLEDGE {
            return Err(ConfigError::KnowledgeThreshold(config.knowledge_threshold));
        }
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` or `ConfigError::KnowledgeThreshold` as for `from_json_str`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Builds and validates the configured program.
    ///
    /// # Errors
    ///
    /// Returns the `ProgramError` describing the first invalid instruction or seed.
    pub fn build_program(&self) -> Result<Program, ProgramError> {
        self.program.build()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            pipelined: defaults::PIPELINED,
            knowledge_threshold: defaults::KNOWLEDGE_THRESHOLD,
            program: ProgramConfig::default(),
        }
    }
}

/// One instruction line in a program configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstructionConfig {
    /// Assembly text, e.g. `"ADD R2, R1, #5"`.
    pub asm: String,
    /// Cycles per stage: Fetch, Decode, Execute, Memory, Writeback.
    pub cycles: StageTiming,
}

/// One seeded memory cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryCellConfig {
    /// Absolute address.
    pub address: u32,
    /// Initial value.
    #[serde(default)]
    pub value: i64,
}

/// Program definition: instructions, seed registers and seed memory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramConfig {
    /// Instruction lines in program order.
    pub instructions: Vec<InstructionConfig>,

    /// Register seeds keyed by name (`"R1"`, `"PC"`).
    #[serde(default)]
    pub registers: BTreeMap<String, i64>,

    /// Memory seeds in display order.
    #[serde(default)]
    pub memory: Vec<MemoryCellConfig>,
}

impl ProgramConfig {
    /// Validates the configuration and builds a `Program`.
    ///
    /// # Errors
    ///
    /// Returns `ProgramError::Asm` for unparsable instruction text,
    /// `ProgramError::InvalidSeedRegister` / `DuplicateAddress` for bad seeds,
    /// and any error from `Program::new`.
    pub fn build(&self) -> Result<Program, ProgramError> {
        let entries = self
            .instructions
            .iter()
            .enumerate()
            .map(|(i, line)| {
                ProgramEntry::parse(&line.asm, line.cycles)
                    .map_err(|source| ProgramError::Asm { index: i + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut registers = RegisterFile::default();
        for (name, value) in &self.registers {
            if name.eq_ignore_ascii_case("PC") {
                registers.set_pc(*value);
            } else {
                let reg: Reg = name
                    .parse()
                    .map_err(|_| ProgramError::InvalidSeedRegister(name.clone()))?;
                registers.write(reg, *value);
            }
        }

        let mut memory = MemoryModel::default();
        for cell in &self.memory {
            if memory.contains(cell.address) {
                return Err(ProgramError::DuplicateAddress(cell.address));
            }
            memory.write(cell.address, cell.value);
        }

        Program::new(entries, registers, memory)
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        let program = Program::teaching_sequence();
        let instructions = program
            .entries()
            .iter()
            .map(|e| InstructionConfig {
                asm: e.inst.to_string(),
                cycles: e.timing,
            })
            .collect();
        let mut registers: BTreeMap<String, i64> = program
            .registers()
            .gprs()
            .map(|(r, v)| (r.to_string(), v))
            .collect();
        let _ = registers.insert("PC".to_owned(), program.registers().pc());
        let memory = program
            .memory()
            .cells()
            .iter()
            .map(|&(address, value)| MemoryCellConfig { address, value })
            .collect();
        Self {
            instructions,
            registers,
            memory,
        }
    }
}
